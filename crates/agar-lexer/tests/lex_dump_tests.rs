/// Tests for the `agar-lex` token dump

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn dump_stdin(source: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_agar-lex"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn agar-lex");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(source.as_bytes())
        .expect("write source");
    child.wait_with_output().expect("wait for agar-lex")
}

#[test]
fn test_dump_uses_grammar_names() {
    let output = dump_stdin("agar <a>\nmagar ;");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "agar @ 1:1 = \"agar\"",
            "< @ 1:6 = \"<\"",
            "identifier @ 1:7 = \"a\"",
            "> @ 1:8 = \">\"",
            "magar @ 2:1 = \"magar\"",
            "; @ 2:7 = \";\"",
            "$ @ 2:8 = \"\"",
        ]
    );
}

#[test]
fn test_dump_fails_on_invalid_character() {
    let output = dump_stdin("int x = 1;");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("invalid @ 1:7 = \"=\""));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 invalid character(s)"));
}

#[test]
fn test_dump_missing_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_agar-lex"))
        .arg("/nonexistent/input.agar")
        .output()
        .expect("run agar-lex");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot read /nonexistent/input.agar"));
}
