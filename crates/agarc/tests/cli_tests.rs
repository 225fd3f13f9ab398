/// Integration tests for the recognizer driver and the `agarc` binary

use std::io::Write;
use std::process::Command;

use agarc::{Backend, CliError, RecognizeOptions, Recognizer};
use agar_parser::{ParseEvent, TerminalKind};
use tempfile::NamedTempFile;

fn source_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(source.as_bytes()).expect("write source");
    file
}

fn recognize(source: &str, backend: Backend) -> agarc::RecognizeOutput {
    let file = source_file(source);
    let options = RecognizeOptions::new(file.path()).backend(backend);
    Recognizer::new(options).run().expect("recognizer run")
}

#[test]
fn test_accepts_file() {
    let output = recognize("int f < int a > { for < a ; a ; a > ; }", Backend::Table);
    assert!(output.is_accepted());
    let transcript = output.transcript(false);
    assert_eq!(transcript.first().map(String::as_str), Some("Matched type"));
    assert_eq!(transcript.last().map(String::as_str), Some("Accepted"));
}

#[test]
fn test_quiet_transcript() {
    let output = recognize("int f < int a > { agar < a > ; magar ; }", Backend::Table);
    assert_eq!(output.transcript(true), vec!["Accepted".to_string()]);
}

#[test]
fn test_rejection_is_not_a_tool_error() {
    let output = recognize("int x < int y { }", Backend::Table);
    assert!(!output.is_accepted());
    let err = output.result.as_ref().unwrap_err();
    assert_eq!(err.expected(), Some(TerminalKind::Gt));
    assert!(matches!(output.events.last(), Some(ParseEvent::Rejected(_))));
    assert!(!output.transcript(false).iter().any(|line| line == "Accepted"));
}

#[test]
fn test_descent_backend() {
    let output = recognize("int f < int a > { { ; } }", Backend::Descent);
    assert_eq!(output.backend, Backend::Descent);
    assert_eq!(output.result.as_ref().map(|s| s.tokens).ok(), Some(11));

    // No recovery in descent mode.
    let output = recognize("int f < int a > { agar < a > magar ; }", Backend::Descent);
    assert!(!output.is_accepted());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("missing.agar");
    let err = Recognizer::new(RecognizeOptions::new(&path)).run().unwrap_err();
    assert!(matches!(err, CliError::FileNotFound(p) if p == path));
}

#[test]
fn test_binary_exit_codes() {
    let accepted = source_file("int main < int argc > { argc ; }");
    let status = Command::new(env!("CARGO_BIN_EXE_agarc"))
        .arg(accepted.path())
        .arg("--quiet")
        .output()
        .expect("run agarc");
    assert!(status.status.success());
    assert_eq!(String::from_utf8_lossy(&status.stdout).trim(), "Accepted");

    let rejected = source_file("int main < int argc { }");
    let status = Command::new(env!("CARGO_BIN_EXE_agarc"))
        .arg(rejected.path())
        .output()
        .expect("run agarc");
    assert_eq!(status.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&status.stderr).contains("Error: expected `>`"));
}

#[test]
fn test_binary_grammar_report() {
    let output = Command::new(env!("CARGO_BIN_EXE_agarc"))
        .arg("--grammar")
        .output()
        .expect("run agarc");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Productions"));
    assert!(stdout.contains("Table"));
}

#[test]
fn test_follow_recovery_rejects_file() {
    let output = recognize("int f < > { }", Backend::Table);
    assert!(!output.is_accepted());
    assert!(output.events.iter().any(|event| matches!(event, ParseEvent::Recovered { .. })));
    assert!(!output.transcript(true).iter().any(|line| line == "Accepted"));
}

#[test]
fn test_binary_rejects_empty_file() {
    let empty = source_file("");
    let output = Command::new(env!("CARGO_BIN_EXE_agarc"))
        .arg(empty.path())
        .output()
        .expect("run agarc");
    assert_eq!(output.status.code(), Some(1));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Accepted"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: missing Function"));
}

#[test]
fn test_binary_verbose_logs_each_event_once() {
    let file = source_file("int f < int a > { agar < a > magar ; }");
    let output = Command::new(env!("CARGO_BIN_EXE_agarc"))
        .arg(file.path())
        .args(["--quiet", "--verbose"])
        .env_remove("RUST_LOG")
        .output()
        .expect("run agarc");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Recovered Stmt").count(), 1, "{}", stderr);
    assert_eq!(stderr.matches("input rejected").count(), 1, "{}", stderr);
    assert_eq!(stderr.matches("Error: missing Stmt").count(), 1, "{}", stderr);
}
