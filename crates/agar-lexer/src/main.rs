//! `agar-lex [FILE]`: print every token of FILE, or of stdin when no file
//! is given, as `kind @ line:col = "lexeme"`.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use agar_lexer::{Lexer, TerminalKind};

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().lock().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> ExitCode {
    let path = env::args_os().nth(1).map(PathBuf::from);
    let input = match read_input(path.as_ref()) {
        Ok(input) => input,
        Err(err) => {
            let source = path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
            eprintln!("agar-lex: cannot read {}: {}", source, err);
            return ExitCode::FAILURE;
        }
    };

    let mut invalid = 0usize;
    for token in Lexer::new(&input) {
        println!("{} @ {} = {:?}", token.kind, token.span, token.lexeme);
        if token.kind == TerminalKind::Invalid {
            invalid += 1;
        }
    }

    if invalid > 0 {
        eprintln!("agar-lex: {} invalid character(s)", invalid);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
