/// Error types for the agarc driver

use std::path::PathBuf;

use agar_parser::GrammarError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Failures of the tool itself. A rejected input is not one of these; it
/// is part of a successful [`RecognizeOutput`](crate::RecognizeOutput).
#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),
}
