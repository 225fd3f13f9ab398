/// agar/magar recognizer driver
///
/// Reads a source file and runs it through the table-driven parser or the
/// recursive-descent recognizer, collecting every parse event.

pub mod driver;
pub mod error;

pub use driver::{Backend, RecognizeOptions, RecognizeOutput, Recognizer};
pub use error::{CliError, Result};
