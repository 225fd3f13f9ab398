/// Recognizer driver: source file in, parse events and verdict out

use std::fmt;
use std::path::PathBuf;

use agar_lexer::Lexer;
use agar_parser::{
    DiagnosticSink, Descent, Grammar, ParseError, ParseEvent, ParseSummary, Parser, TracingSink,
};

use crate::error::{CliError, Result};

/// Which recognizer runs over the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Table-driven parser with panic-mode recovery
    #[default]
    Table,
    /// Recursive descent, stops at the first error
    Descent,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Table => f.write_str("table"),
            Backend::Descent => f.write_str("descent"),
        }
    }
}

/// Options for a recognizer run
#[derive(Debug, Clone)]
pub struct RecognizeOptions {
    /// Input source file
    pub input: PathBuf,
    /// Suppress per-token `Matched` lines
    pub quiet: bool,
    /// Also log every parse event through `tracing`
    pub verbose: bool,
    pub backend: Backend,
}

impl RecognizeOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            quiet: false,
            verbose: false,
            backend: Backend::Table,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}

/// Result of recognizing one file
#[derive(Debug)]
pub struct RecognizeOutput {
    pub source_file: PathBuf,
    pub backend: Backend,
    /// Every event reported during the run, verdict last
    pub events: Vec<ParseEvent>,
    /// The descent backend only fills in `tokens`.
    pub result: std::result::Result<ParseSummary, ParseError>,
}

impl RecognizeOutput {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }

    /// Lines for standard output: one `Matched` line per terminal unless
    /// `quiet`, then `Accepted` for an accepted input.
    pub fn transcript(&self, quiet: bool) -> Vec<String> {
        self.events
            .iter()
            .filter(|event| match event {
                ParseEvent::Matched { .. } => !quiet,
                ParseEvent::Accepted => true,
                _ => false,
            })
            .map(ToString::to_string)
            .collect()
    }
}

/// The agar/magar recognizer
pub struct Recognizer {
    options: RecognizeOptions,
}

impl Recognizer {
    pub fn new(options: RecognizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RecognizeOptions {
        &self.options
    }

    /// Read the input file and recognize it. Only tool failures are
    /// errors; a rejected input is reported in the output.
    pub fn run(&self) -> Result<RecognizeOutput> {
        let source = self.read_source()?;
        let grammar = Grammar::shared()?;

        tracing::debug!(
            file = %self.options.input.display(),
            backend = %self.options.backend,
            bytes = source.len(),
            "recognizing"
        );

        let mut events = Vec::new();
        let result = if self.options.verbose {
            self.recognize(grammar, &source, &mut (&mut events, TracingSink))
        } else {
            self.recognize(grammar, &source, &mut events)
        };

        Ok(RecognizeOutput {
            source_file: self.options.input.clone(),
            backend: self.options.backend,
            events,
            result,
        })
    }

    fn recognize<S: DiagnosticSink>(
        &self,
        grammar: &Grammar,
        source: &str,
        sink: &mut S,
    ) -> std::result::Result<ParseSummary, ParseError> {
        let lexer = Lexer::new(source);
        match self.options.backend {
            Backend::Table => Parser::new(grammar).parse(lexer, sink),
            Backend::Descent => Descent::new(grammar)
                .recognize(lexer, sink)
                .map(|tokens| ParseSummary {
                    tokens,
                    ..ParseSummary::default()
                }),
        }
    }

    /// FIRST/FOLLOW sets and the prediction table, as text.
    pub fn grammar_report() -> Result<String> {
        Ok(Grammar::shared()?.to_string())
    }

    fn read_source(&self) -> Result<String> {
        let path = &self.options.input;
        if !path.exists() {
            return Err(CliError::FileNotFound(path.clone()));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}
