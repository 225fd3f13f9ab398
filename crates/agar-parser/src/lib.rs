//! LL(1) recognizer for the agar/magar language.
//!
//! [`Grammar`] holds the productions, their FIRST/FOLLOW sets and the
//! prediction table. [`Parser`] drives the table over a token stream with
//! panic-mode recovery; [`Descent`] recognizes the same language by
//! recursive descent and serves as a cross-check.

pub mod descent;
pub mod driver;
pub mod error;
pub mod grammar;
pub mod sink;
pub mod symbol;

pub use descent::Descent;
pub use driver::{ParseSummary, Parser};
pub use error::{Found, GrammarError, ParseError, Result};
pub use grammar::{Grammar, Production, Resolution, PRODUCTIONS, RESOLUTIONS};
pub use sink::{matched_terminals, DiagnosticSink, NullSink, ParseEvent, Recovery, TracingSink};
pub use symbol::{NonTerminal, Symbol, TerminalSet};

pub use agar_lexer::{Keywords, Lexer, Span, TerminalKind, Token, TokenSource};

/// Recognize `input` with the shared grammar table.
pub fn parse(input: &str) -> Result<ParseSummary> {
    parse_with(input, &mut NullSink)
}

/// Recognize `input`, reporting every step to `sink`.
pub fn parse_with<S: DiagnosticSink + ?Sized>(input: &str, sink: &mut S) -> Result<ParseSummary> {
    let grammar = Grammar::shared()?;
    Parser::new(grammar).parse(Lexer::new(input), sink)
}
