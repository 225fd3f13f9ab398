//! Error types for grammar construction and recognition.

use std::fmt;

use agar_lexer::{Span, TerminalKind, Token};
use thiserror::Error;

use crate::symbol::{NonTerminal, TerminalSet};

pub type Result<T> = std::result::Result<T, ParseError>;

/// Raised while building a [`Grammar`](crate::Grammar) table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("non-terminal {0} has no production")]
    MissingProduction(NonTerminal),

    #[error("LL(1) conflict for {non_terminal} on `{lookahead}` between productions {first} and {second}")]
    Conflict {
        non_terminal: NonTerminal,
        lookahead: TerminalKind,
        first: usize,
        second: usize,
    },

    #[error("table row for {non_terminal} is inconsistent with FIRST/FOLLOW: missing {missing}, unexpected {unexpected}")]
    Incomplete {
        non_terminal: NonTerminal,
        missing: TerminalSet,
        unexpected: TerminalSet,
    },
}

/// The token the parser was looking at when it gave up or recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    pub kind: TerminalKind,
    pub lexeme: String,
    pub span: Span,
}

impl From<&Token<'_>> for Found {
    fn from(token: &Token<'_>) -> Self {
        Found {
            kind: token.kind,
            lexeme: token.lexeme.to_string(),
            span: token.span,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TerminalKind::End => write!(f, "end of input at {}", self.span),
            TerminalKind::Invalid => {
                write!(f, "invalid character `{}` at {}", self.lexeme, self.span)
            }
            kind => write!(f, "`{}` ({}) at {}", self.lexeme, kind, self.span),
        }
    }
}

/// Why an input was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected `{expected}` but found {found}")]
    Mismatch { expected: TerminalKind, found: Found },

    #[error("unexpected {found} while parsing {non_terminal}")]
    Unrecoverable {
        non_terminal: NonTerminal,
        found: Found,
    },

    /// The parse reached the end, but only by discarding a required
    /// non-terminal through its FOLLOW set. Carries the first such discard.
    #[error("missing {non_terminal} before {found}")]
    Recovered {
        non_terminal: NonTerminal,
        found: Found,
    },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

impl ParseError {
    pub fn found(&self) -> Option<&Found> {
        match self {
            ParseError::Mismatch { found, .. }
            | ParseError::Unrecoverable { found, .. }
            | ParseError::Recovered { found, .. } => Some(found),
            ParseError::Grammar(_) => None,
        }
    }

    /// The terminal the parser wanted, for mismatches.
    pub fn expected(&self) -> Option<TerminalKind> {
        match self {
            ParseError::Mismatch { expected, .. } => Some(*expected),
            _ => None,
        }
    }

    pub fn non_terminal(&self) -> Option<NonTerminal> {
        match self {
            ParseError::Unrecoverable { non_terminal, .. }
            | ParseError::Recovered { non_terminal, .. } => Some(*non_terminal),
            _ => None,
        }
    }

    /// True when the offending token came from an unrecognized character.
    pub fn is_lexical(&self) -> bool {
        self.found()
            .is_some_and(|found| found.kind == TerminalKind::Invalid)
    }
}
