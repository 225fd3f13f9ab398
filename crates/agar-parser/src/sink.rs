//! Parse events and the sinks that receive them.

use std::fmt;
use std::sync::mpsc::Sender;

use agar_lexer::{Span, TerminalKind};

use crate::error::{Found, ParseError};
use crate::symbol::NonTerminal;

/// How a non-terminal without a table entry was discharged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The lookahead is in FOLLOW of the non-terminal.
    Follow,
    /// The non-terminal derives ε; its empty production served as default.
    Nullable,
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovery::Follow => f.write_str("follow set"),
            Recovery::Nullable => f.write_str("empty default"),
        }
    }
}

/// One step of a parse, as seen from outside the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    Matched {
        terminal: TerminalKind,
        lexeme: String,
        span: Span,
    },
    Expanded {
        non_terminal: NonTerminal,
        lookahead: TerminalKind,
        production: usize,
    },
    Recovered {
        non_terminal: NonTerminal,
        found: Found,
        recovery: Recovery,
    },
    Accepted,
    Rejected(ParseError),
}

impl fmt::Display for ParseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseEvent::Matched { terminal, .. } => write!(f, "Matched {}", terminal),
            ParseEvent::Expanded {
                non_terminal,
                lookahead,
                production,
            } => write!(f, "Expanded {} on {} (production {})", non_terminal, lookahead, production),
            ParseEvent::Recovered {
                non_terminal,
                found,
                recovery,
            } => write!(f, "Recovered {} at {} ({})", non_terminal, found, recovery),
            ParseEvent::Accepted => f.write_str("Accepted"),
            ParseEvent::Rejected(err) => write!(f, "Error: {}", err),
        }
    }
}

/// Receiver for parse events. The last event of every parse is either
/// [`ParseEvent::Accepted`] or [`ParseEvent::Rejected`].
pub trait DiagnosticSink {
    fn report(&mut self, event: &ParseEvent);
}

/// Collects every event.
impl DiagnosticSink for Vec<ParseEvent> {
    fn report(&mut self, event: &ParseEvent) {
        self.push(event.clone());
    }
}

/// Forwards events to another thread; a hung-up receiver is ignored.
impl DiagnosticSink for Sender<ParseEvent> {
    fn report(&mut self, event: &ParseEvent) {
        let _ = self.send(event.clone());
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, event: &ParseEvent) {
        (**self).report(event)
    }
}

/// Reports every event to both sinks, left first.
impl<A: DiagnosticSink, B: DiagnosticSink> DiagnosticSink for (A, B) {
    fn report(&mut self, event: &ParseEvent) {
        self.0.report(event);
        self.1.report(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _event: &ParseEvent) {}
}

/// Logs events through `tracing`: matches and expansions at `trace`,
/// recoveries at `debug`, the verdict at `info` or `warn`. The parsers do
/// not log on their own; pair this with a collecting sink to get both.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, event: &ParseEvent) {
        match event {
            ParseEvent::Matched { .. } | ParseEvent::Expanded { .. } => {
                tracing::trace!("{}", event)
            }
            ParseEvent::Recovered { .. } => tracing::debug!("{}", event),
            ParseEvent::Accepted => tracing::info!("input accepted"),
            ParseEvent::Rejected(err) => tracing::warn!(%err, "input rejected"),
        }
    }
}

/// Terminals matched during a parse, in order.
pub fn matched_terminals(events: &[ParseEvent]) -> Vec<TerminalKind> {
    events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::Matched { terminal, .. } => Some(*terminal),
            _ => None,
        })
        .collect()
}
