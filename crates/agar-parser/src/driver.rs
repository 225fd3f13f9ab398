//! Stack automaton driving the prediction table.

use agar_lexer::{TerminalKind, Token, TokenSource};

use crate::error::{Found, ParseError};
use crate::grammar::Grammar;
use crate::sink::{DiagnosticSink, ParseEvent, Recovery};
use crate::symbol::{NonTerminal, Symbol};

/// Counters for an accepted parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Terminals matched, end-of-input excluded.
    pub tokens: usize,
    pub expansions: usize,
    /// Nullable non-terminals discharged through their empty default.
    pub recoveries: usize,
}

impl ParseSummary {
    pub fn is_clean(&self) -> bool {
        self.recoveries == 0
    }
}

/// Table-driven predictive parser.
///
/// The stack starts as `[$, start]`. Terminals on top of the stack are
/// matched by kind against the held lookahead; non-terminals are replaced
/// by the right-hand side the table predicts. A non-terminal with no entry
/// is dropped when the lookahead is in its FOLLOW set or when it derives ε;
/// anything else ends the parse. Dropping through FOLLOW keeps the parse
/// going so later errors still surface, but the input is rejected.
pub struct Parser<'g> {
    grammar: &'g Grammar,
}

impl<'g> Parser<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Run the automaton to completion. The verdict is returned and also
    /// reported to `sink` as the final event.
    ///
    /// A run that reaches `$` only after discarding a required non-terminal
    /// through its FOLLOW set is rejected with [`ParseError::Recovered`].
    pub fn parse<'i, L, S>(&self, mut tokens: L, sink: &mut S) -> Result<ParseSummary, ParseError>
    where
        L: TokenSource<'i>,
        S: DiagnosticSink + ?Sized,
    {
        let result = self.run(&mut tokens, sink);
        match &result {
            Ok(_) => sink.report(&ParseEvent::Accepted),
            Err(err) => sink.report(&ParseEvent::Rejected(err.clone())),
        }
        result
    }

    fn run<'i, L, S>(&self, tokens: &mut L, sink: &mut S) -> Result<ParseSummary, ParseError>
    where
        L: TokenSource<'i>,
        S: DiagnosticSink + ?Sized,
    {
        let mut stack = vec![
            Symbol::Terminal(TerminalKind::End),
            Symbol::NonTerminal(self.grammar.start()),
        ];
        let mut lookahead = tokens.next_token();
        let mut summary = ParseSummary::default();
        let mut discarded: Option<(NonTerminal, Found)> = None;

        while let Some(top) = stack.pop() {
            match top {
                Symbol::Terminal(TerminalKind::End) if lookahead.is_end() => break,
                Symbol::Terminal(expected) => {
                    if expected != lookahead.kind {
                        return Err(ParseError::Mismatch {
                            expected,
                            found: Found::from(&lookahead),
                        });
                    }
                    sink.report(&ParseEvent::Matched {
                        terminal: expected,
                        lexeme: lookahead.lexeme.to_string(),
                        span: lookahead.span,
                    });
                    summary.tokens += 1;
                    lookahead = tokens.next_token();
                }
                Symbol::NonTerminal(nt) => match self.grammar.predict(nt, lookahead.kind) {
                    Some(index) => {
                        let rhs = self.grammar.production(index).rhs;
                        sink.report(&ParseEvent::Expanded {
                            non_terminal: nt,
                            lookahead: lookahead.kind,
                            production: index,
                        });
                        summary.expansions += 1;
                        stack.extend(rhs.iter().rev().copied());
                    }
                    None => {
                        let recovery = self.recover(nt, &lookahead)?;
                        let found = Found::from(&lookahead);
                        if recovery == Recovery::Follow && discarded.is_none() {
                            discarded = Some((nt, found.clone()));
                        }
                        sink.report(&ParseEvent::Recovered {
                            non_terminal: nt,
                            found,
                            recovery,
                        });
                        summary.recoveries += 1;
                    }
                },
            }
        }

        match discarded {
            Some((non_terminal, found)) => Err(ParseError::Recovered {
                non_terminal,
                found,
            }),
            None => Ok(summary),
        }
    }

    /// Decide whether `nt` may be dropped in front of `lookahead`.
    fn recover(&self, nt: NonTerminal, lookahead: &Token<'_>) -> Result<Recovery, ParseError> {
        if self.grammar.follow(nt).contains(lookahead.kind) {
            Ok(Recovery::Follow)
        } else if self.grammar.is_nullable(nt) {
            Ok(Recovery::Nullable)
        } else {
            Err(ParseError::Unrecoverable {
                non_terminal: nt,
                found: Found::from(lookahead),
            })
        }
    }
}
