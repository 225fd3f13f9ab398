//! The LL(1) grammar: productions, FIRST/FOLLOW sets and the prediction table.
//!
//! Productions are stored pre-split as symbol slices. FIRST and FOLLOW are
//! computed by fixed-point iteration when the table is built; the table is
//! a dense array indexed by `(non-terminal, terminal)` discriminants.

use std::fmt;
use std::sync::OnceLock;

use agar_lexer::TerminalKind;

use crate::error::GrammarError;
use crate::symbol::{NonTerminal, Symbol, TerminalSet};

use NonTerminal as N;
use Symbol::NonTerminal as Nt;
use Symbol::Terminal as Tm;
use TerminalKind as T;

/// `lhs -> rhs`; an empty `rhs` derives ε.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: &'static [Symbol],
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " {}", T::Epsilon);
        }
        for symbol in self.rhs {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// Picks the winning right-hand side for one table cell claimed by two
/// productions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub non_terminal: NonTerminal,
    pub lookahead: TerminalKind,
    pub rhs: &'static [Symbol],
}

/// The language's productions with left recursion removed.
#[rustfmt::skip]
pub static PRODUCTIONS: &[Production] = &[
    // Function header
    Production { lhs: N::Function, rhs: &[Nt(N::Type), Tm(T::Identifier), Tm(T::Lt), Nt(N::ArgList), Tm(T::Gt), Nt(N::CompoundStmt)] },
    Production { lhs: N::ArgList, rhs: &[Nt(N::Arg), Nt(N::ArgListRest)] },
    Production { lhs: N::ArgListRest, rhs: &[Tm(T::Comma), Nt(N::Arg), Nt(N::ArgListRest)] },
    Production { lhs: N::ArgListRest, rhs: &[] },
    Production { lhs: N::Arg, rhs: &[Nt(N::Type), Tm(T::Identifier)] },
    // Declarations
    Production { lhs: N::Declaration, rhs: &[Nt(N::Type), Nt(N::IdentList), Tm(T::Semicolon)] },
    Production { lhs: N::Type, rhs: &[Tm(T::Type)] },
    Production { lhs: N::IdentList, rhs: &[Tm(T::Identifier), Nt(N::IdentListRest)] },
    Production { lhs: N::IdentListRest, rhs: &[Tm(T::Comma), Nt(N::IdentList)] },
    Production { lhs: N::IdentListRest, rhs: &[] },
    // Statements
    Production { lhs: N::Stmt, rhs: &[Nt(N::ForStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::LoopStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::Expr), Tm(T::Semicolon)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::IfStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::CompoundStmt)] },
    Production { lhs: N::Stmt, rhs: &[Nt(N::Declaration)] },
    Production { lhs: N::Stmt, rhs: &[Tm(T::Semicolon)] },
    Production { lhs: N::ForStmt, rhs: &[Tm(T::For), Tm(T::Lt), Nt(N::Expr), Tm(T::Semicolon), Nt(N::OptExpr), Tm(T::Semicolon), Nt(N::OptExpr), Tm(T::Gt), Nt(N::Stmt)] },
    Production { lhs: N::OptExpr, rhs: &[Nt(N::Expr)] },
    Production { lhs: N::OptExpr, rhs: &[] },
    Production { lhs: N::LoopStmt, rhs: &[Tm(T::Loop), Tm(T::Lt), Nt(N::Expr), Tm(T::Gt), Nt(N::Stmt)] },
    Production { lhs: N::IfStmt, rhs: &[Tm(T::If), Tm(T::Lt), Nt(N::Expr), Tm(T::Gt), Nt(N::Stmt), Nt(N::MagarPart)] },
    Production { lhs: N::MagarPart, rhs: &[Tm(T::Else), Nt(N::Stmt)] },
    Production { lhs: N::MagarPart, rhs: &[] },
    Production { lhs: N::CompoundStmt, rhs: &[Tm(T::LBrace), Nt(N::StmtList), Tm(T::RBrace)] },
    Production { lhs: N::StmtList, rhs: &[Nt(N::Stmt), Nt(N::StmtList)] },
    Production { lhs: N::StmtList, rhs: &[] },
    // Expressions
    Production { lhs: N::Expr, rhs: &[Nt(N::Rvalue)] },
    Production { lhs: N::Rvalue, rhs: &[Nt(N::Mag), Nt(N::RvalueRest)] },
    Production { lhs: N::RvalueRest, rhs: &[Nt(N::Compare), Nt(N::Mag)] },
    Production { lhs: N::RvalueRest, rhs: &[] },
    Production { lhs: N::Compare, rhs: &[Tm(T::EqEq)] },
    Production { lhs: N::Compare, rhs: &[Tm(T::Lt)] },
    Production { lhs: N::Compare, rhs: &[Tm(T::Gt)] },
    Production { lhs: N::Compare, rhs: &[Tm(T::Le)] },
    Production { lhs: N::Compare, rhs: &[Tm(T::Ge)] },
    Production { lhs: N::Compare, rhs: &[Tm(T::Ne)] },
    Production { lhs: N::Compare, rhs: &[Tm(T::LtGt)] },
    Production { lhs: N::Mag, rhs: &[Nt(N::Term), Nt(N::MagRest)] },
    Production { lhs: N::MagRest, rhs: &[Tm(T::Plus), Nt(N::Term), Nt(N::MagRest)] },
    Production { lhs: N::MagRest, rhs: &[Tm(T::Minus), Nt(N::Term), Nt(N::MagRest)] },
    Production { lhs: N::MagRest, rhs: &[] },
    Production { lhs: N::Term, rhs: &[Nt(N::Factor), Nt(N::TermRest)] },
    Production { lhs: N::TermRest, rhs: &[Tm(T::Star), Nt(N::Factor), Nt(N::TermRest)] },
    Production { lhs: N::TermRest, rhs: &[Tm(T::Slash), Nt(N::Factor), Nt(N::TermRest)] },
    Production { lhs: N::TermRest, rhs: &[] },
    Production { lhs: N::Factor, rhs: &[Tm(T::Lt), Nt(N::Expr), Tm(T::Gt)] },
    Production { lhs: N::Factor, rhs: &[Tm(T::Identifier)] },
    Production { lhs: N::Factor, rhs: &[Tm(T::Number)] },
];

/// The two cells where the grammar is not LL(1).
#[rustfmt::skip]
pub static RESOLUTIONS: &[Resolution] = &[
    // An else binds to the nearest `agar`.
    Resolution { non_terminal: N::MagarPart, lookahead: T::Else, rhs: &[Tm(T::Else), Nt(N::Stmt)] },
    // `>` closes the enclosing `< ... >` group rather than starting a comparison.
    Resolution { non_terminal: N::RvalueRest, lookahead: T::Gt, rhs: &[] },
];

/// Immutable prediction table plus the sets it was derived from.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: NonTerminal,
    productions: &'static [Production],
    first: [TerminalSet; N::COUNT],
    follow: [TerminalSet; N::COUNT],
    table: Vec<Option<usize>>,
}

fn cell(nt: NonTerminal, lookahead: TerminalKind) -> usize {
    nt.index() * T::COUNT + lookahead.index()
}

impl Grammar {
    /// Build the table for the language's grammar, starting at `Function`.
    pub fn standard() -> Result<Self, GrammarError> {
        Self::build(N::Function, PRODUCTIONS, RESOLUTIONS)
    }

    /// The standard grammar, built once per process.
    pub fn shared() -> Result<&'static Grammar, GrammarError> {
        static SHARED: OnceLock<Result<Grammar, GrammarError>> = OnceLock::new();
        SHARED
            .get_or_init(Grammar::standard)
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn build(
        start: NonTerminal,
        productions: &'static [Production],
        resolutions: &[Resolution],
    ) -> Result<Self, GrammarError> {
        if let Some(nt) = N::ALL
            .into_iter()
            .find(|nt| !productions.iter().any(|p| p.lhs == *nt))
        {
            return Err(GrammarError::MissingProduction(nt));
        }

        let first = compute_first(productions);
        let follow = compute_follow(start, productions, &first);

        let mut table = vec![None; N::COUNT * T::COUNT];
        for (index, production) in productions.iter().enumerate() {
            let predict = sequence_first(production.rhs, &first);
            let mut keys = predict.without(T::Epsilon);
            if predict.contains(T::Epsilon) {
                keys.union_with(follow[production.lhs.index()]);
            }

            for lookahead in keys.iter() {
                let slot = &mut table[cell(production.lhs, lookahead)];
                *slot = match *slot {
                    None => Some(index),
                    Some(existing) => Some(resolve(
                        productions,
                        resolutions,
                        production.lhs,
                        lookahead,
                        existing,
                        index,
                    )?),
                };
            }
        }

        let grammar = Grammar {
            start,
            productions,
            first,
            follow,
            table,
        };
        grammar.validate()?;
        Ok(grammar)
    }

    /// Check every row against FIRST, and FOLLOW for nullable rows.
    fn validate(&self) -> Result<(), GrammarError> {
        for nt in N::ALL {
            let mut expected = self.first(nt).without(T::Epsilon);
            if self.is_nullable(nt) {
                expected.union_with(self.follow(nt));
            }
            let keyed: TerminalSet = T::ALL
                .into_iter()
                .filter(|t| self.table[cell(nt, *t)].is_some())
                .collect();
            if keyed != expected {
                return Err(GrammarError::Incomplete {
                    non_terminal: nt,
                    missing: expected.difference(keyed),
                    unexpected: keyed.difference(expected),
                });
            }
        }
        Ok(())
    }

    pub fn start(&self) -> NonTerminal {
        self.start
    }

    pub fn productions(&self) -> &'static [Production] {
        self.productions
    }

    pub fn production(&self, index: usize) -> &Production {
        &self.productions[index]
    }

    /// Index of the production predicted for `(nt, lookahead)`.
    pub fn predict(&self, nt: NonTerminal, lookahead: TerminalKind) -> Option<usize> {
        self.table[cell(nt, lookahead)]
    }

    /// Right-hand side to push for `(nt, lookahead)`, if any.
    pub fn lookup(&self, nt: NonTerminal, lookahead: TerminalKind) -> Option<&'static [Symbol]> {
        self.predict(nt, lookahead).map(|i| self.productions[i].rhs)
    }

    /// FIRST(nt); contains [`TerminalKind::Epsilon`] when `nt` is nullable.
    pub fn first(&self, nt: NonTerminal) -> TerminalSet {
        self.first[nt.index()]
    }

    pub fn follow(&self, nt: NonTerminal) -> TerminalSet {
        self.follow[nt.index()]
    }

    pub fn is_nullable(&self, nt: NonTerminal) -> bool {
        self.first(nt).contains(T::Epsilon)
    }
}

fn resolve(
    productions: &[Production],
    resolutions: &[Resolution],
    nt: NonTerminal,
    lookahead: TerminalKind,
    existing: usize,
    candidate: usize,
) -> Result<usize, GrammarError> {
    let conflict = GrammarError::Conflict {
        non_terminal: nt,
        lookahead,
        first: existing,
        second: candidate,
    };
    let Some(resolution) = resolutions
        .iter()
        .find(|r| r.non_terminal == nt && r.lookahead == lookahead)
    else {
        return Err(conflict);
    };

    if productions[existing].rhs == resolution.rhs {
        Ok(existing)
    } else if productions[candidate].rhs == resolution.rhs {
        Ok(candidate)
    } else {
        Err(conflict)
    }
}

/// FIRST of a symbol sequence; ε is included when the whole sequence is
/// nullable.
fn sequence_first(symbols: &[Symbol], first: &[TerminalSet; N::COUNT]) -> TerminalSet {
    let mut out = TerminalSet::new();
    for symbol in symbols {
        match *symbol {
            Symbol::Terminal(kind) => {
                out.insert(kind);
                return out;
            }
            Symbol::NonTerminal(nt) => {
                let set = first[nt.index()];
                out.union_with(set.without(T::Epsilon));
                if !set.contains(T::Epsilon) {
                    return out;
                }
            }
        }
    }
    out.insert(T::Epsilon);
    out
}

fn compute_first(productions: &[Production]) -> [TerminalSet; N::COUNT] {
    let mut first = [TerminalSet::new(); N::COUNT];
    loop {
        let mut changed = false;
        for production in productions {
            let set = sequence_first(production.rhs, &first);
            changed |= first[production.lhs.index()].union_with(set);
        }
        if !changed {
            return first;
        }
    }
}

fn compute_follow(
    start: NonTerminal,
    productions: &[Production],
    first: &[TerminalSet; N::COUNT],
) -> [TerminalSet; N::COUNT] {
    let mut follow = [TerminalSet::new(); N::COUNT];
    follow[start.index()].insert(T::End);
    loop {
        let mut changed = false;
        for production in productions {
            for (i, symbol) in production.rhs.iter().enumerate() {
                let Symbol::NonTerminal(nt) = *symbol else {
                    continue;
                };
                let rest = sequence_first(&production.rhs[i + 1..], first);
                changed |= follow[nt.index()].union_with(rest.without(T::Epsilon));
                if rest.contains(T::Epsilon) {
                    let inherited = follow[production.lhs.index()];
                    changed |= follow[nt.index()].union_with(inherited);
                }
            }
        }
        if !changed {
            return follow;
        }
    }
}

/// Human-readable dump: productions, then the sets, then the table.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Productions")?;
        for (i, production) in self.productions.iter().enumerate() {
            writeln!(f, "  {:>2}  {}", i, production)?;
        }

        writeln!(f)?;
        writeln!(f, "{:<14} {:<8} {:<40} Follow", "Symbol", "Nullable", "First")?;
        for nt in N::ALL {
            writeln!(
                f,
                "{:<14} {:<8} {:<40} {}",
                nt.name(),
                self.is_nullable(nt),
                self.first(nt).to_string(),
                self.follow(nt)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Table")?;
        for nt in N::ALL {
            for lookahead in T::ALL {
                if let Some(index) = self.predict(nt, lookahead) {
                    writeln!(
                        f,
                        "  [{}, {}] = {}",
                        nt,
                        lookahead,
                        self.productions[index]
                    )?;
                }
            }
        }
        Ok(())
    }
}
