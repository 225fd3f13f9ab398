//! Grammar symbols: non-terminals, the stack alphabet and terminal sets.

use std::fmt;

use agar_lexer::TerminalKind;

/// Non-terminals of the grammar.
///
/// The `*Rest` variants are the tails introduced when left recursion is
/// removed from `ArgList`, `IdentList`, `Rvalue`, `Mag` and `Term`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NonTerminal {
    Function,
    ArgList,
    ArgListRest,
    Arg,
    Declaration,
    Type,
    IdentList,
    IdentListRest,
    Stmt,
    ForStmt,
    OptExpr,
    LoopStmt,
    IfStmt,
    MagarPart,
    CompoundStmt,
    StmtList,
    Expr,
    Rvalue,
    RvalueRest,
    Compare,
    Mag,
    MagRest,
    Term,
    TermRest,
    Factor,
}

impl NonTerminal {
    pub const COUNT: usize = 25;

    pub const ALL: [NonTerminal; Self::COUNT] = [
        NonTerminal::Function,
        NonTerminal::ArgList,
        NonTerminal::ArgListRest,
        NonTerminal::Arg,
        NonTerminal::Declaration,
        NonTerminal::Type,
        NonTerminal::IdentList,
        NonTerminal::IdentListRest,
        NonTerminal::Stmt,
        NonTerminal::ForStmt,
        NonTerminal::OptExpr,
        NonTerminal::LoopStmt,
        NonTerminal::IfStmt,
        NonTerminal::MagarPart,
        NonTerminal::CompoundStmt,
        NonTerminal::StmtList,
        NonTerminal::Expr,
        NonTerminal::Rvalue,
        NonTerminal::RvalueRest,
        NonTerminal::Compare,
        NonTerminal::Mag,
        NonTerminal::MagRest,
        NonTerminal::Term,
        NonTerminal::TermRest,
        NonTerminal::Factor,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            NonTerminal::Function => "Function",
            NonTerminal::ArgList => "ArgList",
            NonTerminal::ArgListRest => "ArgListRest",
            NonTerminal::Arg => "Arg",
            NonTerminal::Declaration => "Declaration",
            NonTerminal::Type => "Type",
            NonTerminal::IdentList => "IdentList",
            NonTerminal::IdentListRest => "IdentListRest",
            NonTerminal::Stmt => "Stmt",
            NonTerminal::ForStmt => "ForStmt",
            NonTerminal::OptExpr => "OptExpr",
            NonTerminal::LoopStmt => "LoopStmt",
            NonTerminal::IfStmt => "IfStmt",
            NonTerminal::MagarPart => "MagarPart",
            NonTerminal::CompoundStmt => "CompoundStmt",
            NonTerminal::StmtList => "StmtList",
            NonTerminal::Expr => "Expr",
            NonTerminal::Rvalue => "Rvalue",
            NonTerminal::RvalueRest => "RvalueRest",
            NonTerminal::Compare => "Compare",
            NonTerminal::Mag => "Mag",
            NonTerminal::MagRest => "MagRest",
            NonTerminal::Term => "Term",
            NonTerminal::TermRest => "TermRest",
            NonTerminal::Factor => "Factor",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of the parse stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(TerminalKind),
    NonTerminal(NonTerminal),
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(kind) => fmt::Display::fmt(kind, f),
            Symbol::NonTerminal(nt) => fmt::Display::fmt(nt, f),
        }
    }
}

/// Bit set of terminal kinds, indexed by discriminant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TerminalSet(u32);

const _: () = assert!(TerminalKind::COUNT <= u32::BITS as usize);

impl TerminalSet {
    pub const fn new() -> Self {
        TerminalSet(0)
    }

    /// Returns true if `kind` was not already present.
    pub fn insert(&mut self, kind: TerminalKind) -> bool {
        let bit = 1 << kind.index();
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn remove(&mut self, kind: TerminalKind) {
        self.0 &= !(1 << kind.index());
    }

    pub fn contains(&self, kind: TerminalKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    /// Returns true if the set grew.
    pub fn union_with(&mut self, other: TerminalSet) -> bool {
        let before = self.0;
        self.0 |= other.0;
        self.0 != before
    }

    pub fn union(self, other: TerminalSet) -> TerminalSet {
        TerminalSet(self.0 | other.0)
    }

    pub fn difference(self, other: TerminalSet) -> TerminalSet {
        TerminalSet(self.0 & !other.0)
    }

    pub fn without(self, kind: TerminalKind) -> TerminalSet {
        let mut set = self;
        set.remove(kind);
        set
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = TerminalKind> {
        TerminalKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<TerminalKind> for TerminalSet {
    fn from_iter<I: IntoIterator<Item = TerminalKind>>(iter: I) -> Self {
        let mut set = TerminalSet::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Display for TerminalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", kind)?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for TerminalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
