use std::collections::HashMap;

use crate::token::TerminalKind;

/// Reserved words recognized by a [`Lexer`](crate::Lexer).
///
/// Each lexer owns its own table. Words absent from the table lex as
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    table: HashMap<String, TerminalKind>,
}

impl Keywords {
    /// A table with no reserved words at all.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// The language's reserved words: `int`, `float`, `for`, `loop`,
    /// `agar` and `magar`.
    pub fn standard() -> Self {
        Self::empty()
            .with("int", TerminalKind::Type)
            .with("float", TerminalKind::Type)
            .with("for", TerminalKind::For)
            .with("loop", TerminalKind::Loop)
            .with("agar", TerminalKind::If)
            .with("magar", TerminalKind::Else)
    }

    pub fn with(mut self, word: impl Into<String>, kind: TerminalKind) -> Self {
        self.table.insert(word.into(), kind);
        self
    }

    pub fn without(mut self, word: &str) -> Self {
        self.table.remove(word);
        self
    }

    pub fn get(&self, word: &str) -> Option<TerminalKind> {
        self.table.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::standard()
    }
}
