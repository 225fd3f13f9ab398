use std::fmt;

/// Lexical category of a token.
///
/// `Epsilon` only ever appears inside grammar tables; the lexer never
/// produces it. `End` doubles as the bottom-of-stack marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TerminalKind {
    // Keywords
    Type,
    For,
    Loop,
    If,
    Else,

    // Literals
    Identifier,
    Number,

    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    Semicolon,
    Comma,

    // Relational operators
    Lt,
    Gt,
    Le,
    Ge,
    EqEq,
    Ne,
    LtGt,

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,

    // Special
    Epsilon,
    End,
    Invalid,
}

impl TerminalKind {
    pub const COUNT: usize = 27;

    /// Every kind, in discriminant order.
    pub const ALL: [TerminalKind; Self::COUNT] = [
        TerminalKind::Type,
        TerminalKind::For,
        TerminalKind::Loop,
        TerminalKind::If,
        TerminalKind::Else,
        TerminalKind::Identifier,
        TerminalKind::Number,
        TerminalKind::LBrace,
        TerminalKind::RBrace,
        TerminalKind::LParen,
        TerminalKind::RParen,
        TerminalKind::Semicolon,
        TerminalKind::Comma,
        TerminalKind::Lt,
        TerminalKind::Gt,
        TerminalKind::Le,
        TerminalKind::Ge,
        TerminalKind::EqEq,
        TerminalKind::Ne,
        TerminalKind::LtGt,
        TerminalKind::Plus,
        TerminalKind::Minus,
        TerminalKind::Star,
        TerminalKind::Slash,
        TerminalKind::Epsilon,
        TerminalKind::End,
        TerminalKind::Invalid,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical name used in traces and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TerminalKind::Type => "type",
            TerminalKind::For => "for",
            TerminalKind::Loop => "loop",
            TerminalKind::If => "agar",
            TerminalKind::Else => "magar",
            TerminalKind::Identifier => "identifier",
            TerminalKind::Number => "number",
            TerminalKind::LBrace => "{",
            TerminalKind::RBrace => "}",
            TerminalKind::LParen => "(",
            TerminalKind::RParen => ")",
            TerminalKind::Semicolon => ";",
            TerminalKind::Comma => ",",
            TerminalKind::Lt => "<",
            TerminalKind::Gt => ">",
            TerminalKind::Le => "<=",
            TerminalKind::Ge => ">=",
            TerminalKind::EqEq => "==",
            TerminalKind::Ne => "!=",
            TerminalKind::LtGt => "<>",
            TerminalKind::Plus => "+",
            TerminalKind::Minus => "-",
            TerminalKind::Star => "*",
            TerminalKind::Slash => "/",
            TerminalKind::Epsilon => "ϵ",
            TerminalKind::End => "$",
            TerminalKind::Invalid => "invalid",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TerminalKind::Type
                | TerminalKind::For
                | TerminalKind::Loop
                | TerminalKind::If
                | TerminalKind::Else
        )
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TerminalKind::Lt
                | TerminalKind::Gt
                | TerminalKind::Le
                | TerminalKind::Ge
                | TerminalKind::EqEq
                | TerminalKind::Ne
                | TerminalKind::LtGt
        )
    }
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of a lexeme in the source buffer.
///
/// `start..end` is a byte range; `line` and `column` are 1-based and count
/// characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Token with a lexeme borrowed from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'input> {
    pub kind: TerminalKind,
    pub lexeme: &'input str,
    pub span: Span,
}

impl<'input> Token<'input> {
    pub fn new(kind: TerminalKind, lexeme: &'input str, span: Span) -> Self {
        Self { kind, lexeme, span }
    }

    pub fn is_end(&self) -> bool {
        self.kind == TerminalKind::End
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TerminalKind::End => f.write_str("end of input"),
            TerminalKind::Invalid => write!(f, "invalid character `{}`", self.lexeme),
            kind => write!(f, "`{}` ({})", self.lexeme, kind),
        }
    }
}
