//! Scanner for the agar/magar language.
//!
//! [`Lexer::next_token`] hands out one classified token per call and keeps
//! returning [`TerminalKind::End`] once the buffer is exhausted. Characters
//! the language has no use for come back as [`TerminalKind::Invalid`]
//! tokens; deciding whether that is fatal is left to the parser.

mod keywords;
mod token;

pub use keywords::Keywords;
pub use token::{Span, TerminalKind, Token};

/// Anything that can feed tokens to a parser.
///
/// Implementations must keep returning an end-of-input token once their
/// input is exhausted.
pub trait TokenSource<'input> {
    fn next_token(&mut self) -> Token<'input>;
}

/// Forward-only scanner over an in-memory buffer
pub struct Lexer<'input> {
    input: &'input str,
    keywords: Keywords,
    pos: usize,
    line: usize,
    column: usize,
    /// Set once the iterator has yielded the end-of-input token.
    fused: bool,
}

impl<'input> Lexer<'input> {
    pub fn new(input: &'input str) -> Self {
        Self::with_keywords(input, Keywords::standard())
    }

    pub fn with_keywords(input: &'input str, keywords: Keywords) -> Self {
        Self {
            input,
            keywords,
            pos: 0,
            line: 1,
            column: 1,
            fused: false,
        }
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Token<'input> {
        self.skip_whitespace();

        let start = self.pos;
        let (line, column) = (self.line, self.column);

        let Some(c) = self.peek() else {
            return self.token(TerminalKind::End, start, line, column);
        };

        let kind = if c.is_ascii_alphabetic() {
            self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
            let word = &self.input[start..self.pos];
            self.keywords.get(word).unwrap_or(TerminalKind::Identifier)
        } else if c.is_ascii_digit() {
            self.eat_while(|c| c.is_ascii_digit());
            TerminalKind::Number
        } else {
            self.bump();
            match c {
                '+' => TerminalKind::Plus,
                '-' => TerminalKind::Minus,
                '*' => TerminalKind::Star,
                '/' => TerminalKind::Slash,
                '{' => TerminalKind::LBrace,
                '}' => TerminalKind::RBrace,
                '(' => TerminalKind::LParen,
                ')' => TerminalKind::RParen,
                ';' => TerminalKind::Semicolon,
                ',' => TerminalKind::Comma,
                '<' => self.followed_by_eq(TerminalKind::Le, TerminalKind::Lt),
                '>' => self.followed_by_eq(TerminalKind::Ge, TerminalKind::Gt),
                // No assignment token: a lone `=` or `!` is not part of the language.
                '=' => self.followed_by_eq(TerminalKind::EqEq, TerminalKind::Invalid),
                '!' => self.followed_by_eq(TerminalKind::Ne, TerminalKind::Invalid),
                _ => TerminalKind::Invalid,
            }
        };

        let token = self.token(kind, start, line, column);
        if kind == TerminalKind::Invalid {
            tracing::debug!(line, column, lexeme = token.lexeme, "unexpected character");
        }
        token
    }

    fn token(&self, kind: TerminalKind, start: usize, line: usize, column: usize) -> Token<'input> {
        let span = Span {
            start,
            end: self.pos,
            line,
            column,
        };
        Token::new(kind, &self.input[start..self.pos], span)
    }

    /// Consume a trailing `=` if there is one and pick the matching kind.
    fn followed_by_eq(&mut self, with_eq: TerminalKind, alone: TerminalKind) -> TerminalKind {
        if self.peek() == Some('=') {
            self.bump();
            with_eq
        } else {
            alone
        }
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| c.is_ascii_whitespace());
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }
}

impl<'input> TokenSource<'input> for Lexer<'input> {
    fn next_token(&mut self) -> Token<'input> {
        Lexer::next_token(self)
    }
}

/// Yields every token up to and including the first end-of-input token.
impl<'input> Iterator for Lexer<'input> {
    type Item = Token<'input>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        let token = self.next_token();
        self.fused = token.is_end();
        Some(token)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Scan a whole string, end-of-input token included
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
