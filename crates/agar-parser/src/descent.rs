//! Recursive-descent recognizer for the same grammar.
//!
//! One procedure per non-terminal, no recovery: the first error ends the
//! run. It shares the lexer, the FIRST sets and the error type with the
//! table-driven [`Parser`](crate::Parser). Both reach the same verdict on
//! every input; where the table parser needs no FOLLOW-set recovery they
//! also report the same matches and the same error.

use agar_lexer::{TerminalKind, Token, TokenSource};

use crate::error::{Found, ParseError};
use crate::grammar::Grammar;
use crate::sink::{DiagnosticSink, ParseEvent};
use crate::symbol::NonTerminal;

use NonTerminal as N;
use TerminalKind as T;

pub struct Descent<'g> {
    grammar: &'g Grammar,
}

impl<'g> Descent<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Recognize one `Function` followed by end of input. Returns the
    /// number of matched terminals.
    pub fn recognize<'i, L, S>(&self, mut tokens: L, sink: &mut S) -> Result<usize, ParseError>
    where
        L: TokenSource<'i>,
        S: DiagnosticSink + ?Sized,
    {
        let lookahead = tokens.next_token();
        let mut state = State {
            grammar: self.grammar,
            tokens,
            lookahead,
            matched: 0,
            sink: &mut *sink,
        };
        let result = state
            .function()
            .and_then(|()| state.expect(T::End))
            .map(|()| state.matched);

        match &result {
            Ok(_) => sink.report(&ParseEvent::Accepted),
            Err(err) => sink.report(&ParseEvent::Rejected(err.clone())),
        }
        result
    }
}

struct State<'a, 'i, L, S: ?Sized> {
    grammar: &'a Grammar,
    tokens: L,
    lookahead: Token<'i>,
    matched: usize,
    sink: &'a mut S,
}

type Step = Result<(), ParseError>;

impl<'i, L, S> State<'_, 'i, L, S>
where
    L: TokenSource<'i>,
    S: DiagnosticSink + ?Sized,
{
    fn peek(&self) -> TerminalKind {
        self.lookahead.kind
    }

    fn expect(&mut self, kind: TerminalKind) -> Step {
        if self.lookahead.kind != kind {
            return Err(ParseError::Mismatch {
                expected: kind,
                found: Found::from(&self.lookahead),
            });
        }
        if kind != T::End {
            self.sink.report(&ParseEvent::Matched {
                terminal: kind,
                lexeme: self.lookahead.lexeme.to_string(),
                span: self.lookahead.span,
            });
            self.matched += 1;
            self.lookahead = self.tokens.next_token();
        }
        Ok(())
    }

    /// Fail unless the lookahead can start `nt`.
    fn enter(&self, nt: NonTerminal) -> Step {
        if self.grammar.first(nt).contains(self.peek()) {
            Ok(())
        } else {
            Err(ParseError::Unrecoverable {
                non_terminal: nt,
                found: Found::from(&self.lookahead),
            })
        }
    }

    fn starts(&self, nt: NonTerminal) -> bool {
        self.grammar.first(nt).contains(self.peek())
    }

    fn function(&mut self) -> Step {
        self.enter(N::Function)?;
        self.type_()?;
        self.expect(T::Identifier)?;
        self.expect(T::Lt)?;
        self.arg_list()?;
        self.expect(T::Gt)?;
        self.compound_stmt()
    }

    fn arg_list(&mut self) -> Step {
        self.enter(N::ArgList)?;
        self.arg()?;
        while self.peek() == T::Comma {
            self.expect(T::Comma)?;
            self.arg()?;
        }
        Ok(())
    }

    fn arg(&mut self) -> Step {
        self.enter(N::Arg)?;
        self.type_()?;
        self.expect(T::Identifier)
    }

    fn declaration(&mut self) -> Step {
        self.enter(N::Declaration)?;
        self.type_()?;
        self.ident_list()?;
        self.expect(T::Semicolon)
    }

    fn type_(&mut self) -> Step {
        self.enter(N::Type)?;
        self.expect(T::Type)
    }

    fn ident_list(&mut self) -> Step {
        self.enter(N::IdentList)?;
        self.expect(T::Identifier)?;
        if self.peek() == T::Comma {
            self.expect(T::Comma)?;
            self.ident_list()?;
        }
        Ok(())
    }

    fn stmt(&mut self) -> Step {
        match self.peek() {
            T::For => self.for_stmt(),
            T::Loop => self.loop_stmt(),
            T::If => self.if_stmt(),
            T::LBrace => self.compound_stmt(),
            T::Type => self.declaration(),
            T::Semicolon => self.expect(T::Semicolon),
            T::Lt | T::Identifier | T::Number => {
                self.expr()?;
                self.expect(T::Semicolon)
            }
            _ => self.enter(N::Stmt),
        }
    }

    fn for_stmt(&mut self) -> Step {
        self.enter(N::ForStmt)?;
        self.expect(T::For)?;
        self.expect(T::Lt)?;
        self.expr()?;
        self.expect(T::Semicolon)?;
        self.opt_expr()?;
        self.expect(T::Semicolon)?;
        self.opt_expr()?;
        self.expect(T::Gt)?;
        self.stmt()
    }

    fn opt_expr(&mut self) -> Step {
        if self.starts(N::Expr) {
            self.expr()?;
        }
        Ok(())
    }

    fn loop_stmt(&mut self) -> Step {
        self.enter(N::LoopStmt)?;
        self.expect(T::Loop)?;
        self.expect(T::Lt)?;
        self.expr()?;
        self.expect(T::Gt)?;
        self.stmt()
    }

    fn if_stmt(&mut self) -> Step {
        self.enter(N::IfStmt)?;
        self.expect(T::If)?;
        self.expect(T::Lt)?;
        self.expr()?;
        self.expect(T::Gt)?;
        self.stmt()?;
        // A `magar` always binds to the innermost `agar`.
        if self.peek() == T::Else {
            self.expect(T::Else)?;
            self.stmt()?;
        }
        Ok(())
    }

    fn compound_stmt(&mut self) -> Step {
        self.enter(N::CompoundStmt)?;
        self.expect(T::LBrace)?;
        while self.starts(N::Stmt) {
            self.stmt()?;
        }
        self.expect(T::RBrace)
    }

    fn expr(&mut self) -> Step {
        self.enter(N::Expr)?;
        self.rvalue()
    }

    fn rvalue(&mut self) -> Step {
        self.enter(N::Rvalue)?;
        self.mag()?;
        // `>` is left for the enclosing group to close.
        if self.peek().is_relational() && self.peek() != T::Gt {
            self.compare()?;
            self.mag()?;
        }
        Ok(())
    }

    fn compare(&mut self) -> Step {
        self.enter(N::Compare)?;
        let kind = self.peek();
        self.expect(kind)
    }

    fn mag(&mut self) -> Step {
        self.enter(N::Mag)?;
        self.term()?;
        while matches!(self.peek(), T::Plus | T::Minus) {
            let kind = self.peek();
            self.expect(kind)?;
            self.term()?;
        }
        Ok(())
    }

    fn term(&mut self) -> Step {
        self.enter(N::Term)?;
        self.factor()?;
        while matches!(self.peek(), T::Star | T::Slash) {
            let kind = self.peek();
            self.expect(kind)?;
            self.factor()?;
        }
        Ok(())
    }

    fn factor(&mut self) -> Step {
        self.enter(N::Factor)?;
        if self.peek() == T::Lt {
            self.expect(T::Lt)?;
            self.expr()?;
            self.expect(T::Gt)
        } else {
            let kind = self.peek();
            self.expect(kind)
        }
    }
}
