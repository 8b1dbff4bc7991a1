//! Token cursor and shared parser state.

use tarn_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use tarn_ir::{ast::Ident, Span};
use tarn_lexer::{Token, TokenKind};

pub(crate) type PResult<T> = Result<T, Diagnostic>;

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    prev_span: Span,
    pub(crate) diagnostics: DiagnosticBag,
}

static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
};

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            prev_span: Span::DUMMY,
            diagnostics: DiagnosticBag::new(),
        }
    }

    pub(crate) fn current(&self) -> &'t Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    pub(crate) fn peek(&self) -> &'t TokenKind {
        &self.current().kind
    }

    pub(crate) fn peek_nth(&self, n: usize) -> &'t TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(&TokenKind::Eof, |t| &t.kind)
    }

    pub(crate) fn span(&self) -> Span {
        self.current().span
    }

    pub(crate) fn prev_span(&self) -> Span {
        self.prev_span
    }

    /// Span from `start` through the last consumed token.
    pub(crate) fn span_from(&self, start: Span) -> Span {
        start.merge(self.prev_span)
    }

    pub(crate) fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        self.prev_span = token.span;
        token
    }

    pub(crate) fn at(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> PResult<Span> {
        if self.at(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(&format!("`{kind}`")))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> PResult<Ident> {
        if let TokenKind::Ident(name) = self.peek() {
            let span = self.advance().span;
            Ok(Ident::new(name.clone(), span))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    pub(crate) fn unexpected(&self, expected: &str) -> Diagnostic {
        let found = self.peek().describe();
        Diagnostic::error(ErrorCode::E1001)
            .with_message(format!("expected {expected}, found {found}"))
            .with_label(self.span(), format!("expected {expected}"))
    }

    pub(crate) fn skip_newlines(&mut self) {
        while matches!(self.peek(), TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skip blank lines and stray `;` between statements or items.
    pub(crate) fn skip_separators(&mut self) {
        while matches!(self.peek(), TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Require the end of a simple statement: newline, `;`, end of input, or
    /// a closing `}` that belongs to the enclosing block.
    pub(crate) fn end_statement(&mut self) -> PResult<()> {
        match self.peek() {
            TokenKind::Newline | TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof | TokenKind::RBrace => Ok(()),
            _ => Err(self.unexpected("end of statement")),
        }
    }

    /// Skip to the end of the current line, stepping over nested blocks.
    /// Stops before a `}` that would close an enclosing block.
    pub(crate) fn recover_line(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof => return,
                TokenKind::Newline | TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
