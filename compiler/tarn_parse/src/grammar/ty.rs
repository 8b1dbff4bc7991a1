//! Type expressions.

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::ast::TypeExpr;
use tarn_lexer::TokenKind;

use crate::cursor::{PResult, Parser};

impl Parser<'_> {
    /// `atom ('|' atom)*`
    pub(crate) fn type_expr(&mut self) -> PResult<TypeExpr> {
        let first = self.type_atom()?;
        if !self.at(&TokenKind::Pipe) {
            return Ok(first);
        }
        let start = first.span();
        let mut options = vec![first];
        while self.eat(&TokenKind::Pipe) {
            options.push(self.type_atom()?);
        }
        Ok(TypeExpr::Union(options, self.span_from(start)))
    }

    /// A single type with any number of `?` suffixes.
    fn type_atom(&mut self) -> PResult<TypeExpr> {
        let start = self.span();
        let mut ty = match self.peek() {
            TokenKind::This => {
                self.advance();
                TypeExpr::SelfType(start)
            }
            TokenKind::LParen => self.function_type()?,
            TokenKind::Ident(_) => {
                let name = self.expect_ident()?;
                let mut args = Vec::new();
                if self.eat(&TokenKind::Lt) {
                    loop {
                        args.push(self.type_expr()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(&TokenKind::Gt)?;
                }
                TypeExpr::Named {
                    name,
                    args,
                    span: self.span_from(start),
                }
            }
            _ => {
                return Err(Diagnostic::error(ErrorCode::E1003)
                    .with_message(format!("expected type, found {}", self.peek().describe()))
                    .with_label(start, "expected a type here"))
            }
        };
        while self.eat(&TokenKind::Question) {
            ty = TypeExpr::Optional(Box::new(ty), self.span_from(start));
        }
        Ok(ty)
    }

    /// `(T name, U) => R`; parameter names are optional and ignored.
    fn function_type(&mut self) -> PResult<TypeExpr> {
        let start = self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        self.skip_newlines();
        if !self.at(&TokenKind::RParen) {
            loop {
                self.skip_newlines();
                params.push(self.type_expr()?);
                if matches!(self.peek(), TokenKind::Ident(_)) {
                    self.advance();
                }
                self.skip_newlines();
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::FatArrow)?;
        let ret = self.type_expr()?;
        Ok(TypeExpr::Function {
            params,
            ret: Box::new(ret),
            span: self.span_from(start),
        })
    }
}
