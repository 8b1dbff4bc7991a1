//! Expressions, by precedence climbing.

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::{
    ast::{Expr, ExprKind, StrPart},
    BinaryOp, UnaryOp,
};
use tarn_lexer::{StrPiece, TokenKind};
use tarn_stack::ensure_sufficient_stack;

use crate::cursor::{PResult, Parser};

/// Binding power of each binary operator token; `true` marks right
/// associativity.
fn binary_op(kind: &TokenKind) -> Option<(BinaryOp, u8, bool)> {
    Some(match kind {
        TokenKind::OrOr => (BinaryOp::Or, 1, false),
        TokenKind::AndAnd => (BinaryOp::And, 2, false),
        TokenKind::EqEq => (BinaryOp::Eq, 3, false),
        TokenKind::NotEq => (BinaryOp::NotEq, 3, false),
        TokenKind::Lt => (BinaryOp::Lt, 4, false),
        TokenKind::Gt => (BinaryOp::Gt, 4, false),
        TokenKind::LtEq => (BinaryOp::LtEq, 4, false),
        TokenKind::GtEq => (BinaryOp::GtEq, 4, false),
        TokenKind::DotDot => (BinaryOp::Range, 5, false),
        TokenKind::Plus => (BinaryOp::Add, 6, false),
        TokenKind::Minus => (BinaryOp::Sub, 6, false),
        TokenKind::Star => (BinaryOp::Mul, 7, false),
        TokenKind::Slash => (BinaryOp::Div, 7, false),
        TokenKind::SlashSlash => (BinaryOp::IntDiv, 7, false),
        TokenKind::Percent => (BinaryOp::Mod, 7, false),
        TokenKind::StarStar => (BinaryOp::Pow, 8, true),
        _ => return None,
    })
}

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        ensure_sufficient_stack(|| self.binary(1))
    }

    fn binary(&mut self, min_prec: u8) -> PResult<Expr> {
        let mut left = self.unary()?;
        while let Some((op, prec, right_assoc)) = binary_op(self.peek()) {
            if prec < min_prec {
                break;
            }
            self.advance();
            self.skip_newlines();
            let next = if right_assoc { prec } else { prec + 1 };
            let right = ensure_sufficient_stack(|| self.binary(next))?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }
        Ok(left)
    }

    fn unary(&mut self) -> PResult<Expr> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.postfix(),
        };
        let start = self.advance().span;
        let operand = ensure_sufficient_stack(|| self.unary())?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn postfix(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.comma_list(&TokenKind::RParen)?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        span,
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_ident()?;
                    let span = expr.span.merge(name.span);
                    expr = Expr::new(
                        ExprKind::Field {
                            object: Box::new(expr),
                            name,
                        },
                        span,
                    );
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.skip_newlines();
                    let index = self.expression()?;
                    self.skip_newlines();
                    self.expect(&TokenKind::RBracket)?;
                    let span = self.span_from(expr.span);
                    expr = Expr::new(
                        ExprKind::Index {
                            object: Box::new(expr),
                            index: Box::new(index),
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Expressions separated by commas up to `close`, which is consumed.
    /// Newlines are insignificant inside the list.
    fn comma_list(&mut self, close: &TokenKind) -> PResult<Vec<Expr>> {
        let mut items = Vec::new();
        self.skip_newlines();
        while !self.at(close) {
            items.push(self.expression()?);
            self.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        self.expect(close)?;
        Ok(items)
    }

    fn primary(&mut self) -> PResult<Expr> {
        let token = self.current();
        let span = token.span;
        let kind = match &token.kind {
            TokenKind::Int(v) => ExprKind::Int(*v),
            TokenKind::Float(v) => ExprKind::Float(*v),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::This => ExprKind::This,
            TokenKind::Ident(name) => ExprKind::Ident(name.clone()),
            TokenKind::Str(pieces) => {
                self.advance();
                let parts = self.string_parts(pieces)?;
                return Ok(Expr::new(ExprKind::Str(parts), span));
            }
            TokenKind::LParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.expression()?;
                self.skip_newlines();
                self.expect(&TokenKind::RParen)?;
                return Ok(Expr::new(inner.kind, self.span_from(span)));
            }
            TokenKind::LBracket => {
                self.advance();
                let items = self.comma_list(&TokenKind::RBracket)?;
                return Ok(Expr::new(ExprKind::Array(items), self.span_from(span)));
            }
            // Lexer already reported this token.
            TokenKind::Error => ExprKind::Error,
            other => {
                return Err(Diagnostic::error(ErrorCode::E1002)
                    .with_message(format!("expected expression, found {}", other.describe()))
                    .with_label(span, "expected an expression"))
            }
        };
        self.advance();
        Ok(Expr::new(kind, span))
    }

    fn string_parts(&mut self, pieces: &[StrPiece]) -> PResult<Vec<StrPart>> {
        let mut parts = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                StrPiece::Text(text) => parts.push(StrPart::Text(text.clone())),
                StrPiece::Interp { tokens, span } => {
                    let mut sub = Parser::new(tokens);
                    sub.skip_newlines();
                    let result = sub.expression().and_then(|expr| {
                        sub.skip_newlines();
                        if sub.at_eof() {
                            Ok(expr)
                        } else {
                            Err(sub.unexpected("`}` closing the interpolation"))
                        }
                    });
                    self.diagnostics.extend(std::mem::take(&mut sub.diagnostics));
                    match result {
                        Ok(expr) => parts.push(StrPart::Expr(expr)),
                        Err(diag) => {
                            return Err(diag.with_context(*span, "in this interpolation"))
                        }
                    }
                }
            }
        }
        Ok(parts)
    }
}
