//! Blocks and statements.

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::ast::{Block, Stmt, StmtKind, VarDecl};
use tarn_lexer::TokenKind;

use crate::cursor::{PResult, Parser};

impl Parser<'_> {
    /// `{ stmt* }`. Statement-level errors are reported and skipped so one
    /// bad line does not hide the rest of the block.
    pub(crate) fn block(&mut self) -> PResult<Block> {
        let start = self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            match self.peek() {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(Diagnostic::error(ErrorCode::E1001)
                        .with_message("unclosed block")
                        .with_label(start, "this `{` is never closed"));
                }
                _ => {}
            }
            match self.statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(diag) => {
                    self.report(diag);
                    self.recover_line();
                }
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Block {
            stmts,
            span: self.span_from(start),
        })
    }

    fn statement(&mut self) -> PResult<Stmt> {
        let start = self.span();
        let kind = match self.peek() {
            TokenKind::Var => {
                let decl = self.var_decl()?;
                self.end_statement()?;
                StmtKind::Var(decl)
            }
            TokenKind::If => return self.if_statement(),
            TokenKind::While => {
                self.advance();
                let cond = self.expression()?;
                let body = self.block()?;
                StmtKind::While { cond, body }
            }
            TokenKind::For => {
                self.advance();
                let var = self.expect_ident()?;
                self.expect(&TokenKind::In)?;
                let iterable = self.expression()?;
                let body = self.block()?;
                StmtKind::For {
                    var,
                    iterable,
                    body,
                }
            }
            TokenKind::Repeat => {
                self.advance();
                let count = self.expression()?;
                let body = self.block()?;
                StmtKind::Repeat { count, body }
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.peek().is_terminator() || self.at(&TokenKind::RBrace) {
                    None
                } else {
                    Some(self.expression()?)
                };
                self.end_statement()?;
                StmtKind::Return(value)
            }
            TokenKind::LBrace => StmtKind::Block(self.block()?),
            _ => {
                let target = self.expression()?;
                let kind = if let TokenKind::Assign(op) = self.peek() {
                    let op = *op;
                    self.advance();
                    self.skip_newlines();
                    let value = self.expression()?;
                    StmtKind::Assign { target, op, value }
                } else {
                    StmtKind::Expr(target)
                };
                self.end_statement()?;
                kind
            }
        };
        Ok(Stmt {
            kind,
            span: self.span_from(start),
        })
    }

    /// `var name (: Type)? (= expr)?`, without the terminator.
    pub(crate) fn var_decl(&mut self) -> PResult<VarDecl> {
        let start = self.expect(&TokenKind::Var)?;
        let name = self.expect_ident()?;
        let ty = if self.eat(&TokenKind::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };
        let init = if self.eat(&TokenKind::Assign(tarn_ir::AssignOp::Set)) {
            self.skip_newlines();
            Some(self.expression()?)
        } else {
            None
        };
        Ok(VarDecl {
            name,
            ty,
            init,
            span: self.span_from(start),
        })
    }

    fn if_statement(&mut self) -> PResult<Stmt> {
        let start = self.expect(&TokenKind::If)?;
        let cond = self.expression()?;
        let then_block = self.block()?;

        // `else` may sit on the line after the closing brace.
        let mut lookahead = 0;
        while matches!(self.peek_nth(lookahead), TokenKind::Newline) {
            lookahead += 1;
        }
        let else_block = if matches!(self.peek_nth(lookahead), TokenKind::Else) {
            self.skip_newlines();
            self.advance();
            if self.at(&TokenKind::If) {
                let nested = self.if_statement()?;
                Some(Block {
                    span: nested.span,
                    stmts: vec![nested],
                })
            } else {
                Some(self.block()?)
            }
        } else {
            None
        };

        Ok(Stmt {
            kind: StmtKind::If {
                cond,
                then_block,
                else_block,
            },
            span: self.span_from(start),
        })
    }
}
