//! Top-level items, class members and signatures.

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::{
    ast::{
        ClassDecl, ConstructorDecl, FieldDecl, FunctionDecl, Item, MemberDecl, ModifierList,
        Param, Signature, SourceUnit,
    },
    AssignOp,
};
use tarn_lexer::TokenKind;

use crate::cursor::{PResult, Parser};

impl Parser<'_> {
    pub(crate) fn unit(&mut self, name: &str) -> SourceUnit {
        let mut items = Vec::new();
        loop {
            self.skip_separators();
            if self.at_eof() {
                break;
            }
            match self.item() {
                Ok(item) => items.push(item),
                Err(diag) => {
                    self.report(diag);
                    self.recover_line();
                    // A stray `}` at top level would stall recovery.
                    self.eat(&TokenKind::RBrace);
                }
            }
        }
        SourceUnit {
            name: name.to_string(),
            items,
        }
    }

    fn item(&mut self) -> PResult<Item> {
        match self.peek() {
            TokenKind::Class => Ok(Item::Class(self.class_decl()?)),
            TokenKind::Main => {
                self.advance();
                Ok(Item::Main(self.block()?))
            }
            TokenKind::Var => {
                let decl = self.var_decl()?;
                self.end_statement()?;
                Ok(Item::Global(decl))
            }
            TokenKind::Function | TokenKind::Modifier(_) => {
                let start = self.span();
                let modifiers = self.modifiers();
                self.expect(&TokenKind::Function)?;
                let signature = self.signature_rest(modifiers, start)?;
                let body = self.optional_body()?;
                Ok(Item::Function(FunctionDecl {
                    signature,
                    body,
                    span: self.span_from(start),
                }))
            }
            _ => Err(self.unexpected("`class`, `function`, `var` or `main`")),
        }
    }

    fn class_decl(&mut self) -> PResult<ClassDecl> {
        let start = self.expect(&TokenKind::Class)?;
        let name = self.expect_ident()?;
        let mut type_params = Vec::new();
        if self.eat(&TokenKind::Lt) {
            loop {
                type_params.push(self.expect_ident()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::Gt)?;
        }
        self.skip_newlines();
        let open = self.expect(&TokenKind::LBrace)?;

        let mut members = Vec::new();
        loop {
            self.skip_separators();
            match self.peek() {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(Diagnostic::error(ErrorCode::E1001)
                        .with_message(format!("unclosed body of class `{}`", name.name))
                        .with_label(open, "this `{` is never closed"));
                }
                _ => {}
            }
            match self.member() {
                Ok(member) => members.push(member),
                Err(diag) => {
                    self.report(diag);
                    self.recover_line();
                }
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(ClassDecl {
            name,
            type_params,
            members,
            span: self.span_from(start),
        })
    }

    fn member(&mut self) -> PResult<MemberDecl> {
        let start = self.span();
        let modifiers = self.modifiers();

        if self.eat(&TokenKind::Constructor) {
            let params = self.params(true)?;
            let body = self.optional_body()?;
            return Ok(MemberDecl::Constructor(ConstructorDecl {
                modifiers,
                params,
                body,
                span: self.span_from(start),
            }));
        }

        let ty = self.type_expr()?;
        let name = self.expect_ident()?;

        if self.at(&TokenKind::LParen) {
            let params = self.params(false)?;
            let signature = Signature {
                modifiers,
                ret: ty,
                name,
                params,
                span: self.span_from(start),
            };
            let body = self.optional_body()?;
            return Ok(MemberDecl::Method(FunctionDecl {
                signature,
                body,
                span: self.span_from(start),
            }));
        }

        let init = if self.eat(&TokenKind::Assign(AssignOp::Set)) {
            self.skip_newlines();
            Some(self.expression()?)
        } else {
            None
        };
        self.end_statement()?;
        Ok(MemberDecl::Field(FieldDecl {
            modifiers,
            ty,
            name,
            init,
            span: self.span_from(start),
        }))
    }

    /// Body block if one follows on the same line; otherwise the member is
    /// declaration-only (native or abstract) and must end its line.
    fn optional_body(&mut self) -> PResult<Option<tarn_ir::ast::Block>> {
        if self.at(&TokenKind::LBrace) {
            Ok(Some(self.block()?))
        } else {
            self.end_statement()?;
            Ok(None)
        }
    }

    pub(crate) fn modifiers(&mut self) -> ModifierList {
        let mut list = ModifierList::default();
        while let TokenKind::Modifier(flag) = self.peek() {
            let span = self.advance().span;
            if list.flags.contains(*flag) {
                self.report(
                    Diagnostic::error(ErrorCode::E1004)
                        .with_message(format!("duplicate modifier `{flag}`"))
                        .with_label(span, "already specified"),
                );
                continue;
            }
            list.flags |= *flag;
            list.spans.push((*flag, span));
        }
        list
    }

    /// `RetType name(params)` after modifiers (and `function`, if any).
    pub(crate) fn signature_rest(
        &mut self,
        modifiers: ModifierList,
        start: tarn_ir::Span,
    ) -> PResult<Signature> {
        let ret = self.type_expr()?;
        let name = self.expect_ident()?;
        let params = self.params(false)?;
        Ok(Signature {
            modifiers,
            ret,
            name,
            params,
            span: self.span_from(start),
        })
    }

    /// Parenthesized parameter list. `allow_auto_assign` admits the
    /// constructor-only `this.field` form.
    fn params(&mut self, allow_auto_assign: bool) -> PResult<Vec<Param>> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        self.skip_newlines();
        while !self.at(&TokenKind::RParen) {
            params.push(self.param(allow_auto_assign)?);
            self.skip_newlines();
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }
        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    fn param(&mut self, allow_auto_assign: bool) -> PResult<Param> {
        let start = self.span();
        let (ty, vararg, auto_assign) =
            if allow_auto_assign && self.at(&TokenKind::This) && self.peek_nth(1) == &TokenKind::Dot
            {
                self.advance();
                self.advance();
                (None, false, true)
            } else {
                let ty = self.type_expr()?;
                let vararg = self.eat(&TokenKind::Ellipsis);
                (Some(ty), vararg, false)
            };
        let name = self.expect_ident()?;
        let default = if self.eat(&TokenKind::Assign(AssignOp::Set)) {
            Some(self.expression()?)
        } else {
            None
        };
        Ok(Param {
            name,
            ty,
            default,
            vararg,
            auto_assign,
            span: self.span_from(start),
        })
    }
}
