//! Statement checking.

use tarn_diagnostic::ErrorCode;
use tarn_ir::ast::{Block, Expr, ExprKind, Ident, Stmt, StmtKind};
use tarn_ir::{AssignOp, Modifiers, Span};
use tarn_types::{Field, Type};

use crate::Processor;

impl Processor<'_> {
    /// Check `block` in a new nested frame.
    pub(crate) fn check_block(&mut self, block: &Block) {
        self.with_frame(|this| this.check_block_here(block));
    }

    /// Check the statements of `block` in the current frame.
    pub(crate) fn check_block_here(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Var(decl) => {
                let ty = self.var_type(decl);
                self.declare(&decl.name.name, ty, decl.name.span);
            }
            StmtKind::Assign { target, op, value } => self.check_assign(target, *op, value, stmt.span),
            StmtKind::Expr(expr) => {
                if !matches!(expr.kind, ExprKind::Call { .. } | ExprKind::Error) {
                    self.error(
                        ErrorCode::E2019,
                        expr.span,
                        "expression has no effect; only calls may stand alone",
                    );
                }
                self.expr(expr);
            }
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                self.condition(cond);
                self.check_block(then_block);
                if let Some(else_block) = else_block {
                    self.check_block(else_block);
                }
            }
            StmtKind::While { cond, body } => {
                self.condition(cond);
                self.check_block(body);
            }
            StmtKind::For {
                var,
                iterable,
                body,
            } => self.check_for(var, iterable, body),
            StmtKind::Repeat { count, body } => {
                let found = self.expr(count);
                let int = self.table.builtins().int.clone();
                if !found.can_assign_to(&int) {
                    self.error(
                        ErrorCode::E2010,
                        count.span,
                        format!("repeat count must be int, found `{found}`"),
                    );
                }
                self.check_block(body);
            }
            StmtKind::Return(value) => self.check_return(value.as_ref(), stmt.span),
            StmtKind::Block(block) => self.check_block(block),
        }
    }

    fn condition(&mut self, cond: &Expr) {
        let found = self.expr(cond);
        let boolean = self.table.builtins().boolean.clone();
        if !found.can_assign_to(&boolean) {
            self.error(
                ErrorCode::E2010,
                cond.span,
                format!("condition must be boolean, found `{found}`"),
            );
        }
    }

    fn check_for(&mut self, var: &Ident, iterable: &Expr, body: &Block) {
        let found = self.expr(iterable);
        let element = self.element_of(&found, iterable.span);
        self.with_frame(|this| {
            this.declare(&var.name, element, var.span);
            this.check_block_here(body);
        });
    }

    /// Element type produced by iterating a value of type `ty`.
    fn element_of(&mut self, ty: &Type, span: Span) -> Type {
        let view = ty.receiver_view();
        if let Some(element) = self.table.element_type(&view) {
            return element;
        }
        if let Some(iterator) = self.table.iterator(ty) {
            let ret = self.table.return_type(&iterator, &view);
            return self
                .table
                .element_type(&ret)
                .unwrap_or_else(|| self.table.object());
        }
        self.error(
            ErrorCode::E2017,
            span,
            format!("`{ty}` is not iterable"),
        );
        self.table.object()
    }

    fn check_return(&mut self, value: Option<&Expr>, span: Span) {
        let expected = self
            .context
            .ret
            .clone()
            .unwrap_or_else(|| self.table.builtins().void.clone());
        match value {
            Some(value) if expected.is_void() => {
                self.expr(value);
                self.error(
                    ErrorCode::E2011,
                    value.span,
                    "cannot return a value from a body that returns void",
                );
            }
            Some(value) => {
                let found = self.expr(value);
                self.expect_assignable(&found, &expected, value.span);
            }
            None if !expected.is_void() => self.error(
                ErrorCode::E2011,
                span,
                format!("expected a return value of type `{expected}`"),
            ),
            None => {}
        }
    }

    fn check_assign(&mut self, target: &Expr, op: AssignOp, value: &Expr, span: Span) {
        let value_ty = self.expr(value);
        let target_ty = match &target.kind {
            ExprKind::Ident(name) => self.name_target(name, target.span),
            ExprKind::Field { object, name } => self.field_target(object, name, &value_ty),
            ExprKind::Index { object, index } => {
                self.index_target(object, index, &value_ty, target.span)
            }
            _ => {
                self.error(
                    ErrorCode::E2018,
                    target.span,
                    "cannot assign to this expression",
                );
                None
            }
        };
        let Some(target_ty) = target_ty else {
            return;
        };

        let stored = match op.binary() {
            Some(binary) => self.binary_result(&target_ty, binary, &value_ty, span),
            None => value_ty,
        };
        self.expect_assignable(&stored, &target_ty, value.span);
    }

    fn name_target(&mut self, name: &str, span: Span) -> Option<Type> {
        if let Some(ty) = self.lookup_local(name) {
            return Some(ty);
        }
        let field = self
            .context
            .class
            .as_ref()
            .and_then(|class| class.field_named(name));
        if let Some(field) = field {
            if !field.is_static() && self.context.is_static {
                self.error(
                    ErrorCode::E2013,
                    span,
                    format!("instance field `{name}` cannot be used in a static context"),
                );
            }
            self.check_readonly(&field, span);
            return Some(self.in_class_view(&field.ty));
        }
        if self.table.has_function(name) || self.table.type_named(name).is_some() {
            self.error(
                ErrorCode::E2018,
                span,
                format!("cannot assign to `{name}`"),
            );
        } else {
            self.error(
                ErrorCode::E2002,
                span,
                format!("unknown variable `{name}`"),
            );
        }
        None
    }

    fn field_target(&mut self, object: &Expr, name: &Ident, value: &Type) -> Option<Type> {
        let receiver = self.expr(object);
        let view = receiver.receiver_view();
        let field = receiver.field_named(&name.name);
        let is_static = field.as_ref().is_some_and(|f| f.is_static());
        // An accepting assigner takes every instance field write.
        if !is_static {
            if let Some(assigner) = self.instance_assigner(&receiver, value) {
                let param_types = self.table.param_types(&assigner, &view);
                return param_types.get(1).cloned();
            }
        }
        if let Some(field) = field {
            self.check_private(field.modifiers, field.owner().as_ref(), &name.name, name.span);
            self.check_readonly(&field, name.span);
            return Some(self.table.resolve(&field.ty, &view));
        }
        self.error(
            ErrorCode::E2003,
            name.span,
            format!("`{receiver}` has no field `{}`", name.name),
        );
        None
    }

    fn index_target(&mut self, object: &Expr, index: &Expr, value: &Type, span: Span) -> Option<Type> {
        let receiver = self.expr(object);
        let index_ty = self.expr(index);
        let view = receiver.receiver_view();
        if let Some(setter) = self.table.index_setter(&receiver, &index_ty, value) {
            let param_types = self.table.param_types(&setter, &view);
            return param_types.get(1).cloned();
        }
        self.error(
            ErrorCode::E2015,
            span,
            format!("`{receiver}` cannot be assigned through an index of type `{index_ty}`"),
        );
        None
    }

    /// Readonly fields are writable only while their own class initializes.
    fn check_readonly(&mut self, field: &Field, span: Span) {
        if !field.modifiers.contains(Modifiers::READONLY) {
            return;
        }
        let owner = field.owner();
        let initializing_owner =
            self.context.initializing && owner.is_some() && owner == self.context.class;
        if !initializing_owner {
            self.error(
                ErrorCode::E2020,
                span,
                format!("cannot assign to readonly field `{}`", field.name),
            );
        }
    }

    pub(crate) fn check_private(
        &mut self,
        modifiers: Modifiers,
        owner: Option<&Type>,
        name: &str,
        span: Span,
    ) {
        if modifiers.contains(Modifiers::PRIVATE) && !self.can_see_private(owner) {
            self.error(
                ErrorCode::E2014,
                span,
                format!("`{name}` is private"),
            );
        }
    }
}
