//! Bottom-up expression typing.

use std::rc::Rc;

use tarn_diagnostic::ErrorCode;
use tarn_ir::ast::{Expr, ExprKind, Ident, StrPart};
use tarn_ir::{BinaryOp, Span, UnaryOp};
use tarn_stack::ensure_sufficient_stack;
use tarn_types::{Executable, Type, TypeKind};

use crate::Processor;

impl Processor<'_> {
    /// Infer the type of `expr`, reporting what is wrong inside it.
    /// Erroneous expressions type as `object`.
    pub(crate) fn expr(&mut self, expr: &Expr) -> Type {
        ensure_sufficient_stack(|| self.expr_inner(expr))
    }

    fn expr_inner(&mut self, expr: &Expr) -> Type {
        let builtins = self.table.builtins();
        match &expr.kind {
            ExprKind::Int(_) => builtins.int.clone(),
            ExprKind::Float(_) => builtins.float.clone(),
            ExprKind::Bool(_) => builtins.boolean.clone(),
            ExprKind::Null => builtins.null.clone(),
            ExprKind::Str(parts) => {
                for part in parts {
                    if let StrPart::Expr(inner) = part {
                        let found = self.expr(inner);
                        if found.is_void() {
                            self.error(
                                ErrorCode::E2010,
                                inner.span,
                                "cannot interpolate a void value",
                            );
                        }
                    }
                }
                self.table.builtins().string.clone()
            }
            ExprKind::Array(items) => {
                let types: Vec<Type> = items.iter().map(|item| self.expr(item)).collect();
                self.array_literal_type(&types)
            }
            ExprKind::Ident(name) => self.name_value(name, expr.span),
            ExprKind::This => self.this_type(expr.span),
            ExprKind::Field { object, name } => self.field_value(object, name),
            ExprKind::Index { object, index } => {
                let receiver = self.expr(object);
                let index_ty = self.expr(index);
                match self.table.index_getter(&receiver, &index_ty) {
                    Some(getter) => self.table.return_type(&getter, &receiver.receiver_view()),
                    None => {
                        self.error(
                            ErrorCode::E2015,
                            expr.span,
                            format!("`{receiver}` cannot be indexed with `{index_ty}`"),
                        );
                        self.table.object()
                    }
                }
            }
            ExprKind::Call { callee, args } => self.call(callee, args, expr.span),
            ExprKind::Binary { op, left, right } => {
                let left = self.expr(left);
                let right = self.expr(right);
                self.binary_result(&left, *op, &right, expr.span)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.expr(operand);
                self.unary_result(&operand, *op, expr.span)
            }
            ExprKind::Error => self.table.object(),
        }
    }

    /// `array<T>` when every element has the same type `T`, otherwise the
    /// raw `array`.
    pub(crate) fn array_literal_type(&self, elements: &[Type]) -> Type {
        let builtins = self.table.builtins();
        match elements.split_first() {
            Some((first, rest)) if rest.iter().all(|ty| ty == first) => {
                self.table.array_of(first.clone())
            }
            _ => builtins.array.clone(),
        }
    }

    fn this_type(&mut self, span: Span) -> Type {
        match &self.context.class {
            Some(class) if !self.context.is_static => class.clone(),
            _ => {
                self.error(
                    ErrorCode::E2013,
                    span,
                    "`this` is only available in instance members",
                );
                self.table.object()
            }
        }
    }

    /// A bare name used as a value: a local, a field of the current class,
    /// a free function, then a type.
    fn name_value(&mut self, name: &str, span: Span) -> Type {
        if let Some(ty) = self.lookup_local(name) {
            return ty;
        }

        let field = self
            .context
            .class
            .as_ref()
            .and_then(|class| class.field_named(name));
        let functions: Vec<Type> = self
            .table
            .functions_named(name)
            .iter()
            .map(|f| f.function_type())
            .collect();

        if let Some(field) = field {
            if !field.is_static() && self.context.is_static {
                self.error(
                    ErrorCode::E2013,
                    span,
                    format!("instance field `{name}` cannot be used in a static context"),
                );
            }
            let ty = self.in_class_view(&field.ty);
            if functions.is_empty() {
                return ty;
            }
            return self.table.union_of(std::iter::once(ty).chain(functions));
        }
        if !functions.is_empty() {
            return self.table.union_of(functions);
        }
        if let Some(ty) = self.table.type_named(name) {
            return Type::reflective(ty);
        }
        self.error(
            ErrorCode::E2002,
            span,
            format!("unknown variable `{name}`"),
        );
        self.table.object()
    }

    fn field_value(&mut self, object: &Expr, name: &Ident) -> Type {
        let receiver = self.expr(object);
        let view = receiver.receiver_view();

        let field = receiver.field_named(&name.name);
        if let Some(field) = field.as_ref().filter(|f| f.is_static()) {
            self.check_private(field.modifiers, field.owner().as_ref(), &name.name, name.span);
            return self.table.resolve(&field.ty, &view);
        }

        let methods = receiver.methods_named(&name.name);
        if !methods.is_empty() {
            return self.table.union_of(
                methods
                    .iter()
                    .map(|m| self.table.resolve(&m.function_type(), &view)),
            );
        }

        // An accessor reads every instance field, declared or not.
        if let Some(accessor) = self.instance_accessor(&receiver) {
            return self.table.return_type(&accessor, &view);
        }
        if let Some(field) = field {
            self.check_private(field.modifiers, field.owner().as_ref(), &name.name, name.span);
            return self.table.resolve(&field.ty, &view);
        }
        self.error(
            ErrorCode::E2003,
            name.span,
            format!("`{receiver}` has no member `{}`", name.name),
        );
        self.table.object()
    }

    /// Result type of `left op right`. Comparisons are boolean; everything
    /// else has the operator method's return type.
    pub(crate) fn binary_result(&mut self, left: &Type, op: BinaryOp, right: &Type, span: Span) -> Type {
        match self.table.binary_operator(left, op, right) {
            Some(found) => {
                if op.is_comparison() {
                    return self.table.builtins().boolean.clone();
                }
                let receiver = if found.swapped { right } else { left };
                self.table
                    .return_type(&found.method, &receiver.receiver_view())
            }
            None => {
                self.error(
                    ErrorCode::E2005,
                    span,
                    format!("operator `{op}` cannot be applied to `{left}` and `{right}`"),
                );
                self.table.object()
            }
        }
    }

    fn unary_result(&mut self, operand: &Type, op: UnaryOp, span: Span) -> Type {
        match self.table.unary_operator(operand, op) {
            Some(method) => self.return_in_view(&method, operand),
            None => {
                self.error(
                    ErrorCode::E2005,
                    span,
                    format!("operator `{op}` cannot be applied to `{operand}`"),
                );
                self.table.object()
            }
        }
    }

    pub(crate) fn return_in_view(&self, exec: &Executable, receiver: &Type) -> Type {
        self.table.return_type(exec, &receiver.receiver_view())
    }

    /// The accessor `object.name` reads through. Type names read their
    /// statics directly.
    pub(crate) fn instance_accessor(&self, receiver: &Type) -> Option<Rc<Executable>> {
        if matches!(receiver.kind(), TypeKind::Reflective(_)) {
            return None;
        }
        self.table.accessor(receiver)
    }

    /// The assigner `object.name = value` writes through.
    pub(crate) fn instance_assigner(&self, receiver: &Type, value: &Type) -> Option<Rc<Executable>> {
        if matches!(receiver.kind(), TypeKind::Reflective(_)) {
            return None;
        }
        self.table.assigner(receiver, value)
    }
}
