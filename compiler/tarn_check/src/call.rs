//! Call resolution.

use std::rc::Rc;

use tarn_diagnostic::{Diagnostic, ErrorCode};
use tarn_ir::ast::{Expr, ExprKind, Ident};
use tarn_ir::Span;
use tarn_types::{Executable, Type, TypeKind};

use crate::Processor;

impl Processor<'_> {
    pub(crate) fn call(&mut self, callee: &Expr, args: &[Expr], span: Span) -> Type {
        let arg_types: Vec<Type> = args.iter().map(|arg| self.expr(arg)).collect();
        match &callee.kind {
            ExprKind::Ident(name) => self.call_name(name, &arg_types, callee.span),
            ExprKind::Field { object, name } => self.call_member(object, name, &arg_types, span),
            _ => {
                let ty = self.expr(callee);
                self.call_value(&ty, &arg_types, span)
            }
        }
    }

    /// `name(args)`: a callable local, a method of the current class, a
    /// free function, then a constructor of the type called `name`. The
    /// first group with an accepting overload wins.
    fn call_name(&mut self, name: &str, args: &[Type], span: Span) -> Type {
        if let Some(local) = self.lookup_local(name) {
            return self.call_value(&local, args, span);
        }

        let mut candidates: Vec<Rc<Executable>> = Vec::new();

        if let Some(class) = self.context.class.clone() {
            let methods = class.methods_named(name);
            if let Some(method) = self.table.select(&methods, args, Some(&class)) {
                if !method.is_static() && self.context.is_static {
                    self.error(
                        ErrorCode::E2013,
                        span,
                        format!("instance method `{name}` cannot be called from a static context"),
                    );
                }
                self.check_private(method.modifiers, method.owner().as_ref(), name, span);
                return self.table.return_type(&method, &class);
            }
            candidates.extend(methods);
        }

        let functions = self.table.functions_named(name);
        if let Some(function) = self.table.select(&functions, args, None) {
            return function.ret.clone();
        }
        candidates.extend(functions);

        if let Some(ty) = self.table.type_named(name) {
            let constructors = ty.constructors();
            if constructors.is_empty() {
                self.error(
                    ErrorCode::E2016,
                    span,
                    format!("`{ty}` cannot be constructed"),
                );
                return self.table.object();
            }
            if let Some(ctor) = self.table.select(&constructors, args, Some(&ty)) {
                self.check_private(ctor.modifiers, Some(&ty), name, span);
                return ty;
            }
            candidates.extend(constructors);
        }

        if candidates.is_empty() {
            self.error(
                ErrorCode::E2023,
                span,
                format!("unknown function `{name}`"),
            );
        } else {
            self.no_overload(name, &candidates, args, span);
        }
        self.table.object()
    }

    /// `object.name(args)`: a method of the receiver, or a field holding a
    /// callable value.
    fn call_member(&mut self, object: &Expr, name: &Ident, args: &[Type], span: Span) -> Type {
        let receiver = self.expr(object);
        let view = receiver.receiver_view();

        let methods = receiver.methods_named(&name.name);
        if !methods.is_empty() {
            return match self.table.select(&methods, args, Some(&view)) {
                Some(method) => {
                    self.check_private(
                        method.modifiers,
                        method.owner().as_ref(),
                        &name.name,
                        name.span,
                    );
                    self.table.return_type(&method, &view)
                }
                None => {
                    self.no_overload(&name.name, &methods, args, span);
                    self.table.object()
                }
            };
        }

        if let Some(field) = receiver.field_named(&name.name) {
            self.check_private(field.modifiers, field.owner().as_ref(), &name.name, name.span);
            let ty = self.table.resolve(&field.ty, &view);
            return self.call_value(&ty, args, span);
        }

        self.error(
            ErrorCode::E2003,
            name.span,
            format!("`{receiver}` has no method `{}`", name.name),
        );
        self.table.object()
    }

    /// Call a value of type `ty`: a function type, a union of function
    /// types, or anything with an invoker.
    pub(crate) fn call_value(&mut self, ty: &Type, args: &[Type], span: Span) -> Type {
        match ty.kind() {
            TypeKind::Function { ret, params } => {
                if accepts_structurally(params, args) {
                    return ret.clone();
                }
            }
            TypeKind::Union(options)
                if options
                    .iter()
                    .all(|o| matches!(o.kind(), TypeKind::Function { .. })) =>
            {
                let matching = options.iter().find_map(|option| match option.kind() {
                    TypeKind::Function { ret, params } if accepts_structurally(params, args) => {
                        Some(ret.clone())
                    }
                    _ => None,
                });
                if let Some(ret) = matching {
                    return ret;
                }
            }
            _ => {
                if let Some(invoker) = self.table.invoker(ty, args) {
                    return self.return_in_view(&invoker, ty);
                }
                self.error(
                    ErrorCode::E2016,
                    span,
                    format!("`{ty}` is not callable"),
                );
                return self.table.object();
            }
        }

        self.error(
            ErrorCode::E2006,
            span,
            format!("`{ty}` cannot be called with ({})", describe_args(args)),
        );
        self.table.object()
    }

    fn no_overload(&mut self, name: &str, candidates: &[Rc<Executable>], args: &[Type], span: Span) {
        let mut diagnostic = Diagnostic::error(ErrorCode::E2006)
            .with_message(format!(
                "no overload of `{name}` accepts ({})",
                describe_args(args)
            ))
            .with_label(span, "");
        for candidate in candidates {
            diagnostic = diagnostic.with_note(format!("candidate: {}", candidate.describe()));
        }
        self.report(diagnostic);
    }
}

fn accepts_structurally(params: &[Type], args: &[Type]) -> bool {
    params.len() == args.len() && args.iter().zip(params).all(|(arg, param)| arg.can_assign_to(param))
}

fn describe_args(args: &[Type]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
