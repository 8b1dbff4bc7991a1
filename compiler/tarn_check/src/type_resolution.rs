//! Written types to type-table types.

use tarn_diagnostic::ErrorCode;
use tarn_ir::ast::{Ident, TypeExpr};
use tarn_ir::Span;
use tarn_types::{Type, TypeKind};

use crate::Processor;

impl Processor<'_> {
    /// Resolve a written type in the current context. Unknown names are
    /// reported and resolve to `object`.
    pub(crate) fn resolve_type(&mut self, expr: &TypeExpr) -> Type {
        match expr {
            TypeExpr::Named { name, args, span } => self.resolve_named(name, args, *span),
            TypeExpr::SelfType(span) => match &self.context.class {
                Some(class) => self.table.self_type_of(class),
                None => {
                    self.error(
                        ErrorCode::E2013,
                        *span,
                        "`this` type used outside of a class",
                    );
                    self.table.object()
                }
            },
            TypeExpr::Function { params, ret, .. } => {
                let params: Vec<Type> = params.iter().map(|p| self.resolve_type(p)).collect();
                let ret = self.resolve_type(ret);
                self.table.function_of(&ret, &params)
            }
            TypeExpr::Union(options, _) => {
                let options: Vec<Type> = options.iter().map(|o| self.resolve_type(o)).collect();
                self.table.union_of(options)
            }
            TypeExpr::Optional(inner, _) => {
                let inner = self.resolve_type(inner);
                self.table.optional_of(&inner)
            }
        }
    }

    fn resolve_named(&mut self, name: &Ident, args: &[TypeExpr], span: Span) -> Type {
        if args.is_empty() {
            if let Some(param) = self.type_parameter(&name.name) {
                return param;
            }
        }
        let Some(base) = self.table.type_named(&name.name) else {
            self.error(
                ErrorCode::E2001,
                name.span,
                format!("unknown type `{}`", name.name),
            );
            return self.table.object();
        };
        if args.is_empty() {
            return base;
        }

        let expected = base.as_nominal().map_or(0, |n| n.type_params().len());
        let args: Vec<Type> = args.iter().map(|a| self.resolve_type(a)).collect();
        if args.len() != expected {
            self.error(
                ErrorCode::E2021,
                span,
                format!(
                    "`{}` takes {expected} type argument(s) but {} were given",
                    name.name,
                    args.len()
                ),
            );
            return base;
        }
        self.table.parameterized(&base, args)
    }

    /// Type parameter of the current class named `name`.
    fn type_parameter(&self, name: &str) -> Option<Type> {
        let class = self.context.class.as_ref()?;
        class
            .as_nominal()?
            .type_params()
            .iter()
            .find(|p| matches!(p.kind(), TypeKind::TypeParameter { name: n, .. } if n == name))
            .cloned()
    }
}
