//! Declaration validation: modifiers, body presence, protocol shapes,
//! defaults and initializers.

use tarn_diagnostic::ErrorCode;
use tarn_ir::ast::{
    Block, ClassDecl, ConstructorDecl, FieldDecl, FunctionDecl, MemberDecl, ModifierList, Param,
    StmtKind, VarDecl,
};
use tarn_ir::{BinaryOp, Modifiers, Span, UnaryOp};
use tarn_types::{Executable, Field, Member, Type};

use crate::processor::Context;
use crate::Processor;

/// Modifier pairs that may not appear together.
const CONFLICTS: [(Modifiers, Modifiers); 5] = [
    (Modifiers::ABSTRACT, Modifiers::FINAL),
    (Modifiers::ABSTRACT, Modifiers::NATIVE),
    (Modifiers::ABSTRACT, Modifiers::STATIC),
    (Modifiers::PRIVATE, Modifiers::PROTECTED),
    (Modifiers::GET, Modifiers::SET),
];

impl Processor<'_> {
    /// Check a module-level `var` and declare it in the global frame.
    pub(crate) fn check_global(&mut self, decl: &VarDecl) -> Type {
        let ty = self.var_type(decl);
        self.declare(&decl.name.name, ty.clone(), decl.name.span);
        ty
    }

    /// Type of a variable declaration: the declared type if written,
    /// otherwise the initializer's type, otherwise `object`.
    pub(crate) fn var_type(&mut self, decl: &VarDecl) -> Type {
        let declared = decl.ty.as_ref().map(|ty| self.resolve_type(ty));
        let init = decl.init.as_ref().map(|init| (self.expr(init), init.span));
        match (declared, init) {
            (Some(declared), Some((found, span))) => {
                self.expect_assignable(&found, &declared, span);
                declared
            }
            (Some(declared), None) => declared,
            (None, Some((found, span))) => {
                if found.is_void() {
                    self.error(
                        ErrorCode::E2010,
                        span,
                        format!("`{}` cannot be initialized with void", decl.name.name),
                    );
                    self.table.object()
                } else {
                    found
                }
            }
            (None, None) => self.table.object(),
        }
    }

    pub(crate) fn expect_assignable(&mut self, found: &Type, expected: &Type, span: Span) {
        if !found.can_assign_to(expected) {
            self.error(
                ErrorCode::E2010,
                span,
                format!("expected `{expected}`, found `{found}`"),
            );
        }
    }

    pub(crate) fn check_class(&mut self, decl: &ClassDecl, ty: &Type, members: &[Member]) {
        for (member_decl, member) in decl.members.iter().zip(members) {
            match (member_decl, member) {
                (MemberDecl::Field(field_decl), Member::Field(field)) => {
                    self.check_field(field_decl, field, ty);
                }
                (MemberDecl::Method(method), Member::Executable(exec)) => {
                    self.check_method(method, exec, ty);
                }
                (MemberDecl::Constructor(ctor), Member::Executable(exec)) => {
                    self.check_constructor(ctor, exec, ty);
                }
                _ => {}
            }
        }
    }

    pub(crate) fn check_function(&mut self, decl: &FunctionDecl, exec: &Executable) {
        let signature = &decl.signature;
        self.check_modifiers(&signature.modifiers, Modifiers::FUNCTION_ALLOWED, "functions");
        self.check_body_presence(
            exec,
            decl.body.is_some(),
            signature.modifiers.contains(Modifiers::NATIVE),
            decl.span,
        );
        let context = Context {
            ret: Some(exec.ret.clone()),
            ..Context::global()
        };
        self.check_executable(exec, &signature.params, decl.body.as_ref(), context);
    }

    fn check_field(&mut self, decl: &FieldDecl, field: &Field, class: &Type) {
        self.check_modifiers(&decl.modifiers, Modifiers::FIELD_ALLOWED, "fields");
        let Some(init) = &decl.init else {
            return;
        };
        let context = Context {
            class: Some(class.clone()),
            is_static: field.is_static(),
            ret: None,
            initializing: true,
        };
        self.with_body(context, |this| {
            let found = this.expr(init);
            let expected = this.in_class_view(&field.ty);
            this.expect_assignable(&found, &expected, init.span);
        });
    }

    fn check_method(&mut self, decl: &FunctionDecl, exec: &Executable, class: &Type) {
        let modifiers = &decl.signature.modifiers;
        self.check_modifiers(modifiers, Modifiers::METHOD_ALLOWED, "methods");
        let bodiless = modifiers.flags.intersects(Modifiers::NATIVE | Modifiers::ABSTRACT);
        self.check_body_presence(exec, decl.body.is_some(), bodiless, decl.span);
        self.check_protocol(exec, class, decl.signature.span);

        let context = Context {
            class: Some(class.clone()),
            is_static: exec.is_static(),
            ret: Some(self.table.resolve(&exec.ret, class)),
            initializing: false,
        };
        self.check_executable(exec, &decl.signature.params, decl.body.as_ref(), context);
    }

    fn check_constructor(&mut self, decl: &ConstructorDecl, exec: &Executable, class: &Type) {
        self.check_modifiers(&decl.modifiers, Modifiers::CONSTRUCTOR_ALLOWED, "constructors");
        let context = Context {
            class: Some(class.clone()),
            is_static: false,
            ret: Some(self.table.builtins().void.clone()),
            initializing: true,
        };
        self.check_executable(exec, &decl.params, decl.body.as_ref(), context);
    }

    fn check_modifiers(&mut self, list: &ModifierList, allowed: Modifiers, what: &str) {
        for (flag, span) in &list.spans {
            if !allowed.contains(*flag) {
                self.error(
                    ErrorCode::E2007,
                    *span,
                    format!("`{flag}` is not allowed on {what}"),
                );
            }
        }
        for (a, b) in CONFLICTS {
            if list.contains(a) && list.contains(b) {
                let span = list.span_of(b).or_else(|| list.span_of(a)).unwrap_or(Span::DUMMY);
                self.error(
                    ErrorCode::E2007,
                    span,
                    format!("`{a}` and `{b}` cannot be combined"),
                );
            }
        }
        if allowed.contains(Modifiers::PROTECTED) {
            if let Some(span) = list.span_of(Modifiers::PROTECTED) {
                self.warn(
                    ErrorCode::E2024,
                    span,
                    "`protected` has no effect: classes cannot be extended",
                );
            }
        }
    }

    fn check_body_presence(&mut self, exec: &Executable, has_body: bool, bodiless: bool, span: Span) {
        if bodiless && has_body {
            self.error(
                ErrorCode::E2012,
                span,
                format!("`{}` is native or abstract and cannot have a body", exec.name),
            );
        } else if !bodiless && !has_body {
            self.error(
                ErrorCode::E2012,
                span,
                format!("`{}` needs a body", exec.name),
            );
        }
    }

    /// Shape rules for methods the runtime calls implicitly.
    fn check_protocol(&mut self, exec: &Executable, class: &Type, span: Span) {
        let modifiers = exec.modifiers;
        let params = &exec.params;
        let string = self.table.builtins().string.clone();
        let first_is_string = params
            .first()
            .is_some_and(|p| string.can_assign_to(&self.table.resolve(&p.ty, class)));

        if modifiers.contains(Modifiers::ACCESSOR) && !(params.len() == 1 && first_is_string) {
            self.error(
                ErrorCode::E2008,
                span,
                format!("accessor `{}` must take exactly one string parameter", exec.name),
            );
        }
        if modifiers.contains(Modifiers::ASSIGNER) && !(params.len() == 2 && first_is_string) {
            self.error(
                ErrorCode::E2008,
                span,
                format!(
                    "assigner `{}` must take two parameters, the first a string",
                    exec.name
                ),
            );
        }

        if modifiers.contains(Modifiers::INDEXER) {
            let expected = match (modifiers.contains(Modifiers::GET), modifiers.contains(Modifiers::SET)) {
                (true, false) => Some(1),
                (false, true) => Some(2),
                _ => None,
            };
            match expected {
                Some(count) if params.len() == count => {}
                Some(count) => self.error(
                    ErrorCode::E2008,
                    span,
                    format!("indexer `{}` must take exactly {count} parameter(s)", exec.name),
                ),
                None => self.error(
                    ErrorCode::E2008,
                    span,
                    format!("indexer `{}` must be marked either `get` or `set`", exec.name),
                ),
            }
        } else if modifiers.intersects(Modifiers::GET | Modifiers::SET) {
            self.error(
                ErrorCode::E2007,
                span,
                "`get` and `set` only apply to indexers",
            );
        }

        if modifiers.contains(Modifiers::ITERATOR) {
            let ret = self.table.resolve(&exec.ret, class);
            let array = self.table.builtins().array.clone();
            if !params.is_empty() || !ret.can_assign_to(&array) {
                self.error(
                    ErrorCode::E2008,
                    span,
                    format!(
                        "iterator `{}` must take no parameters and return an array",
                        exec.name
                    ),
                );
            }
        }

        if modifiers.contains(Modifiers::OPERATOR) {
            self.check_operator_shape(exec, span);
        }
    }

    fn check_operator_shape(&mut self, exec: &Executable, span: Span) {
        let name = exec.name.as_str();
        let arity = exec.params.len();
        if BinaryOp::METHOD_NAMES.contains(&name) {
            if arity != 1 {
                self.error(
                    ErrorCode::E2008,
                    span,
                    format!("binary operator `{name}` must take exactly one parameter"),
                );
            }
            if name == "compare" && exec.ret != self.table.builtins().int {
                self.error(
                    ErrorCode::E2008,
                    span,
                    format!("`compare` must return int, not `{}`", exec.ret),
                );
            }
        } else if UnaryOp::METHOD_NAMES.contains(&name) {
            if arity != 0 {
                self.error(
                    ErrorCode::E2008,
                    span,
                    format!("unary operator `{name}` must take no parameters"),
                );
            }
        } else {
            self.error(
                ErrorCode::E2008,
                span,
                format!("`{name}` is not an operator method name"),
            );
        }
    }

    /// Check defaults and the body of an executable under `context`.
    ///
    /// Parameters are bound one at a time, so a default may refer to the
    /// parameters before it.
    fn check_executable(
        &mut self,
        exec: &Executable,
        param_decls: &[Param],
        body: Option<&Block>,
        context: Context,
    ) {
        self.with_body(context, |this| {
            for (param, decl) in exec.params.iter().zip(param_decls) {
                let ty = this.in_class_view(&param.ty);
                if let Some(default) = &decl.default {
                    let found = this.expr(default);
                    this.expect_assignable(&found, &ty, default.span);
                }
                let bound = if param.vararg {
                    this.table.array_of(ty)
                } else {
                    ty
                };
                // Duplicate parameter names were reported while indexing.
                this.bind(&param.name, bound);
            }

            let Some(body) = body else {
                return;
            };
            this.check_block_here(body);

            let needs_value = this
                .context
                .ret
                .as_ref()
                .is_some_and(|ret| !ret.is_void());
            if needs_value && !exec.is_constructor() && !always_returns(body) {
                this.error(
                    ErrorCode::E2011,
                    exec.span,
                    format!("`{}` does not return a value on every path", exec.name),
                );
            }
        });
    }
}

/// Whether every path through `block` ends in a `return`.
fn always_returns(block: &Block) -> bool {
    block.stmts.iter().any(|stmt| match &stmt.kind {
        StmtKind::Return(_) => true,
        StmtKind::If {
            then_block,
            else_block: Some(else_block),
            ..
        } => always_returns(then_block) && always_returns(else_block),
        StmtKind::Block(inner) => always_returns(inner),
        _ => false,
    })
}
