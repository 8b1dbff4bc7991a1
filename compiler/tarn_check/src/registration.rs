//! The index phase: classes, free functions, then members.

use std::cell::OnceCell;
use std::rc::Rc;

use rustc_hash::{FxHashMap, FxHashSet};
use tarn_diagnostic::ErrorCode;
use tarn_ir::ast::{ClassDecl, ConstructorDecl, Item, MemberDecl, Param, Signature, SourceUnit};
use tarn_ir::{Modifiers, Span};
use tarn_types::{
    Executable, ExecutableKind, Field, ItemSymbol, Member, Parameter, Type, UnitSymbols,
};

use crate::processor::Context;
use crate::Processor;

impl Processor<'_> {
    /// Register every declaration of `units`.
    ///
    /// The returned symbols line up with the units' items, and each class
    /// entry lists one member per declared member, in source order.
    #[tracing::instrument(level = "debug", skip_all, fields(units = units.len()))]
    pub fn index(&mut self, units: &[SourceUnit]) -> Vec<UnitSymbols> {
        let mut symbols: Vec<UnitSymbols> = units
            .iter()
            .map(|unit| self.index_shells(unit))
            .collect();

        for (unit, unit_symbols) in units.iter().zip(symbols.iter_mut()) {
            for (item, symbol) in unit.items.iter().zip(unit_symbols.items.iter_mut()) {
                if let Item::Function(decl) = item {
                    if let Some(function) = self.register_function(&decl.signature, decl.span) {
                        *symbol = ItemSymbol::Function(function);
                    }
                }
            }
        }

        for (unit, unit_symbols) in units.iter().zip(symbols.iter_mut()) {
            for (item, symbol) in unit.items.iter().zip(unit_symbols.items.iter_mut()) {
                if let (Item::Class(decl), ItemSymbol::Class { ty, members }) = (item, symbol) {
                    *members = self.register_members(decl, ty);
                }
            }
        }
        symbols
    }

    /// First pass over one unit: class types, globals and `main`.
    fn index_shells(&mut self, unit: &SourceUnit) -> UnitSymbols {
        let mut seen_main: Option<Span> = None;
        let items = unit
            .items
            .iter()
            .map(|item| match item {
                Item::Class(decl) => match self.register_class(decl) {
                    Some(ty) => ItemSymbol::Class {
                        ty,
                        members: Vec::new(),
                    },
                    None => ItemSymbol::Invalid,
                },
                Item::Global(decl) => ItemSymbol::Global {
                    name: decl.name.name.clone(),
                    ty: self.table.object(),
                },
                Item::Main(body) => {
                    if seen_main.is_some() {
                        self.error(
                            ErrorCode::E2004,
                            body.span,
                            format!("`{}` declares more than one main block", unit.name),
                        );
                        ItemSymbol::Invalid
                    } else {
                        seen_main = Some(body.span);
                        ItemSymbol::Main
                    }
                }
                Item::Function(_) => ItemSymbol::Invalid,
            })
            .collect();
        UnitSymbols { items }
    }

    fn register_class(&mut self, decl: &ClassDecl) -> Option<Type> {
        let object = self.table.object();
        let mut names = FxHashSet::default();
        let mut type_params = Vec::with_capacity(decl.type_params.len());
        for (index, param) in decl.type_params.iter().enumerate() {
            if !names.insert(param.name.as_str()) {
                self.error(
                    ErrorCode::E2004,
                    param.span,
                    format!("duplicate type parameter `{}`", param.name),
                );
            }
            type_params.push(Type::type_parameter(&param.name, index, object.clone()));
        }

        let ty = Type::class(&decl.name.name, &object, type_params);
        if !self.table.register_type(ty.clone()) {
            self.error(
                ErrorCode::E2004,
                decl.name.span,
                format!("type `{}` is already declared", decl.name.name),
            );
            return None;
        }
        tracing::debug!(class = %decl.name.name, "registered class");
        Some(ty)
    }

    fn register_function(&mut self, signature: &Signature, span: Span) -> Option<Rc<Executable>> {
        let native = signature
            .modifiers
            .contains(Modifiers::NATIVE)
            .then(|| signature.name.name.clone());
        let function = self.with_body(Context::global(), |this| {
            this.build_executable(signature, ExecutableKind::Function, None, native)
        });

        let clash = self
            .table
            .functions_named(&function.name)
            .iter()
            .any(|existing| same_parameters(existing, &function));
        if clash {
            self.error(
                ErrorCode::E2004,
                span,
                format!("function `{}` is already declared", function.describe()),
            );
            return None;
        }
        tracing::debug!(function = %function.describe(), "registered function");
        self.table.register_function(Rc::clone(&function));
        Some(function)
    }

    fn register_members(&mut self, decl: &ClassDecl, ty: &Type) -> Vec<Member> {
        let context = Context {
            class: Some(ty.clone()),
            ..Context::default()
        };
        self.with_body(context, |this| {
            // Field types first: auto-assign constructor parameters take them.
            let mut field_types: FxHashMap<String, Type> = FxHashMap::default();
            let mut resolved = Vec::with_capacity(decl.members.len());
            for member in &decl.members {
                if let MemberDecl::Field(field) = member {
                    let field_ty = this.resolve_type(&field.ty);
                    field_types
                        .entry(field.name.name.clone())
                        .or_insert_with(|| field_ty.clone());
                    resolved.push(Some(field_ty));
                } else {
                    resolved.push(None);
                }
            }

            let mut seen_fields = FxHashSet::default();
            let mut members = Vec::with_capacity(decl.members.len());
            let mut has_constructor = false;
            for (member, field_ty) in decl.members.iter().zip(resolved) {
                let created = match member {
                    MemberDecl::Field(field) => {
                        if !seen_fields.insert(field.name.name.as_str()) {
                            this.error(
                                ErrorCode::E2004,
                                field.name.span,
                                format!(
                                    "field `{}` is already declared in `{ty}`",
                                    field.name.name
                                ),
                            );
                        }
                        Member::Field(Rc::new(Field {
                            name: field.name.name.clone(),
                            modifiers: field.modifiers.flags,
                            ty: field_ty.unwrap_or_else(|| this.table.object()),
                            owner: ty.downgrade(),
                            init: OnceCell::new(),
                            span: field.span,
                        }))
                    }
                    MemberDecl::Method(method) => {
                        let native = method
                            .signature
                            .modifiers
                            .contains(Modifiers::NATIVE)
                            .then(|| format!("{ty}.{}", method.signature.name.name));
                        let exec = this.build_executable(
                            &method.signature,
                            ExecutableKind::Method,
                            Some(ty),
                            native,
                        );
                        this.check_duplicate_method(ty, &exec, &members);
                        Member::Executable(exec)
                    }
                    MemberDecl::Constructor(ctor) => {
                        has_constructor = true;
                        let exec = this.build_constructor(ctor, ty, &field_types);
                        this.check_duplicate_method(ty, &exec, &members);
                        Member::Executable(exec)
                    }
                };
                ty.add_member(created.clone());
                members.push(created);
            }

            if !has_constructor {
                ty.add_member(Member::Executable(Rc::new(Executable {
                    name: "constructor".to_string(),
                    kind: ExecutableKind::Constructor,
                    modifiers: Modifiers::empty(),
                    owner: Some(ty.downgrade()),
                    ret: ty.clone(),
                    params: Vec::new(),
                    native: None,
                    body: OnceCell::new(),
                    span: decl.span,
                })));
            }
            tracing::debug!(class = %ty, members = members.len(), "registered members");
            members
        })
    }

    fn check_duplicate_method(&mut self, ty: &Type, exec: &Executable, earlier: &[Member]) {
        let clash = earlier
            .iter()
            .filter_map(Member::as_executable)
            .any(|other| other.name == exec.name && same_parameters(other, exec));
        if clash {
            self.error(
                ErrorCode::E2004,
                exec.span,
                format!("`{}` is already declared in `{ty}`", exec.describe()),
            );
        }
    }

    /// Build a function or method from its signature, resolving types in
    /// the current context.
    pub(crate) fn build_executable(
        &mut self,
        signature: &Signature,
        kind: ExecutableKind,
        owner: Option<&Type>,
        native: Option<String>,
    ) -> Rc<Executable> {
        let ret = self.resolve_type(&signature.ret);
        let params = self.build_params(&signature.params, None);
        let mut modifiers = signature.modifiers.flags;
        if native.is_some() {
            modifiers |= Modifiers::NATIVE;
        }
        Rc::new(Executable {
            name: signature.name.name.clone(),
            kind,
            modifiers,
            owner: owner.map(Type::downgrade),
            ret,
            params,
            native,
            body: OnceCell::new(),
            span: signature.span,
        })
    }

    fn build_constructor(
        &mut self,
        decl: &ConstructorDecl,
        ty: &Type,
        field_types: &FxHashMap<String, Type>,
    ) -> Rc<Executable> {
        let params = self.build_params(&decl.params, Some(field_types));
        Rc::new(Executable {
            name: "constructor".to_string(),
            kind: ExecutableKind::Constructor,
            modifiers: decl.modifiers.flags,
            owner: Some(ty.downgrade()),
            ret: ty.clone(),
            params,
            native: None,
            body: OnceCell::new(),
            span: decl.span,
        })
    }

    /// `fields` is present only for constructors, whose `this.name`
    /// parameters take the type of the field they assign.
    fn build_params(
        &mut self,
        params: &[Param],
        fields: Option<&FxHashMap<String, Type>>,
    ) -> Vec<Parameter> {
        let mut names = FxHashSet::default();
        let last = params.len().saturating_sub(1);
        params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let name = param.name.name.as_str();
                if !names.insert(name) {
                    self.error(
                        ErrorCode::E2009,
                        param.name.span,
                        format!("duplicate parameter `{name}`"),
                    );
                }
                if param.vararg && index != last {
                    self.error(
                        ErrorCode::E2009,
                        param.span,
                        format!("vararg parameter `{name}` must be the last parameter"),
                    );
                }
                if param.vararg && param.default.is_some() {
                    self.error(
                        ErrorCode::E2009,
                        param.span,
                        format!("vararg parameter `{name}` cannot have a default value"),
                    );
                }

                let ty = if param.auto_assign {
                    self.auto_assign_type(name, param.span, fields)
                } else {
                    match &param.ty {
                        Some(ty) => self.resolve_type(ty),
                        None => self.table.object(),
                    }
                };
                Parameter {
                    vararg: param.vararg,
                    has_default: param.default.is_some(),
                    auto_assign: param.auto_assign,
                    ..Parameter::new(name, ty, param.span)
                }
            })
            .collect()
    }

    fn auto_assign_type(
        &mut self,
        name: &str,
        span: Span,
        fields: Option<&FxHashMap<String, Type>>,
    ) -> Type {
        let Some(fields) = fields else {
            self.error(
                ErrorCode::E2009,
                span,
                format!("`this.{name}` parameters are only allowed in constructors"),
            );
            return self.table.object();
        };
        match fields.get(name) {
            Some(ty) => ty.clone(),
            None => {
                self.error(
                    ErrorCode::E2009,
                    span,
                    format!("no field named `{name}` to assign"),
                );
                self.table.object()
            }
        }
    }
}

/// Same parameter types, in order, with the same vararg shape.
fn same_parameters(a: &Executable, b: &Executable) -> bool {
    a.params.len() == b.params.len()
        && a
            .params
            .iter()
            .zip(&b.params)
            .all(|(x, y)| x.ty == y.ty && x.vararg == y.vararg)
}
