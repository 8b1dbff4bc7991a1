//! Builders shared by the unit tests of this crate.

use std::cell::OnceCell;
use std::rc::Rc;

use tarn_ir::{Modifiers, Span};

use crate::{Executable, ExecutableKind, Field, Member, Parameter, Type, TypeTable};

pub(crate) fn class(table: &TypeTable, name: &str) -> Type {
    let ty = Type::class(name, &table.object(), Vec::new());
    assert!(table.register_type(ty.clone()));
    ty
}

pub(crate) fn param(name: &str, ty: &Type) -> Parameter {
    Parameter::new(name, ty.clone(), Span::DUMMY)
}

pub(crate) fn defaulted(name: &str, ty: &Type) -> Parameter {
    Parameter {
        has_default: true,
        ..param(name, ty)
    }
}

pub(crate) fn vararg(name: &str, ty: &Type) -> Parameter {
    Parameter {
        vararg: true,
        ..param(name, ty)
    }
}

pub(crate) fn function(name: &str, ret: &Type, params: Vec<Parameter>) -> Rc<Executable> {
    Rc::new(Executable {
        name: name.to_string(),
        kind: ExecutableKind::Function,
        modifiers: Modifiers::empty(),
        owner: None,
        ret: ret.clone(),
        params,
        native: None,
        body: OnceCell::new(),
        span: Span::DUMMY,
    })
}

/// Declare a method on `owner` and return it.
pub(crate) fn method(
    owner: &Type,
    modifiers: Modifiers,
    name: &str,
    ret: &Type,
    params: Vec<Parameter>,
) -> Rc<Executable> {
    let exec = Rc::new(Executable {
        name: name.to_string(),
        kind: ExecutableKind::Method,
        modifiers,
        owner: Some(owner.downgrade()),
        ret: ret.clone(),
        params,
        native: None,
        body: OnceCell::new(),
        span: Span::DUMMY,
    });
    assert!(owner.add_member(Member::Executable(Rc::clone(&exec))));
    exec
}

pub(crate) fn field(owner: &Type, modifiers: Modifiers, name: &str, ty: &Type) -> Rc<Field> {
    let field = Rc::new(Field {
        name: name.to_string(),
        modifiers,
        ty: ty.clone(),
        owner: owner.downgrade(),
        init: OnceCell::new(),
        span: Span::DUMMY,
    });
    assert!(owner.add_member(Member::Field(Rc::clone(&field))));
    field
}
