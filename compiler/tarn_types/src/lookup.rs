//! Member lookup, operator resolution and the implicit call protocols.
//!
//! Protocol methods are recognised by modifier, arity and parameter types.
//! All lookups resolve `this` and type parameters against the receiver's
//! view before comparing parameter types, so `array<int>` exposes
//! `add(int)` where the declaration says `add(T)`.

use std::rc::Rc;

use tarn_ir::{BinaryOp, Modifiers, UnaryOp};

use crate::{Executable, Field, Member, Type, TypeKind, TypeTable};

/// A resolved binary operator.
#[derive(Clone, Debug)]
pub struct OperatorMatch {
    pub method: Rc<Executable>,
    /// The method belongs to the right operand and receives the left one.
    pub swapped: bool,
}

impl Type {
    /// Every member visible on a value of this type: own members first, then
    /// the supertype chain.
    pub fn members(&self) -> Vec<Member> {
        match self.kind() {
            TypeKind::Primitive { nominal, .. } | TypeKind::Class(nominal) => {
                let mut members = nominal.declared_members().clone();
                if let Some(supertype) = nominal.supertype() {
                    members.extend(supertype.members());
                }
                members
            }
            TypeKind::Parameterized { base, .. } => base.members(),
            TypeKind::Optional(inner) | TypeKind::SelfType(inner) => inner.members(),
            TypeKind::TypeParameter { bound, .. } => bound.members(),
            TypeKind::Union(options) => options.iter().flat_map(Type::members).collect(),
            TypeKind::Reflective(of) => of
                .members()
                .into_iter()
                .filter(Member::is_static)
                .collect(),
            TypeKind::Function { .. } | TypeKind::Dummy(_) => Vec::new(),
        }
    }

    /// Methods named `name`, excluding constructors.
    pub fn methods_named(&self, name: &str) -> Vec<Rc<Executable>> {
        self.members()
            .iter()
            .filter_map(Member::as_executable)
            .filter(|exec| !exec.is_constructor() && exec.name == name)
            .cloned()
            .collect()
    }

    pub fn field_named(&self, name: &str) -> Option<Rc<Field>> {
        self.members()
            .iter()
            .filter_map(Member::as_field)
            .find(|field| field.name == name)
            .cloned()
    }

    /// Constructors declared by the type itself. Constructors are not
    /// inherited.
    pub fn constructors(&self) -> Vec<Rc<Executable>> {
        match self.kind() {
            TypeKind::Parameterized { base, .. } => base.constructors(),
            _ => self.as_nominal().map_or_else(Vec::new, |nominal| {
                nominal
                    .declared_members()
                    .iter()
                    .filter_map(Member::as_executable)
                    .filter(|exec| exec.is_constructor())
                    .cloned()
                    .collect()
            }),
        }
    }

    /// Declared fields of the type itself, in declaration order.
    pub fn declared_fields(&self) -> Vec<Rc<Field>> {
        match self.kind() {
            TypeKind::Parameterized { base, .. } => base.declared_fields(),
            _ => self.as_nominal().map_or_else(Vec::new, |nominal| {
                nominal
                    .declared_members()
                    .iter()
                    .filter_map(Member::as_field)
                    .cloned()
                    .collect()
            }),
        }
    }

    fn methods_with(&self, flags: Modifiers) -> impl Iterator<Item = Rc<Executable>> {
        self.members()
            .into_iter()
            .filter_map(|member| member.as_executable().cloned())
            .filter(move |exec| !exec.is_constructor() && exec.modifiers.contains(flags))
    }
}

impl TypeTable {
    /// Parameter types of `exec` as seen through `view`.
    pub fn param_types(&self, exec: &Executable, view: &Type) -> Vec<Type> {
        exec.params
            .iter()
            .map(|p| self.resolve(&p.ty, view))
            .collect()
    }

    pub fn return_type(&self, exec: &Executable, view: &Type) -> Type {
        self.resolve(&exec.ret, view)
    }

    fn operator_method(&self, receiver: &Type, name: &str, operand: &Type) -> Option<Rc<Executable>> {
        let view = receiver.receiver_view();
        receiver
            .methods_with(Modifiers::OPERATOR)
            .filter(|exec| exec.name == name)
            .find(|exec| {
                exec.params
                    .first()
                    .is_some_and(|p| operand.can_assign_to(&self.resolve(&p.ty, &view)))
            })
    }

    /// Find the method implementing `left op right`.
    ///
    /// Bidirectional operators retry on the right operand when the left one
    /// has no match.
    pub fn binary_operator(&self, left: &Type, op: BinaryOp, right: &Type) -> Option<OperatorMatch> {
        let name = op.method_name();
        if let Some(method) = self.operator_method(left, name, right) {
            return Some(OperatorMatch {
                method,
                swapped: false,
            });
        }
        if op.is_bidirectional() {
            if let Some(method) = self.operator_method(right, name, left) {
                return Some(OperatorMatch {
                    method,
                    swapped: true,
                });
            }
        }
        None
    }

    pub fn unary_operator(&self, operand: &Type, op: UnaryOp) -> Option<Rc<Executable>> {
        let name = op.method_name();
        operand
            .methods_with(Modifiers::OPERATOR)
            .find(|exec| exec.name == name && exec.required_arity() == 0)
    }

    /// `get indexer` method accepting `index`.
    pub fn index_getter(&self, receiver: &Type, index: &Type) -> Option<Rc<Executable>> {
        let view = receiver.receiver_view();
        receiver
            .methods_with(Modifiers::GET | Modifiers::INDEXER)
            .find(|exec| exec.params.len() == 1 && self.accepts(exec, &[index.clone()], Some(&view)))
    }

    /// `set indexer` method accepting `index` and `value`.
    pub fn index_setter(&self, receiver: &Type, index: &Type, value: &Type) -> Option<Rc<Executable>> {
        let view = receiver.receiver_view();
        let args = [index.clone(), value.clone()];
        receiver
            .methods_with(Modifiers::SET | Modifiers::INDEXER)
            .find(|exec| exec.params.len() == 2 && self.accepts(exec, &args, Some(&view)))
    }

    /// Reader for `object.name` on instances of `receiver`, declared fields
    /// included.
    pub fn accessor(&self, receiver: &Type) -> Option<Rc<Executable>> {
        receiver
            .methods_with(Modifiers::ACCESSOR)
            .find(|exec| exec.params.len() == 1)
    }

    /// Writer for `object.name = value` on instances of `receiver`, declared
    /// fields included.
    pub fn assigner(&self, receiver: &Type, value: &Type) -> Option<Rc<Executable>> {
        let view = receiver.receiver_view();
        let args = [self.builtins().string.clone(), value.clone()];
        receiver
            .methods_with(Modifiers::ASSIGNER)
            .find(|exec| exec.params.len() == 2 && self.accepts(exec, &args, Some(&view)))
    }

    /// Method driving `for` loops over values of `receiver`.
    pub fn iterator(&self, receiver: &Type) -> Option<Rc<Executable>> {
        receiver
            .methods_with(Modifiers::ITERATOR)
            .find(|exec| exec.params.is_empty())
    }

    /// Method making values of `receiver` callable with `args`.
    pub fn invoker(&self, receiver: &Type, args: &[Type]) -> Option<Rc<Executable>> {
        let view = receiver.receiver_view();
        let candidates: Vec<_> = receiver.methods_with(Modifiers::INVOKER).collect();
        self.select(&candidates, args, Some(&view))
    }
}

#[cfg(test)]
mod tests;
