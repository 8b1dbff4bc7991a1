use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use crate::Member;

/// Handle to a type. Equality and hashing are by identity.
#[derive(Clone)]
pub struct Type(Rc<TypeKind>);

/// Non-owning handle, used by members to refer back to their owner.
#[derive(Clone, Debug)]
pub struct WeakType(Weak<TypeKind>);

impl WeakType {
    pub fn upgrade(&self) -> Option<Type> {
        self.0.upgrade().map(Type)
    }
}

pub enum TypeKind {
    Primitive {
        nominal: Nominal,
        kind: PrimitiveKind,
    },
    Class(Nominal),
    /// A generic base applied to arguments. Arguments are invariant.
    Parameterized {
        base: Type,
        args: Vec<Type>,
    },
    Union(Vec<Type>),
    Optional(Type),
    Function {
        ret: Type,
        params: Vec<Type>,
    },
    /// `this` in a signature; resolves to the receiver's type.
    SelfType(Type),
    /// Positional generic parameter of a nominal type.
    TypeParameter {
        name: String,
        index: usize,
        bound: Type,
    },
    Dummy(Dummy),
    /// The type of a type name used as a value. Exposes static members only.
    Reflective(Type),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dummy {
    Void,
    Null,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int,
    Float,
    String,
    Boolean,
    Array,
}

/// Shared shape of primitives and classes.
pub struct Nominal {
    name: String,
    /// `None` only for `object`.
    supertype: Option<Type>,
    type_params: Vec<Type>,
    members: RefCell<Vec<Member>>,
}

impl Nominal {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supertype(&self) -> Option<&Type> {
        self.supertype.as_ref()
    }

    pub fn type_params(&self) -> &[Type] {
        &self.type_params
    }

    /// Members declared on this type itself, in declaration order.
    pub fn declared_members(&self) -> Ref<'_, Vec<Member>> {
        self.members.borrow()
    }
}

impl Type {
    fn new(kind: TypeKind) -> Self {
        Type(Rc::new(kind))
    }

    fn nominal(name: &str, supertype: Option<Type>, type_params: Vec<Type>) -> Nominal {
        Nominal {
            name: name.to_string(),
            supertype,
            type_params,
            members: RefCell::new(Vec::new()),
        }
    }

    /// The root class. Exactly one exists per [`crate::TypeTable`].
    pub(crate) fn root_object() -> Self {
        Type::new(TypeKind::Class(Self::nominal("object", None, Vec::new())))
    }

    pub fn primitive(
        name: &str,
        kind: PrimitiveKind,
        object: &Type,
        type_params: Vec<Type>,
    ) -> Self {
        Type::new(TypeKind::Primitive {
            nominal: Self::nominal(name, Some(object.clone()), type_params),
            kind,
        })
    }

    pub fn class(name: &str, object: &Type, type_params: Vec<Type>) -> Self {
        Type::new(TypeKind::Class(Self::nominal(
            name,
            Some(object.clone()),
            type_params,
        )))
    }

    /// Uninterned instantiation; prefer [`crate::TypeTable::parameterized`].
    pub(crate) fn parameterized_raw(base: Type, args: Vec<Type>) -> Self {
        Type::new(TypeKind::Parameterized { base, args })
    }

    /// Uninterned union of `options`, flattening nested unions and dropping duplicates.
    /// A single remaining option is returned as is.
    pub fn union(options: impl IntoIterator<Item = Type>) -> Self {
        let mut flat: Vec<Type> = Vec::new();
        for option in options {
            let nested = match option.kind() {
                TypeKind::Union(inner) => inner.clone(),
                _ => vec![option],
            };
            for ty in nested {
                if !flat.contains(&ty) {
                    flat.push(ty);
                }
            }
        }
        if flat.len() == 1 {
            if let Some(only) = flat.pop() {
                return only;
            }
        }
        Type::new(TypeKind::Union(flat))
    }

    /// Uninterned; prefer [`crate::TypeTable::optional_of`].
    pub fn optional(inner: Type) -> Self {
        Type::new(TypeKind::Optional(inner))
    }

    pub fn function(ret: Type, params: Vec<Type>) -> Self {
        Type::new(TypeKind::Function { ret, params })
    }

    pub fn self_type(bound: Type) -> Self {
        Type::new(TypeKind::SelfType(bound))
    }

    pub fn type_parameter(name: &str, index: usize, bound: Type) -> Self {
        Type::new(TypeKind::TypeParameter {
            name: name.to_string(),
            index,
            bound,
        })
    }

    pub(crate) fn dummy(dummy: Dummy) -> Self {
        Type::new(TypeKind::Dummy(dummy))
    }

    pub fn reflective(of: Type) -> Self {
        Type::new(TypeKind::Reflective(of))
    }

    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    pub fn downgrade(&self) -> WeakType {
        WeakType(Rc::downgrade(&self.0))
    }

    pub(crate) fn as_ptr(&self) -> *const TypeKind {
        Rc::as_ptr(&self.0)
    }

    pub fn ptr_eq(&self, other: &Type) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Nominal data of a primitive or class.
    pub fn as_nominal(&self) -> Option<&Nominal> {
        match self.kind() {
            TypeKind::Primitive { nominal, .. } | TypeKind::Class(nominal) => Some(nominal),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind(), TypeKind::Class(n) if n.supertype.is_none())
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind(), TypeKind::Dummy(Dummy::Null))
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind(), TypeKind::Dummy(Dummy::Void))
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind(), TypeKind::Class(_))
    }

    /// Primitive kind, looking through generic instantiations.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.kind() {
            TypeKind::Primitive { kind, .. } => Some(*kind),
            TypeKind::Parameterized { base, .. } => base.primitive_kind(),
            _ => None,
        }
    }

    /// The type whose members a receiver of this type exposes, and against
    /// which `this` and type parameters in those members resolve.
    pub fn receiver_view(&self) -> Type {
        match self.kind() {
            TypeKind::Optional(inner) | TypeKind::SelfType(inner) | TypeKind::Reflective(inner) => {
                inner.receiver_view()
            }
            _ => self.clone(),
        }
    }

    /// Attach a member to a nominal type. Returns `false` for non-nominal
    /// types, which cannot own members.
    pub fn add_member(&self, member: Member) -> bool {
        match self.as_nominal() {
            Some(nominal) => {
                nominal.members.borrow_mut().push(member);
                true
            }
            None => false,
        }
    }

    /// Whether `this` or a type parameter occurs anywhere inside.
    pub(crate) fn needs_resolution(&self) -> bool {
        match self.kind() {
            TypeKind::SelfType(_) | TypeKind::TypeParameter { .. } => true,
            TypeKind::Parameterized { args, .. } => args.iter().any(Type::needs_resolution),
            TypeKind::Union(options) => options.iter().any(Type::needs_resolution),
            TypeKind::Optional(inner) => inner.needs_resolution(),
            TypeKind::Function { ret, params } => {
                ret.needs_resolution() || params.iter().any(Type::needs_resolution)
            }
            _ => false,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Type], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TypeKind::Primitive { nominal, .. } | TypeKind::Class(nominal) => {
                f.write_str(&nominal.name)
            }
            TypeKind::Parameterized { base, args } => {
                write!(f, "{base}<")?;
                write_list(f, args, ", ")?;
                f.write_str(">")
            }
            TypeKind::Union(options) => write_list(f, options, " | "),
            TypeKind::Optional(inner) => match inner.kind() {
                TypeKind::Union(_) | TypeKind::Function { .. } => write!(f, "({inner})?"),
                _ => write!(f, "{inner}?"),
            },
            TypeKind::Function { ret, params } => {
                f.write_str("(")?;
                write_list(f, params, ", ")?;
                write!(f, ") => {ret}")
            }
            TypeKind::SelfType(_) => f.write_str("this"),
            TypeKind::TypeParameter { name, .. } => f.write_str(name),
            TypeKind::Dummy(Dummy::Void) => f.write_str("void"),
            TypeKind::Dummy(Dummy::Null) => f.write_str("null"),
            TypeKind::Reflective(of) => write!(f, "type<{of}>"),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}
