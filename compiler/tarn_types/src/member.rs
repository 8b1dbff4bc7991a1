//! Members owned by nominal types, and free functions.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use tarn_ir::{canon, Modifiers, Span};

use crate::{Type, TypeKind, WeakType};

#[derive(Clone, Debug)]
pub enum Member {
    Field(Rc<Field>),
    Executable(Rc<Executable>),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Executable(exec) => &exec.name,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Member::Field(field) => field.modifiers,
            Member::Executable(exec) => exec.modifiers,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers().contains(Modifiers::STATIC)
    }

    pub fn as_field(&self) -> Option<&Rc<Field>> {
        match self {
            Member::Field(field) => Some(field),
            Member::Executable(_) => None,
        }
    }

    pub fn as_executable(&self) -> Option<&Rc<Executable>> {
        match self {
            Member::Executable(exec) => Some(exec),
            Member::Field(_) => None,
        }
    }
}

pub struct Field {
    pub name: String,
    pub modifiers: Modifiers,
    pub ty: Type,
    pub owner: WeakType,
    /// Set once by the IR generator when the declaration has an initializer.
    pub init: OnceCell<canon::Expr>,
    pub span: Span,
}

impl Field {
    pub fn owner(&self) -> Option<Type> {
        self.owner.upgrade()
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({} {})", self.ty, self.name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExecutableKind {
    Function,
    Method,
    Constructor,
}

/// Anything with parameters and an invocation protocol: free functions,
/// methods and constructors.
pub struct Executable {
    pub name: String,
    pub kind: ExecutableKind,
    pub modifiers: Modifiers,
    /// Owning type; `None` for free functions.
    pub owner: Option<WeakType>,
    pub ret: Type,
    pub params: Vec<Parameter>,
    /// Symbol of the host callback for bodiless native members.
    pub native: Option<String>,
    /// Set once by the IR generator.
    pub body: OnceCell<Rc<canon::Block>>,
    pub span: Span,
}

impl Executable {
    pub fn owner(&self) -> Option<Type> {
        self.owner.as_ref().and_then(WeakType::upgrade)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == ExecutableKind::Constructor
    }

    pub fn has_vararg(&self) -> bool {
        self.params.last().is_some_and(|p| p.vararg)
    }

    /// Number of parameters a call must supply.
    pub fn required_arity(&self) -> usize {
        self.params
            .iter()
            .filter(|p| !p.is_omissible())
            .count()
    }

    /// Structural function type of this executable, used when a function or
    /// method name is read as a value.
    pub fn function_type(&self) -> Type {
        Type::function(
            self.ret.clone(),
            self.params.iter().map(|p| p.ty.clone()).collect(),
        )
    }

    /// `name(int, string...)`, for diagnostics.
    pub fn describe(&self) -> String {
        let name = if self.is_constructor() {
            self.owner()
                .map_or_else(|| "constructor".to_string(), |owner| owner.to_string())
        } else {
            self.name.clone()
        };
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.vararg {
                    format!("{}...", p.ty)
                } else {
                    p.ty.to_string()
                }
            })
            .collect();
        format!("{name}({})", params.join(", "))
    }
}

impl fmt::Debug for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Executable({})", self.describe())
    }
}

pub struct Parameter {
    pub name: String,
    /// Declared type; for a vararg parameter, the element type.
    pub ty: Type,
    pub vararg: bool,
    pub has_default: bool,
    /// `this.name` constructor parameter copied into the field after binding.
    pub auto_assign: bool,
    /// Set once by the IR generator; evaluated in the callee's context.
    pub default: OnceCell<canon::Expr>,
    pub span: Span,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: Type, span: Span) -> Self {
        Parameter {
            name: name.into(),
            ty,
            vararg: false,
            has_default: false,
            auto_assign: false,
            default: OnceCell::new(),
            span,
        }
    }

    /// Whether a call may leave this parameter out.
    pub fn is_omissible(&self) -> bool {
        self.vararg || self.has_default || matches!(self.ty.kind(), TypeKind::Optional(_))
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({} {})", self.ty, self.name)
    }
}
