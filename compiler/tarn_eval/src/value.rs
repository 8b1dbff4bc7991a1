//! Runtime values.
//!
//! A [`Value`] pairs its runtime [`Type`] with a [`Payload`]. Scalars are
//! stored inline; arrays and instances are shared handles, so assigning one
//! to another variable aliases it. A value's type is fixed at creation.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tarn_types::{Builtins, Executable, Type};

#[derive(Clone)]
pub enum Payload {
    Void,
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    Array(Rc<RefCell<Vec<Value>>>),
    Instance(Rc<Instance>),
    /// A type name used as a value; exposes static members.
    Type(Type),
    Function(Rc<Callable>),
}

/// Field bag of a class instance.
pub struct Instance {
    /// Unique per interpreter; default equality compares it.
    pub identity: u64,
    fields: RefCell<FxHashMap<String, Value>>,
}

impl Instance {
    pub fn new(identity: u64) -> Self {
        Instance {
            identity,
            fields: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set(&self, name: &str, value: Value) {
        self.fields.borrow_mut().insert(name.to_string(), value);
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.borrow().contains_key(name)
    }
}

/// A function or method read as a value.
///
/// All overloads sharing the name travel together; the call picks one from
/// the runtime argument types. A method read through an instance carries
/// that instance as its receiver.
pub struct Callable {
    pub name: String,
    pub candidates: Vec<Rc<Executable>>,
    pub receiver: Option<Value>,
}

#[derive(Clone)]
pub struct Value {
    ty: Type,
    payload: Payload,
}

impl Value {
    pub fn new(ty: Type, payload: Payload) -> Self {
        Value { ty, payload }
    }

    pub fn void(builtins: &Builtins) -> Self {
        Value::new(builtins.void.clone(), Payload::Void)
    }

    pub fn null(builtins: &Builtins) -> Self {
        Value::new(builtins.null.clone(), Payload::Null)
    }

    pub fn int(builtins: &Builtins, value: i64) -> Self {
        Value::new(builtins.int.clone(), Payload::Int(value))
    }

    pub fn float(builtins: &Builtins, value: f64) -> Self {
        Value::new(builtins.float.clone(), Payload::Float(value))
    }

    pub fn boolean(builtins: &Builtins, value: bool) -> Self {
        Value::new(builtins.boolean.clone(), Payload::Bool(value))
    }

    pub fn string(builtins: &Builtins, value: impl Into<Rc<str>>) -> Self {
        Value::new(builtins.string.clone(), Payload::Str(value.into()))
    }

    /// An array of the given array type.
    pub fn array(ty: Type, items: Vec<Value>) -> Self {
        Value::new(ty, Payload::Array(Rc::new(RefCell::new(items))))
    }

    pub fn reflective(of: Type) -> Self {
        Value::new(Type::reflective(of.clone()), Payload::Type(of))
    }

    pub fn function(ty: Type, callable: Callable) -> Self {
        Value::new(ty, Payload::Function(Rc::new(callable)))
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_null(&self) -> bool {
        matches!(self.payload, Payload::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.payload {
            Payload::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric value of an int or a float.
    pub fn as_number(&self) -> Option<f64> {
        match self.payload {
            #[allow(clippy::cast_precision_loss)]
            Payload::Int(v) => Some(v as f64),
            Payload::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<Ref<'_, Vec<Value>>> {
        match &self.payload {
            Payload::Array(items) => Some(items.borrow()),
            _ => None,
        }
    }

    pub fn array_handle(&self) -> Option<&Rc<RefCell<Vec<Value>>>> {
        match &self.payload {
            Payload::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Rc<Instance>> {
        match &self.payload {
            Payload::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// The type a reflective value names.
    pub fn as_type(&self) -> Option<&Type> {
        match &self.payload {
            Payload::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Rc<Callable>> {
        match &self.payload {
            Payload::Function(callable) => Some(callable),
            _ => None,
        }
    }

    /// Default equality: scalars by value, everything else by identity.
    pub fn same(&self, other: &Value) -> bool {
        match (&self.payload, &other.payload) {
            (Payload::Void, Payload::Void) | (Payload::Null, Payload::Null) => true,
            (Payload::Int(a), Payload::Int(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Payload::Float(a), Payload::Float(b)) => a == b,
            (Payload::Bool(a), Payload::Bool(b)) => a == b,
            (Payload::Str(a), Payload::Str(b)) => a == b,
            (Payload::Array(a), Payload::Array(b)) => Rc::ptr_eq(a, b),
            (Payload::Instance(a), Payload::Instance(b)) => a.identity == b.identity,
            (Payload::Type(a), Payload::Type(b)) => a == b,
            (Payload::Function(a), Payload::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Identity of an array while it is being rendered.
pub(crate) type ArrayKey = *const RefCell<Vec<Value>>;

/// How an array renders inside its own rendering.
pub const CYCLE_MARKER: &str = "[...]";

impl Value {
    /// Plain rendering; `open` holds the arrays whose rendering is in
    /// progress.
    fn write_plain(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<ArrayKey>) -> fmt::Result {
        match &self.payload {
            Payload::Void => f.write_str("void"),
            Payload::Null => f.write_str("null"),
            Payload::Int(v) => write!(f, "{v}"),
            Payload::Float(v) => write!(f, "{v:?}"),
            Payload::Bool(v) => write!(f, "{v}"),
            Payload::Str(s) => f.write_str(s),
            Payload::Array(items) => {
                let key = Rc::as_ptr(items);
                if open.contains(&key) {
                    return f.write_str(CYCLE_MARKER);
                }
                open.push(key);
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.write_plain(f, open)?;
                }
                open.pop();
                f.write_str("]")
            }
            Payload::Instance(_) => write!(f, "{}", self.ty),
            Payload::Type(ty) => write!(f, "{ty}"),
            Payload::Function(callable) => write!(f, "function {}", callable.name),
        }
    }
}

/// Plain rendering without user `toString` overrides.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_plain(f, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Str(s) => write!(f, "{s:?}: {}", self.ty),
            _ => write!(f, "{self}: {}", self.ty),
        }
    }
}
