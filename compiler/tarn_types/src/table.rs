//! Registry of the types and free functions of one module graph.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{Dummy, Executable, PrimitiveKind, Type, TypeKind};

/// Types every program can name without declaring them.
pub struct Builtins {
    pub object: Type,
    pub int: Type,
    pub float: Type,
    pub string: Type,
    pub boolean: Type,
    /// Raw `array`; its single type parameter is `array_element`.
    pub array: Type,
    pub array_element: Type,
    pub void: Type,
    pub null: Type,
}

impl Builtins {
    fn new() -> Self {
        let object = Type::root_object();
        let array_element = Type::type_parameter("T", 0, object.clone());
        Builtins {
            int: Type::primitive("int", PrimitiveKind::Int, &object, Vec::new()),
            float: Type::primitive("float", PrimitiveKind::Float, &object, Vec::new()),
            string: Type::primitive("string", PrimitiveKind::String, &object, Vec::new()),
            boolean: Type::primitive("boolean", PrimitiveKind::Boolean, &object, Vec::new()),
            array: Type::primitive(
                "array",
                PrimitiveKind::Array,
                &object,
                vec![array_element.clone()],
            ),
            array_element,
            void: Type::dummy(Dummy::Void),
            null: Type::dummy(Dummy::Null),
            object,
        }
    }

    fn named(&self) -> [&Type; 8] {
        [
            &self.object,
            &self.int,
            &self.float,
            &self.string,
            &self.boolean,
            &self.array,
            &self.void,
            &self.null,
        ]
    }
}

/// A host-implemented member described in Tarn's own signature syntax.
///
/// `symbol` is `owner.key` for a member of the type named `owner`, or a bare
/// key for a free function. The key only identifies the host callback; the
/// member's name comes from the signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeDecl {
    pub symbol: String,
    pub signature: String,
}

impl NativeDecl {
    pub fn new(symbol: impl Into<String>, signature: impl Into<String>) -> Self {
        NativeDecl {
            symbol: symbol.into(),
            signature: signature.into(),
        }
    }

    /// Name of the owning type, `None` for a free function.
    pub fn owner(&self) -> Option<&str> {
        self.symbol.split_once('.').map(|(owner, _)| owner)
    }
}

/// Registration counts taken by [`TypeTable::checkpoint`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    types: usize,
    functions: usize,
}

pub struct TypeTable {
    builtins: Builtins,
    types: RefCell<FxHashMap<String, Type>>,
    type_order: RefCell<Vec<Type>>,
    functions: RefCell<FxHashMap<String, Vec<Rc<Executable>>>>,
    function_order: RefCell<Vec<Rc<Executable>>>,
    instantiations: RefCell<FxHashMap<(Type, Vec<Type>), Type>>,
    composites: RefCell<FxHashMap<Composite, Type>>,
}

/// Key of an interned structural type, over already interned components.
#[derive(PartialEq, Eq, Hash)]
enum Composite {
    Optional(Type),
    /// Options sorted by address, so option order does not matter.
    Union(Vec<Type>),
    Function(Type, Vec<Type>),
    SelfType(Type),
}

impl TypeTable {
    pub fn new() -> Self {
        let builtins = Builtins::new();
        let mut types = FxHashMap::default();
        for ty in builtins.named() {
            types.insert(ty.to_string(), ty.clone());
        }
        TypeTable {
            builtins,
            types: RefCell::new(types),
            type_order: RefCell::new(Vec::new()),
            functions: RefCell::new(FxHashMap::default()),
            function_order: RefCell::new(Vec::new()),
            instantiations: RefCell::new(FxHashMap::default()),
            composites: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn object(&self) -> Type {
        self.builtins.object.clone()
    }

    pub fn type_named(&self, name: &str) -> Option<Type> {
        self.types.borrow().get(name).cloned()
    }

    /// Register a user type under its name. Returns `false` if the name is
    /// already taken, leaving the table unchanged.
    pub fn register_type(&self, ty: Type) -> bool {
        let Some(name) = ty.as_nominal().map(|n| n.name().to_string()) else {
            return false;
        };
        let mut types = self.types.borrow_mut();
        if types.contains_key(&name) {
            return false;
        }
        types.insert(name, ty.clone());
        self.type_order.borrow_mut().push(ty);
        true
    }

    /// User types in registration order.
    pub fn user_types(&self) -> Vec<Type> {
        self.type_order.borrow().clone()
    }

    pub fn register_function(&self, function: Rc<Executable>) {
        self.functions
            .borrow_mut()
            .entry(function.name.clone())
            .or_default()
            .push(Rc::clone(&function));
        self.function_order.borrow_mut().push(function);
    }

    pub fn functions_named(&self, name: &str) -> Vec<Rc<Executable>> {
        self.functions
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.borrow().contains_key(name)
    }

    /// Whether this exact function object is registered.
    pub fn contains_function(&self, function: &Rc<Executable>) -> bool {
        self.functions
            .borrow()
            .get(&function.name)
            .is_some_and(|list| list.iter().any(|f| Rc::ptr_eq(f, function)))
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            types: self.type_order.borrow().len(),
            functions: self.function_order.borrow().len(),
        }
    }

    /// Unregister every type and free function registered since `to`.
    pub fn rollback(&self, to: Checkpoint) {
        let removed_types = {
            let mut order = self.type_order.borrow_mut();
            let at = to.types.min(order.len());
            order.split_off(at)
        };
        let mut types = self.types.borrow_mut();
        for ty in &removed_types {
            if let Some(nominal) = ty.as_nominal() {
                types.remove(nominal.name());
            }
        }

        let removed_functions = {
            let mut order = self.function_order.borrow_mut();
            let at = to.functions.min(order.len());
            order.split_off(at)
        };
        let mut functions = self.functions.borrow_mut();
        for function in &removed_functions {
            if let Some(overloads) = functions.get_mut(&function.name) {
                overloads.retain(|f| !Rc::ptr_eq(f, function));
                if overloads.is_empty() {
                    functions.remove(&function.name);
                }
            }
        }
    }

    /// `base<args>`, interned so equal instantiations are identical.
    pub fn parameterized(&self, base: &Type, args: Vec<Type>) -> Type {
        let args: Vec<Type> = args.iter().map(|arg| self.intern(arg)).collect();
        let key = (base.clone(), args);
        if let Some(ty) = self.instantiations.borrow().get(&key) {
            return ty.clone();
        }
        let ty = Type::parameterized_raw(key.0.clone(), key.1.clone());
        self.instantiations.borrow_mut().insert(key, ty.clone());
        ty
    }

    fn composite(&self, key: Composite, make: impl FnOnce() -> Type) -> Type {
        if let Some(ty) = self.composites.borrow().get(&key) {
            return ty.clone();
        }
        let ty = make();
        self.composites.borrow_mut().insert(key, ty.clone());
        ty
    }

    /// `inner?`, interned.
    pub fn optional_of(&self, inner: &Type) -> Type {
        let inner = self.intern(inner);
        self.composite(Composite::Optional(inner.clone()), || {
            Type::optional(inner)
        })
    }

    /// Union of `options`, flattened, deduplicated and interned. `int | string`
    /// and `string | int` are the same type; the first spelling names it.
    pub fn union_of(&self, options: impl IntoIterator<Item = Type>) -> Type {
        let union = Type::union(options.into_iter().map(|option| self.intern(&option)));
        let TypeKind::Union(members) = union.kind() else {
            return union;
        };
        let mut key = members.clone();
        key.sort_by_key(Type::as_ptr);
        self.composite(Composite::Union(key), || union.clone())
    }

    /// `(params) => ret`, interned.
    pub fn function_of(&self, ret: &Type, params: &[Type]) -> Type {
        let ret = self.intern(ret);
        let params: Vec<Type> = params.iter().map(|p| self.intern(p)).collect();
        self.composite(Composite::Function(ret.clone(), params.clone()), || {
            Type::function(ret, params)
        })
    }

    /// `this` inside `class`, interned.
    pub fn self_type_of(&self, class: &Type) -> Type {
        self.composite(Composite::SelfType(class.clone()), || {
            Type::self_type(class.clone())
        })
    }

    /// The interned handle structurally equal to `ty`. Nominal types, type
    /// parameters and dummies are their own canonical handle.
    pub fn intern(&self, ty: &Type) -> Type {
        match ty.kind() {
            TypeKind::Parameterized { base, args } => self.parameterized(base, args.clone()),
            TypeKind::Union(options) => self.union_of(options.iter().cloned()),
            TypeKind::Optional(inner) => self.optional_of(inner),
            TypeKind::Function { ret, params } => self.function_of(ret, params),
            TypeKind::SelfType(class) => self.self_type_of(class),
            _ => ty.clone(),
        }
    }

    pub fn array_of(&self, element: Type) -> Type {
        self.parameterized(&self.builtins.array, vec![element])
    }

    /// Element type of an array type; `object` for a raw array.
    pub fn element_type(&self, array: &Type) -> Option<Type> {
        match array.kind() {
            TypeKind::Parameterized { base, args } if *base == self.builtins.array => {
                args.first().cloned()
            }
            _ if *array == self.builtins.array => Some(self.object()),
            _ => None,
        }
    }

    /// Rewrite `this` to `view` and type parameters to the arguments of
    /// `view`. On a raw view a type parameter becomes its bound.
    pub fn resolve(&self, ty: &Type, view: &Type) -> Type {
        if !ty.needs_resolution() {
            return ty.clone();
        }
        match ty.kind() {
            TypeKind::SelfType(_) => view.clone(),
            TypeKind::TypeParameter { index, bound, .. } => match view.kind() {
                TypeKind::Parameterized { args, .. } => {
                    args.get(*index).cloned().unwrap_or_else(|| bound.clone())
                }
                _ => bound.clone(),
            },
            TypeKind::Parameterized { base, args } => {
                let args = args.iter().map(|arg| self.resolve(arg, view)).collect();
                self.parameterized(base, args)
            }
            TypeKind::Union(options) => {
                self.union_of(options.iter().map(|option| self.resolve(option, view)))
            }
            TypeKind::Optional(inner) => self.optional_of(&self.resolve(inner, view)),
            TypeKind::Function { ret, params } => {
                let params: Vec<Type> = params.iter().map(|p| self.resolve(p, view)).collect();
                self.function_of(&self.resolve(ret, view), &params)
            }
            _ => ty.clone(),
        }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
