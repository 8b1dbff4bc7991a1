//! The native bridge.
//!
//! A [`NativeRegistry`] pairs each host callback with a symbol and a member
//! signature written in Tarn syntax. The checker bakes the signatures into
//! the type table before any unit is indexed; the interpreter calls the
//! callback whenever it reaches a bodiless member carrying that symbol.
//!
//! Callbacks receive the receiver (for members) and the bound parameter
//! values: a vararg parameter arrives as one array, an omitted optional
//! parameter as `null`.

mod array;
mod helpers;
mod io;
mod numeric;
mod object;
mod text;

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tarn_types::NativeDecl;

use crate::{EvalResult, Interpreter, Value};

pub use object::OBJECT_TO_STRING;

/// A host callback: interpreter, optional receiver, bound arguments.
pub type NativeFn = Rc<dyn Fn(&mut Interpreter<'_>, Option<&Value>, &[Value]) -> EvalResult>;

struct NativeEntry {
    symbol: String,
    signature: String,
    callback: NativeFn,
}

/// Host callbacks keyed by symbol, in registration order.
#[derive(Default)]
pub struct NativeRegistry {
    entries: Vec<NativeEntry>,
    index: FxHashMap<String, usize>,
}

impl NativeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        NativeRegistry::default()
    }

    /// The natives every Tarn program can use.
    pub fn with_core() -> Self {
        let mut registry = NativeRegistry::new();
        object::register(&mut registry);
        numeric::register(&mut registry);
        text::register(&mut registry);
        array::register(&mut registry);
        io::register(&mut registry);
        tracing::debug!(natives = registry.len(), "core natives registered");
        registry
    }

    /// Add a native. Registering a symbol again replaces the earlier
    /// callback and signature in place.
    pub fn register<F>(&mut self, symbol: &str, signature: &str, callback: F)
    where
        F: Fn(&mut Interpreter<'_>, Option<&Value>, &[Value]) -> EvalResult + 'static,
    {
        let entry = NativeEntry {
            symbol: symbol.to_string(),
            signature: signature.to_string(),
            callback: Rc::new(callback),
        };
        match self.index.get(symbol) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.index.insert(symbol.to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Declarations for the checker, in registration order.
    pub fn decls(&self) -> Vec<NativeDecl> {
        self.entries
            .iter()
            .map(|entry| NativeDecl::new(entry.symbol.clone(), entry.signature.clone()))
            .collect()
    }

    pub fn callback(&self, symbol: &str) -> Option<NativeFn> {
        let slot = *self.index.get(symbol)?;
        self.entries.get(slot).map(|entry| Rc::clone(&entry.callback))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.symbol))
            .finish()
    }
}

#[cfg(test)]
mod tests;
