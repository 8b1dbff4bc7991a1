//! Execution contexts.
//!
//! Every call gets a fresh [`CallFrame`]: a stack of block scopes seeded
//! with the parameters, plus the type and instance the callee runs in.
//! Frames do not see each other's variables; module globals live on the
//! interpreter.

use rustc_hash::FxHashMap;
use tarn_types::Type;

use crate::Value;

pub struct CallFrame {
    scopes: Vec<FxHashMap<String, Value>>,
    /// Owner of a static member, or the receiver's type.
    pub current_type: Option<Type>,
    pub instance: Option<Value>,
}

impl CallFrame {
    pub fn new(current_type: Option<Type>, instance: Option<Value>) -> Self {
        CallFrame {
            scopes: vec![FxHashMap::default()],
            current_type,
            instance,
        }
    }

    /// Frame for module-level code.
    pub fn global() -> Self {
        CallFrame::new(None, None)
    }

    /// Frame for a static member of `owner`, or a free function when `None`.
    pub fn in_type(owner: Option<Type>) -> Self {
        CallFrame::new(owner, None)
    }

    /// Frame for an instance member running on `receiver`.
    pub fn on_instance(receiver: Value) -> Self {
        CallFrame::new(Some(receiver.ty().clone()), Some(receiver))
    }
}

#[derive(Default)]
pub struct Environment {
    frames: Vec<CallFrame>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push_call(&mut self, frame: CallFrame) {
        self.frames.push(frame);
    }

    pub fn pop_call(&mut self) {
        self.frames.pop();
    }

    pub fn push_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.scopes.push(FxHashMap::default());
        }
    }

    pub fn pop_scope(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            if frame.scopes.len() > 1 {
                frame.scopes.pop();
            }
        }
    }

    /// Bind `name` in the innermost scope, shadowing outer bindings.
    pub fn define(&mut self, name: &str, value: Value) {
        if let Some(scope) = self.frames.last_mut().and_then(|f| f.scopes.last_mut()) {
            scope.insert(name.to_string(), value);
        }
    }

    /// Update the innermost existing binding. Returns `false` when the
    /// current frame has none.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        match frame.scopes.iter_mut().rev().find(|s| s.contains_key(name)) {
            Some(scope) => {
                scope.insert(name.to_string(), value);
                true
            }
            None => false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        let frame = self.frames.last()?;
        frame
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).cloned())
    }

    pub fn current_type(&self) -> Option<&Type> {
        self.frames.last()?.current_type.as_ref()
    }

    pub fn instance(&self) -> Option<&Value> {
        self.frames.last()?.instance.as_ref()
    }
}
