//! The tree-walking interpreter.
//!
//! An [`Interpreter`] runs [`Program`]s produced by the IR generator against
//! the [`TypeTable`] the checker populated. Member bodies, field
//! initializers and parameter defaults are reached through the table's
//! members; calls, operators and protocol methods are resolved from the
//! runtime types of the operands with the same lookups the checker used.
//!
//! # Faults
//!
//! Statements complete with a [`Completion`]. Under
//! [`FaultPolicy::Continue`] a block that sees a fault logs and records it,
//! then finishes as if it had completed normally, so execution resumes after
//! that block in the enclosing one. Under [`FaultPolicy::Propagate`] the
//! fault unwinds to the host.

mod builder;
mod call;
mod expr;
mod stmt;

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tarn_canon::{Module, Program};
use tarn_types::{Builtins, PrimitiveKind, Type, TypeTable};

use crate::environment::{CallFrame, Environment};
use crate::errors::no_overload;
use crate::input::SharedInputHandler;
use crate::value::{ArrayKey, CYCLE_MARKER};
use crate::{
    EvalConfig, EvalResult, FaultPolicy, NativeRegistry, RuntimeFault, SharedPrintHandler, Value,
};

pub use builder::InterpreterBuilder;
pub(crate) use stmt::Completion;

pub struct Interpreter<'t> {
    table: &'t TypeTable,
    natives: &'t NativeRegistry,
    config: EvalConfig,
    print_handler: SharedPrintHandler,
    input: SharedInputHandler,
    env: Environment,
    globals: FxHashMap<String, Value>,
    statics: FxHashMap<Type, FxHashMap<String, Value>>,
    faults: Vec<RuntimeFault>,
    next_identity: u64,
}

impl<'t> Interpreter<'t> {
    pub fn builder(table: &'t TypeTable, natives: &'t NativeRegistry) -> InterpreterBuilder<'t> {
        InterpreterBuilder::new(table, natives)
    }

    pub fn table(&self) -> &'t TypeTable {
        self.table
    }

    pub fn builtins(&self) -> &'t Builtins {
        self.table.builtins()
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn input(&self) -> &SharedInputHandler {
        &self.input
    }

    /// Faults swallowed by blocks so far, oldest first.
    pub fn faults(&self) -> &[RuntimeFault] {
        &self.faults
    }

    pub fn take_faults(&mut self) -> Vec<RuntimeFault> {
        std::mem::take(&mut self.faults)
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).cloned()
    }

    /// Make the classes and globals of `program` available: static fields
    /// first, in class order, then module globals in declaration order.
    #[tracing::instrument(level = "debug", skip_all, fields(program = %program.name))]
    pub fn include(&mut self, program: &Program) -> Result<(), RuntimeFault> {
        for class in &program.classes {
            let defaults: FxHashMap<String, Value> = class
                .declared_fields()
                .iter()
                .filter(|field| field.is_static())
                .map(|field| (field.name.clone(), self.default_value(&field.ty)))
                .collect();
            self.statics.entry(class.clone()).or_default().extend(defaults);
        }
        for global in &program.globals {
            let value = self.default_value(&global.ty);
            self.globals.entry(global.name.clone()).or_insert(value);
        }

        for class in &program.classes {
            for field in class.declared_fields().iter().filter(|f| f.is_static()) {
                let Some(init) = field.init.get() else {
                    continue;
                };
                let frame = CallFrame::in_type(Some(class.clone()));
                match self.with_call(frame, |this| this.eval_expr(init)) {
                    Ok(value) => self.set_static(class, &field.name, value),
                    Err(fault) => self.recover(fault.at(field.span))?,
                }
            }
        }
        for global in &program.globals {
            let Some(init) = &global.init else {
                continue;
            };
            match self.with_call(CallFrame::global(), |this| this.eval_expr(init)) {
                Ok(value) => {
                    self.globals.insert(global.name.clone(), value);
                }
                Err(fault) => self.recover(fault.at(global.span))?,
            }
        }
        tracing::debug!(
            classes = program.classes.len(),
            globals = program.globals.len(),
            "included"
        );
        Ok(())
    }

    pub fn include_module(&mut self, module: &Module) -> Result<(), RuntimeFault> {
        for program in &module.programs {
            self.include(program)?;
        }
        Ok(())
    }

    /// Include `program` and run its `main` block, if it has one.
    #[tracing::instrument(level = "debug", skip_all, fields(program = %program.name))]
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeFault> {
        self.include(program)?;
        let Some(main) = &program.main else {
            return Ok(());
        };
        let completion = self.with_call(CallFrame::global(), |this| Ok(this.exec_body(main)))?;
        match completion {
            Completion::Fault(fault) => Err(fault),
            Completion::Normal | Completion::Return(_) => Ok(()),
        }
    }

    /// Call the free function `name` with host-supplied arguments.
    pub fn call_function(&mut self, name: &str, args: Vec<Value>) -> EvalResult {
        let functions = self.table.functions_named(name);
        let arg_types = types_of(&args);
        match self.table.select(&functions, &arg_types, None) {
            Some(function) => self.invoke(&function, None, args),
            None => Err(no_overload(name, &args)),
        }
    }

    /// Render a value for output, using a class's own `toString` when it
    /// declares one.
    /// An array nested inside itself renders as [`CYCLE_MARKER`].
    pub fn stringify(&mut self, value: &Value) -> Result<String, RuntimeFault> {
        self.stringify_nested(value, &mut Vec::new())
    }

    fn stringify_nested(
        &mut self,
        value: &Value,
        open: &mut Vec<ArrayKey>,
    ) -> Result<String, RuntimeFault> {
        if let Some(handle) = value.array_handle() {
            let key = Rc::as_ptr(handle);
            if open.contains(&key) {
                return Ok(CYCLE_MARKER.to_string());
            }
            let items = handle.borrow().clone();
            open.push(key);
            let mut parts = Vec::with_capacity(items.len());
            for item in &items {
                parts.push(self.stringify_nested(item, open)?);
            }
            open.pop();
            return Ok(format!("[{}]", parts.join(", ")));
        }
        if value.as_instance().is_some() {
            let own = value.ty().methods_named("toString").into_iter().find(|m| {
                m.params.is_empty()
                    && !m.is_static()
                    && m.native.as_deref() != Some(crate::natives::OBJECT_TO_STRING)
            });
            if let Some(method) = own {
                let rendered = self.invoke(&method, Some(value.clone()), Vec::new())?;
                return Ok(rendered.to_string());
            }
        }
        Ok(value.to_string())
    }

    /// Value a field, global or array slot of type `ty` holds before it is
    /// assigned.
    pub fn default_value(&self, ty: &Type) -> Value {
        let builtins = self.builtins();
        match ty.primitive_kind() {
            Some(PrimitiveKind::Int) => Value::int(builtins, 0),
            Some(PrimitiveKind::Float) => Value::float(builtins, 0.0),
            Some(PrimitiveKind::String) => Value::string(builtins, ""),
            Some(PrimitiveKind::Boolean) => Value::boolean(builtins, false),
            Some(PrimitiveKind::Array) => Value::array(ty.clone(), Vec::new()),
            None => Value::null(builtins),
        }
    }

    /// Handle a fault outside any block: record it under
    /// [`FaultPolicy::Continue`], hand it back otherwise.
    fn recover(&mut self, fault: RuntimeFault) -> Result<(), RuntimeFault> {
        match self.config.fault_policy {
            FaultPolicy::Continue => {
                self.record(fault);
                Ok(())
            }
            FaultPolicy::Propagate => Err(fault),
        }
    }

    fn record(&mut self, fault: RuntimeFault) {
        tracing::error!(code = %fault.code(), span = ?fault.span, "{}", fault.kind);
        self.faults.push(fault);
    }

    /// Run `f` in a new call frame, enforcing the call depth limit.
    pub(crate) fn with_call<T>(
        &mut self,
        frame: CallFrame,
        f: impl FnOnce(&mut Self) -> Result<T, RuntimeFault>,
    ) -> Result<T, RuntimeFault> {
        if self.env.depth() >= self.config.max_call_depth {
            return Err(crate::errors::call_depth_exceeded(self.config.max_call_depth));
        }
        self.env.push_call(frame);
        let result = tarn_stack::ensure_sufficient_stack(|| f(self));
        self.env.pop_call();
        result
    }

    pub(crate) fn static_value(&self, owner: &Type, name: &str) -> Option<Value> {
        self.statics.get(owner)?.get(name).cloned()
    }

    pub(crate) fn set_static(&mut self, owner: &Type, name: &str, value: Value) {
        self.statics
            .entry(owner.clone())
            .or_default()
            .insert(name.to_string(), value);
    }

    pub(crate) fn fresh_identity(&mut self) -> u64 {
        self.next_identity += 1;
        self.next_identity
    }
}

pub(crate) fn types_of(values: &[Value]) -> Vec<Type> {
    values.iter().map(|v| v.ty().clone()).collect()
}
