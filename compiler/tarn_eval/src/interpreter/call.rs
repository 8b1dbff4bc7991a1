//! Calls: overload dispatch, argument binding, constructors and natives.

use std::rc::Rc;

use tarn_ir::canon::{Callee, Expr};
use tarn_types::{Executable, Type, TypeKind};

use super::{Completion, Interpreter};
use crate::environment::CallFrame;
use crate::errors::{
    native_missing, no_overload, no_receiver, not_callable, null_receiver, unknown_member,
    unknown_variable,
};
use crate::{EvalResult, Payload, RuntimeFault, Value};

impl Interpreter<'_> {
    pub(crate) fn eval_call(&mut self, callee: &Callee, args: &[Expr]) -> EvalResult {
        match callee {
            Callee::Name(name) => {
                let (args, arg_types) = self.eval_args(args)?;
                self.call_name(name, args, &arg_types)
            }
            Callee::Member { object, name } => {
                let object = self.eval_expr(object)?;
                let (args, arg_types) = self.eval_args(args)?;
                self.call_member(&object, name, args, &arg_types)
            }
            Callee::Value(callee) => {
                let callee = self.eval_expr(callee)?;
                let (args, _) = self.eval_args(args)?;
                self.call_value(&callee, args)
            }
        }
    }

    /// `name(args)`: a callable local or global, a method of the current
    /// type, a free function, then a constructor of the type called `name`.
    fn call_name(&mut self, name: &str, args: Vec<Value>, arg_types: &[Type]) -> EvalResult {
        let local = self
            .env
            .lookup(name)
            .or_else(|| self.globals.get(name).cloned());
        if let Some(local) = local {
            return self.call_value(&local, args);
        }

        let mut tried = false;
        if let Some(current) = self.env.current_type().cloned() {
            let methods = current.methods_named(name);
            if let Some(method) = self.table.select(&methods, arg_types, Some(&current)) {
                if method.is_static() {
                    return self.invoke(&method, None, args);
                }
                let receiver = self.env.instance().cloned();
                if receiver.is_none() {
                    return Err(no_receiver(name));
                }
                return self.invoke(&method, receiver, args);
            }
            tried |= !methods.is_empty();
        }

        let functions = self.table.functions_named(name);
        if let Some(function) = self.table.select(&functions, arg_types, None) {
            return self.invoke(&function, None, args);
        }
        tried |= !functions.is_empty();

        if let Some(ty) = self.table.type_named(name) {
            let constructors = ty.constructors();
            if let Some(ctor) = self.table.select(&constructors, arg_types, Some(&ty)) {
                return self.construct(&ty, &ctor, args);
            }
            tried |= !constructors.is_empty();
        }

        if tried {
            Err(no_overload(name, &args))
        } else {
            Err(unknown_variable(name))
        }
    }

    /// `object.name(args)`: a method of the receiver, or a field holding a
    /// callable value.
    fn call_member(&mut self, object: &Value, name: &str, args: Vec<Value>, arg_types: &[Type]) -> EvalResult {
        if object.is_null() {
            return Err(null_receiver(name));
        }
        let view = object.ty().receiver_view();

        let methods = object.ty().methods_named(name);
        if !methods.is_empty() {
            let Some(method) = self.table.select(&methods, arg_types, Some(&view)) else {
                return Err(no_overload(name, &args));
            };
            let receiver = (!method.is_static()).then(|| object.clone());
            return self.invoke(&method, receiver, args);
        }

        if object.ty().field_named(name).is_some() {
            let callee = self.read_field(object, name)?;
            return self.call_value(&callee, args);
        }
        Err(unknown_member(object.ty(), name))
    }

    /// Call a value: a function value picks among its overloads, anything
    /// else goes through its type's invoker.
    pub(crate) fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        let arg_types = super::types_of(&args);
        if let Payload::Function(callable) = callee.payload() {
            let view = callable.receiver.as_ref().map(|r| r.ty().receiver_view());
            let Some(method) = self
                .table
                .select(&callable.candidates, &arg_types, view.as_ref())
            else {
                return Err(no_overload(&callable.name, &args));
            };
            let receiver = if method.is_static() {
                None
            } else {
                callable.receiver.clone()
            };
            return self.invoke(&method, receiver, args);
        }

        if callee.is_null() {
            return Err(null_receiver("()"));
        }
        match self.table.invoker(callee.ty(), &arg_types) {
            Some(invoker) => self.invoke(&invoker, Some(callee.clone()), args),
            None => Err(not_callable(callee.ty())),
        }
    }

    /// Run `exec` with already-selected arguments.
    ///
    /// Instance members need `receiver`; static members and free functions
    /// ignore it apart from passing it to a native callback.
    pub(crate) fn invoke(&mut self, exec: &Rc<Executable>, receiver: Option<Value>, args: Vec<Value>) -> EvalResult {
        let owner = exec.owner();
        let frame = if exec.is_static() || owner.is_none() {
            CallFrame::in_type(owner.clone())
        } else {
            match &receiver {
                Some(receiver) => CallFrame::on_instance(receiver.clone()),
                None => return Err(no_receiver(&exec.name)),
            }
        };
        let view = receiver
            .as_ref()
            .map(|r| r.ty().receiver_view())
            .or(owner)
            .unwrap_or_else(|| self.table.object());

        tracing::trace!(callee = %exec.describe(), "invoke");
        self.with_call(frame, |this| {
            let bound = this.bind_params(exec, &view, args)?;
            match exec.body.get() {
                Some(body) => this.run_body(body),
                None => this.call_native(exec, receiver.as_ref(), &bound),
            }
        })
    }

    fn run_body(&mut self, body: &tarn_ir::canon::Block) -> EvalResult {
        match self.exec_body(body) {
            Completion::Normal => Ok(Value::void(self.builtins())),
            Completion::Return(value) => Ok(value),
            Completion::Fault(fault) => Err(fault),
        }
    }

    fn call_native(&mut self, exec: &Executable, receiver: Option<&Value>, args: &[Value]) -> EvalResult {
        let symbol = match (&exec.native, exec.owner()) {
            (Some(symbol), _) => symbol.clone(),
            (None, Some(owner)) => format!("{owner}.{}", exec.name),
            (None, None) => exec.name.clone(),
        };
        let Some(callback) = self.natives.callback(&symbol) else {
            return Err(native_missing(&symbol));
        };
        callback(self, receiver, args)
    }

    /// Bind arguments to the parameters of `exec` in the current frame and
    /// return the bound values in parameter order.
    ///
    /// Trailing arguments collect into the vararg array. An omitted
    /// optional parameter is `null`; any other omitted parameter takes its
    /// default, evaluated after the parameters before it are bound.
    fn bind_params(&mut self, exec: &Executable, view: &Type, args: Vec<Value>) -> Result<Vec<Value>, RuntimeFault> {
        let mut args = args.into_iter();
        let mut bound = Vec::with_capacity(exec.params.len());
        for param in &exec.params {
            let value = if param.vararg {
                let element = self.table.resolve(&param.ty, view);
                Value::array(self.table.array_of(element), args.by_ref().collect())
            } else if let Some(arg) = args.next() {
                arg
            } else if matches!(param.ty.kind(), TypeKind::Optional(_)) {
                Value::null(self.builtins())
            } else if let Some(default) = param.default.get() {
                self.eval_expr(default)?
            } else {
                Value::null(self.builtins())
            };
            self.env.define(&param.name, value.clone());
            bound.push(value);
        }
        Ok(bound)
    }

    /// Create an instance of `ty` and run `ctor` on it.
    ///
    /// Instance fields are initialised in declaration order before the
    /// parameters are bound; `this.name` parameters are copied into their
    /// fields before the body runs.
    #[tracing::instrument(level = "trace", skip_all, fields(class = %ty))]
    pub(crate) fn construct(&mut self, ty: &Type, ctor: &Rc<Executable>, args: Vec<Value>) -> EvalResult {
        let instance = Value::new(
            ty.clone(),
            Payload::Instance(Rc::new(crate::Instance::new(self.fresh_identity()))),
        );
        let frame = CallFrame::on_instance(instance.clone());
        self.with_call(frame, |this| {
            this.init_fields(ty, &instance)?;
            let bound = this.bind_params(ctor, ty, args)?;
            if let Some(fields) = instance.as_instance() {
                for (param, value) in ctor.params.iter().zip(bound) {
                    if param.auto_assign {
                        fields.set(&param.name, value);
                    }
                }
            }
            if let Some(body) = ctor.body.get() {
                this.run_body(body)?;
            }
            Ok(())
        })?;
        Ok(instance)
    }

    /// Instance fields of `ty` and its superclasses, supertype first.
    fn init_fields(&mut self, ty: &Type, instance: &Value) -> Result<(), RuntimeFault> {
        if let Some(supertype) = ty.as_nominal().and_then(|n| n.supertype()).cloned() {
            self.init_fields(&supertype, instance)?;
        }
        let Some(fields) = instance.as_instance() else {
            return Ok(());
        };
        for field in ty.declared_fields().iter().filter(|f| !f.is_static()) {
            let value = match field.init.get() {
                Some(init) => self.eval_expr(init)?,
                None => self.default_value(&field.ty),
            };
            fields.set(&field.name, value);
        }
        Ok(())
    }
}
