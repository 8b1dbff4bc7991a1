//! Expression evaluation.

use std::rc::Rc;

use tarn_ir::canon::{Expr, ExprKind, Literal, Segment};
use tarn_ir::{BinaryOp, UnaryOp};
use tarn_types::{Executable, Type};

use super::{types_of, Interpreter};
use crate::errors::{
    no_operator, no_receiver, null_receiver, type_mismatch, unknown_member, unknown_variable,
};
use crate::value::Callable;
use crate::{EvalResult, RuntimeFault, Value};

impl Interpreter<'_> {
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        tarn_stack::ensure_sufficient_stack(|| self.eval_expr_inner(expr))
            .map_err(|fault| fault.at(expr.span))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        let builtins = self.builtins();
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(match literal {
                Literal::Int(v) => Value::int(builtins, *v),
                Literal::Float(v) => Value::float(builtins, *v),
                Literal::Bool(v) => Value::boolean(builtins, *v),
                Literal::Str(s) => Value::string(builtins, Rc::clone(s)),
                Literal::Null => Value::null(builtins),
            }),
            ExprKind::Interpolate(segments) => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => out.push_str(text),
                        Segment::Expr(inner) => {
                            let value = self.eval_expr(inner)?;
                            out.push_str(&self.stringify(&value)?);
                        }
                    }
                }
                Ok(Value::string(builtins, out))
            }
            ExprKind::Array(elements) => {
                let items = elements
                    .iter()
                    .map(|element| self.eval_expr(element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(self.array_literal_type(&items), items))
            }
            ExprKind::Var(name) => self.lookup_name(name),
            ExprKind::This => self
                .env
                .instance()
                .cloned()
                .ok_or_else(|| no_receiver("this")),
            ExprKind::Field { object, name } => {
                let object = self.eval_expr(object)?;
                self.read_field(&object, name)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval_expr(object)?;
                let index = self.eval_expr(index)?;
                self.read_index(&object, index)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                if let Some(short) = short_circuit(*op, &left) {
                    return Ok(Value::boolean(builtins, short));
                }
                let right = self.eval_expr(right)?;
                self.binary(*op, left, right)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                self.unary(*op, operand)
            }
        }
    }

    /// `array<T>` when every element has the same runtime type, raw `array`
    /// otherwise.
    fn array_literal_type(&self, items: &[Value]) -> Type {
        match items.split_first() {
            Some((first, rest)) if rest.iter().all(|item| item.ty() == first.ty()) => {
                self.table.array_of(first.ty().clone())
            }
            _ => self.builtins().array.clone(),
        }
    }

    /// A bare name as a value: a local, a module global, a field of the
    /// current type, a free function, then a type.
    pub(crate) fn lookup_name(&mut self, name: &str) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        if let Some(value) = self.globals.get(name) {
            return Ok(value.clone());
        }

        let field = self.env.current_type().and_then(|ty| ty.field_named(name));
        if let Some(field) = field {
            if field.is_static() {
                if let Some(value) = field.owner().and_then(|owner| self.static_value(&owner, name))
                {
                    return Ok(value);
                }
            } else if let Some(value) = self
                .env
                .instance()
                .and_then(Value::as_instance)
                .and_then(|instance| instance.get(name))
            {
                return Ok(value);
            }
        }

        let functions = self.table.functions_named(name);
        if !functions.is_empty() {
            return Ok(self.function_value(name, functions, None));
        }
        if let Some(ty) = self.table.type_named(name) {
            return Ok(Value::reflective(ty));
        }
        Err(unknown_variable(name))
    }

    /// Overloads sharing `name`, optionally bound to a receiver, as one
    /// callable value.
    pub(crate) fn function_value(
        &self,
        name: &str,
        candidates: Vec<Rc<Executable>>,
        receiver: Option<Value>,
    ) -> Value {
        let view = receiver.as_ref().map(|r| r.ty().receiver_view());
        let ty = self.table.union_of(candidates.iter().map(|exec| {
            let ty = exec.function_type();
            match &view {
                Some(view) => self.table.resolve(&ty, view),
                None => ty,
            }
        }));
        Value::function(
            ty,
            Callable {
                name: name.to_string(),
                candidates,
                receiver,
            },
        )
    }

    /// `object.name`: a static field, a method as a bound value, the type's
    /// accessor, then a declared instance field. With an accessor declared,
    /// instance fields are only reached by bare name inside the class.
    pub(crate) fn read_field(&mut self, object: &Value, name: &str) -> EvalResult {
        if object.is_null() {
            return Err(null_receiver(name));
        }
        if let Some(of) = object.as_type() {
            return self.read_static(of, name);
        }

        let field = object.ty().field_named(name);
        if let Some(field) = field.as_ref().filter(|f| f.is_static()) {
            return self.read_static(&field.owner().unwrap_or_else(|| object.ty().clone()), name);
        }

        let methods = object.ty().methods_named(name);
        if !methods.is_empty() {
            let (statics, instance): (Vec<_>, Vec<_>) =
                methods.into_iter().partition(|m| m.is_static());
            return Ok(if instance.is_empty() {
                self.function_value(name, statics, None)
            } else {
                self.function_value(name, instance, Some(object.clone()))
            });
        }

        if let Some(accessor) = self.table.accessor(object.ty()) {
            let key = Value::string(self.builtins(), name);
            return self.invoke(&accessor, Some(object.clone()), vec![key]);
        }
        if field.is_some() {
            if let Some(value) = object.as_instance().and_then(|instance| instance.get(name)) {
                return Ok(value);
            }
        }
        Err(unknown_member(object.ty(), name))
    }

    fn read_static(&mut self, owner: &Type, name: &str) -> EvalResult {
        if let Some(field) = owner.field_named(name).filter(|f| f.is_static()) {
            let owner = field.owner().unwrap_or_else(|| owner.clone());
            return Ok(self
                .static_value(&owner, name)
                .unwrap_or_else(|| self.default_value(&field.ty)));
        }
        let statics: Vec<_> = owner
            .methods_named(name)
            .into_iter()
            .filter(|m| m.is_static())
            .collect();
        if statics.is_empty() {
            return Err(unknown_member(owner, name));
        }
        Ok(self.function_value(name, statics, None))
    }

    /// `object.name = value`: a static field, an assigner accepting `value`,
    /// then a declared instance field.
    pub(crate) fn write_field(&mut self, object: &Value, name: &str, value: Value) -> Result<(), RuntimeFault> {
        if object.is_null() {
            return Err(null_receiver(name));
        }
        let declared_on = object.as_type().unwrap_or(object.ty()).clone();
        let field = declared_on.field_named(name);

        if let Some(field) = field.as_ref().filter(|f| f.is_static()) {
            let owner = field.owner().unwrap_or(declared_on);
            self.set_static(&owner, name, value);
            return Ok(());
        }
        if object.as_type().is_some() {
            return Err(unknown_member(&declared_on, name));
        }

        if let Some(assigner) = self.table.assigner(object.ty(), value.ty()) {
            let key = Value::string(self.builtins(), name);
            self.invoke(&assigner, Some(object.clone()), vec![key, value])?;
            return Ok(());
        }
        if let (Some(_), Some(instance)) = (field, object.as_instance()) {
            instance.set(name, value);
            return Ok(());
        }
        Err(unknown_member(&declared_on, name))
    }

    pub(crate) fn read_index(&mut self, object: &Value, index: Value) -> EvalResult {
        if object.is_null() {
            return Err(null_receiver("[]"));
        }
        match self.table.index_getter(object.ty(), index.ty()) {
            Some(getter) => self.invoke(&getter, Some(object.clone()), vec![index]),
            None => Err(no_operator("[]", &[object, &index])),
        }
    }

    pub(crate) fn write_index(&mut self, object: &Value, index: Value, value: Value) -> Result<(), RuntimeFault> {
        if object.is_null() {
            return Err(null_receiver("[]"));
        }
        match self.table.index_setter(object.ty(), index.ty(), value.ty()) {
            Some(setter) => {
                self.invoke(&setter, Some(object.clone()), vec![index, value])?;
                Ok(())
            }
            None => Err(no_operator("[]=", &[object, &index, &value])),
        }
    }

    /// `left op right` through the operator method of either operand.
    ///
    /// Comparisons turn the `compare` result into a boolean; a method found
    /// on the right operand sees the operands the other way round, so its
    /// ordering is negated.
    pub(crate) fn binary(&mut self, op: BinaryOp, left: Value, right: Value) -> EvalResult {
        let builtins = self.builtins();
        let Some(found) = self.table.binary_operator(left.ty(), op, right.ty()) else {
            if matches!(op, BinaryOp::Eq | BinaryOp::NotEq) && (left.is_null() || right.is_null()) {
                let ordering = i64::from(!left.same(&right));
                return Ok(Value::boolean(builtins, op.compare_holds(ordering)));
            }
            return Err(no_operator(op, &[&left, &right]));
        };

        let (receiver, argument) = if found.swapped {
            (right, left)
        } else {
            (left, right)
        };
        let result = self.invoke(&found.method, Some(receiver), vec![argument])?;
        if !op.is_comparison() {
            return Ok(result);
        }
        let ordering = result
            .as_int()
            .ok_or_else(|| type_mismatch(&builtins.int, &result))?;
        let ordering = if found.swapped {
            ordering.saturating_neg()
        } else {
            ordering
        };
        Ok(Value::boolean(builtins, op.compare_holds(ordering)))
    }

    fn unary(&mut self, op: UnaryOp, operand: Value) -> EvalResult {
        match self.table.unary_operator(operand.ty(), op) {
            Some(method) => self.invoke(&method, Some(operand), Vec::new()),
            None => Err(no_operator(op, &[&operand])),
        }
    }

    /// Arguments of a call, left to right.
    pub(crate) fn eval_args(&mut self, args: &[Expr]) -> Result<(Vec<Value>, Vec<Type>), RuntimeFault> {
        let values = args
            .iter()
            .map(|arg| self.eval_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let types = types_of(&values);
        Ok((values, types))
    }
}

/// Result of `&&` or `||` when the left operand alone decides it.
fn short_circuit(op: BinaryOp, left: &Value) -> Option<bool> {
    match (op, left.as_bool()?) {
        (BinaryOp::And, false) => Some(false),
        (BinaryOp::Or, true) => Some(true),
        _ => None,
    }
}
