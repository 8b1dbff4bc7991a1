//! Members of `array<T>`.

use std::cell::RefCell;
use std::rc::Rc;

use super::helpers::{
    checked_index, len_to_int, require_arg, require_int_arg, require_str_arg, require_this,
};
use super::NativeRegistry;
use crate::errors::type_mismatch;
use crate::{EvalResult, Interpreter, RuntimeFault, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("array.add", "void add(T item)", array_add);
    registry.register("array.at", "get indexer T at(int index)", array_at);
    registry.register(
        "array.put",
        "set indexer void put(int index, T value)",
        array_put,
    );
    registry.register("array.length", "int length()", array_length);
    registry.register("array.iterate", "iterator array<T> iterate()", array_iterate);
    registry.register("array.removeAt", "T removeAt(int index)", array_remove_at);
    registry.register("array.join", "string join(string separator)", array_join);
}

fn this_items<'a>(
    interp: &Interpreter<'_>,
    symbol: &str,
    this: Option<&'a Value>,
) -> Result<&'a Rc<RefCell<Vec<Value>>>, RuntimeFault> {
    let this = require_this(symbol, this)?;
    this.array_handle()
        .ok_or_else(|| type_mismatch(&interp.builtins().array, this))
}

fn array_add(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let items = this_items(interp, "array.add", this)?;
    let item = require_arg("array.add", args, 0)?;
    items.borrow_mut().push(item.clone());
    Ok(Value::void(interp.builtins()))
}

fn array_at(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let items = this_items(interp, "array.at", this)?;
    let index = require_int_arg("array.at", args, 0)?;
    let items = items.borrow();
    let position = checked_index(index, items.len())?;
    Ok(items[position].clone())
}

fn array_put(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let items = this_items(interp, "array.put", this)?;
    let index = require_int_arg("array.put", args, 0)?;
    let value = require_arg("array.put", args, 1)?;
    let mut items = items.borrow_mut();
    let position = checked_index(index, items.len())?;
    items[position] = value.clone();
    Ok(Value::void(interp.builtins()))
}

fn array_length(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let items = this_items(interp, "array.length", this)?;
    let len = items.borrow().len();
    Ok(Value::int(interp.builtins(), len_to_int(len)))
}

/// A snapshot of the elements; later changes to the array do not affect a
/// loop already running over it.
fn array_iterate(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let items = this_items(interp, "array.iterate", this)?;
    let snapshot = items.borrow().clone();
    let ty = require_this("array.iterate", this)?.ty().clone();
    Ok(Value::array(ty, snapshot))
}

fn array_remove_at(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let items = this_items(interp, "array.removeAt", this)?;
    let index = require_int_arg("array.removeAt", args, 0)?;
    let mut items = items.borrow_mut();
    let position = checked_index(index, items.len())?;
    Ok(items.remove(position))
}

fn array_join(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let items = this_items(interp, "array.join", this)?.borrow().clone();
    let separator = require_str_arg("array.join", args, 0)?;
    let mut parts = Vec::with_capacity(items.len());
    for item in &items {
        parts.push(interp.stringify(item)?);
    }
    Ok(Value::string(interp.builtins(), parts.join(separator)))
}
