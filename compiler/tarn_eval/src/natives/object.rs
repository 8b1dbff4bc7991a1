//! Members every type inherits from `object`.

use super::helpers::{require_arg, require_this};
use super::NativeRegistry;
use crate::{EvalResult, Interpreter, Value};

/// Symbol of the inherited `toString`; output formatting skips it in
/// favour of the plain rendering.
pub const OBJECT_TO_STRING: &str = "object.toString";

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register(
        "object.compare",
        "operator int compare(object other)",
        object_compare,
    );
    registry.register(OBJECT_TO_STRING, "string toString()", object_to_string);
}

/// Default equality: `0` for the same value, `1` otherwise. Values of
/// unrelated types never order.
fn object_compare(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let this = require_this("object.compare", this)?;
    let other = require_arg("object.compare", args, 0)?;
    Ok(Value::int(interp.builtins(), i64::from(!this.same(other))))
}

fn object_to_string(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let this = require_this(OBJECT_TO_STRING, this)?;
    let rendered = interp.stringify(this)?;
    Ok(Value::string(interp.builtins(), rendered))
}
