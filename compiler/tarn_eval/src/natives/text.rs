//! Members of `string` and `boolean`.

use super::helpers::{
    checked_index, expect_bool, expect_str, len_to_int, ordering_to_int, require_arg,
    require_bool_arg, require_int_arg, require_str_arg, require_this,
};
use super::NativeRegistry;
use crate::errors::invalid_native_argument;
use crate::{EvalResult, Interpreter, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("string.add", "operator string add(object other)", string_add);
    registry.register(
        "string.multiply",
        "operator string multiply(int count)",
        string_multiply,
    );
    registry.register(
        "string.compare",
        "operator int compare(string other)",
        string_compare,
    );
    registry.register("string.length", "int length()", string_length);
    registry.register("string.charArray", "array<string> charArray()", string_char_array);
    registry.register("string.toLowerCase", "string toLowerCase()", string_to_lower);
    registry.register("string.toUpperCase", "string toUpperCase()", string_to_upper);
    registry.register(
        "string.contains",
        "boolean contains(string part)",
        string_contains,
    );
    registry.register(
        "string.charAt",
        "get indexer string charAt(int index)",
        string_char_at,
    );

    registry.register(
        "boolean.and",
        "operator boolean and(boolean other)",
        boolean_and,
    );
    registry.register("boolean.or", "operator boolean or(boolean other)", boolean_or);
    registry.register("boolean.not", "operator boolean not()", boolean_not);
    registry.register(
        "boolean.compare",
        "operator int compare(boolean other)",
        boolean_compare,
    );
}

fn this_str<'a>(symbol: &str, this: Option<&'a Value>) -> Result<&'a str, crate::RuntimeFault> {
    expect_str(symbol, require_this(symbol, this)?)
}

/// Concatenation; the right operand is rendered the way `print` would.
fn string_add(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let left = this_str("string.add", this)?;
    let right = interp.stringify(require_arg("string.add", args, 0)?)?;
    Ok(Value::string(interp.builtins(), format!("{left}{right}")))
}

fn string_multiply(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let text = this_str("string.multiply", this)?;
    let count = require_int_arg("string.multiply", args, 0)?;
    let count = usize::try_from(count).map_err(|_| {
        invalid_native_argument("string.multiply", format!("negative repeat count {count}"))
    })?;
    Ok(Value::string(interp.builtins(), text.repeat(count)))
}

fn string_compare(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let left = this_str("string.compare", this)?;
    let right = require_str_arg("string.compare", args, 0)?;
    Ok(Value::int(interp.builtins(), ordering_to_int(left.cmp(right))))
}

/// Length in characters.
fn string_length(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let text = this_str("string.length", this)?;
    Ok(Value::int(interp.builtins(), len_to_int(text.chars().count())))
}

fn string_char_array(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let text = this_str("string.charArray", this)?;
    let builtins = interp.builtins();
    let chars = text
        .chars()
        .map(|c| Value::string(builtins, c.to_string()))
        .collect();
    let ty = interp.table().array_of(builtins.string.clone());
    Ok(Value::array(ty, chars))
}

fn string_to_lower(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let text = this_str("string.toLowerCase", this)?;
    Ok(Value::string(interp.builtins(), text.to_lowercase()))
}

fn string_to_upper(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let text = this_str("string.toUpperCase", this)?;
    Ok(Value::string(interp.builtins(), text.to_uppercase()))
}

fn string_contains(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let text = this_str("string.contains", this)?;
    let part = require_str_arg("string.contains", args, 0)?;
    Ok(Value::boolean(interp.builtins(), text.contains(part)))
}

/// `text[i]`: the character at position `i`, as a one-character string.
fn string_char_at(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let text = this_str("string.charAt", this)?;
    let index = require_int_arg("string.charAt", args, 0)?;
    let len = text.chars().count();
    let position = checked_index(index, len)?;
    let c = text.chars().nth(position).unwrap_or_default();
    Ok(Value::string(interp.builtins(), c.to_string()))
}

fn boolean_and(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let a = expect_bool("boolean.and", require_this("boolean.and", this)?)?;
    let b = require_bool_arg("boolean.and", args, 0)?;
    Ok(Value::boolean(interp.builtins(), a && b))
}

fn boolean_or(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let a = expect_bool("boolean.or", require_this("boolean.or", this)?)?;
    let b = require_bool_arg("boolean.or", args, 0)?;
    Ok(Value::boolean(interp.builtins(), a || b))
}

fn boolean_not(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let a = expect_bool("boolean.not", require_this("boolean.not", this)?)?;
    Ok(Value::boolean(interp.builtins(), !a))
}

fn boolean_compare(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let a = expect_bool("boolean.compare", require_this("boolean.compare", this)?)?;
    let b = require_bool_arg("boolean.compare", args, 0)?;
    Ok(Value::int(interp.builtins(), i64::from(a != b)))
}
