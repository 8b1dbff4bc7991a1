//! Free functions: output, input and conversions.

use super::helpers::{require_arg, require_str_arg};
use super::NativeRegistry;
use crate::errors::invalid_native_argument;
use crate::{EvalResult, Interpreter, Value};

pub(super) fn register(registry: &mut NativeRegistry) {
    registry.register("print", "void print(object... values)", print);
    registry.register("str", "string str(object value)", to_str);
    registry.register("parseInt", "int parseInt(string text)", parse_int);
    registry.register("readLine", "string readLine(string? prompt)", read_line);
}

/// Print the rendered values separated by spaces, then a newline.
fn print(interp: &mut Interpreter<'_>, _this: Option<&Value>, args: &[Value]) -> EvalResult {
    let values = require_arg("print", args, 0)?;
    let line = match values.as_array().map(|items| items.clone()) {
        Some(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in &items {
                parts.push(interp.stringify(item)?);
            }
            parts.join(" ")
        }
        None => interp.stringify(values)?,
    };
    interp.print_handler().println(&line);
    Ok(Value::void(interp.builtins()))
}

fn to_str(interp: &mut Interpreter<'_>, _this: Option<&Value>, args: &[Value]) -> EvalResult {
    let rendered = interp.stringify(require_arg("str", args, 0)?)?;
    Ok(Value::string(interp.builtins(), rendered))
}

fn parse_int(interp: &mut Interpreter<'_>, _this: Option<&Value>, args: &[Value]) -> EvalResult {
    let text = require_str_arg("parseInt", args, 0)?;
    let value = text
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid_native_argument("parseInt", format!("`{text}` is not an integer")))?;
    Ok(Value::int(interp.builtins(), value))
}

/// Show `prompt` without a newline, if given, then read one line.
fn read_line(interp: &mut Interpreter<'_>, _this: Option<&Value>, args: &[Value]) -> EvalResult {
    if let Some(prompt) = args.first().and_then(Value::as_str) {
        interp.print_handler().print(prompt);
    }
    let line = interp.input().read_line();
    Ok(Value::string(interp.builtins(), line))
}
