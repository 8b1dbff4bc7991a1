//! Argument validation shared by the core natives.

use std::cmp::Ordering;

use crate::errors::{invalid_native_argument, no_receiver};
use crate::{RuntimeFault, Value};

#[inline]
pub fn require_this<'a>(symbol: &str, this: Option<&'a Value>) -> Result<&'a Value, RuntimeFault> {
    this.ok_or_else(|| no_receiver(symbol))
}

#[inline]
pub fn require_arg<'a>(symbol: &str, args: &'a [Value], index: usize) -> Result<&'a Value, RuntimeFault> {
    args.get(index)
        .ok_or_else(|| invalid_native_argument(symbol, format!("missing argument {}", index + 1)))
}

#[inline]
pub fn expect_int(symbol: &str, value: &Value) -> Result<i64, RuntimeFault> {
    value
        .as_int()
        .ok_or_else(|| wrong_type(symbol, "int", value))
}

/// An int or a float, widened to `f64`.
#[inline]
pub fn expect_number(symbol: &str, value: &Value) -> Result<f64, RuntimeFault> {
    value
        .as_number()
        .ok_or_else(|| wrong_type(symbol, "int | float", value))
}

#[inline]
pub fn expect_str<'a>(symbol: &str, value: &'a Value) -> Result<&'a str, RuntimeFault> {
    value
        .as_str()
        .ok_or_else(|| wrong_type(symbol, "string", value))
}

#[inline]
pub fn expect_bool(symbol: &str, value: &Value) -> Result<bool, RuntimeFault> {
    value
        .as_bool()
        .ok_or_else(|| wrong_type(symbol, "boolean", value))
}

#[inline]
pub fn require_int_arg(symbol: &str, args: &[Value], index: usize) -> Result<i64, RuntimeFault> {
    expect_int(symbol, require_arg(symbol, args, index)?)
}

#[inline]
pub fn require_number_arg(symbol: &str, args: &[Value], index: usize) -> Result<f64, RuntimeFault> {
    expect_number(symbol, require_arg(symbol, args, index)?)
}

#[inline]
pub fn require_str_arg<'a>(symbol: &str, args: &'a [Value], index: usize) -> Result<&'a str, RuntimeFault> {
    expect_str(symbol, require_arg(symbol, args, index)?)
}

#[inline]
pub fn require_bool_arg(symbol: &str, args: &[Value], index: usize) -> Result<bool, RuntimeFault> {
    expect_bool(symbol, require_arg(symbol, args, index)?)
}

/// Position `index` in a sequence of `len` elements, or an out-of-bounds
/// fault.
pub fn checked_index(index: i64, len: usize) -> Result<usize, RuntimeFault> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| crate::errors::index_out_of_bounds(index, len))
}

/// Length as an int; sequences never get near `i64::MAX`.
pub fn len_to_int(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// The `compare` protocol result: negative, zero or positive.
pub fn ordering_to_int(ordering: Ordering) -> i64 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Float ordering; unordered operands (NaN) compare as unequal.
pub fn compare_floats(a: f64, b: f64) -> i64 {
    a.partial_cmp(&b).map_or(1, ordering_to_int)
}

fn wrong_type(symbol: &str, expected: &str, found: &Value) -> RuntimeFault {
    invalid_native_argument(symbol, format!("expected `{expected}`, found `{}`", found.ty()))
}
