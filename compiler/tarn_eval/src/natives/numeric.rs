//! Operators of `int` and `float`.
//!
//! Integer arithmetic is checked: overflow raises an invalid-argument fault
//! instead of wrapping. A zero divisor faults for `/`, `%` and `//` on both
//! types. Mixed `int`/`float` operands widen to `float`.

use super::helpers::{
    compare_floats, expect_int, expect_number, ordering_to_int, require_int_arg,
    require_number_arg, require_this,
};
use super::NativeRegistry;
use crate::errors::{division_by_zero, invalid_native_argument};
use crate::{EvalResult, Interpreter, RuntimeFault, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Arith {
    Add,
    Subtract,
    Multiply,
    Modulo,
    Power,
    IntDivide,
}

impl Arith {
    const ALL: [Arith; 6] = [
        Arith::Add,
        Arith::Subtract,
        Arith::Multiply,
        Arith::Modulo,
        Arith::Power,
        Arith::IntDivide,
    ];

    const fn name(self) -> &'static str {
        match self {
            Arith::Add => "add",
            Arith::Subtract => "subtract",
            Arith::Multiply => "multiply",
            Arith::Modulo => "modulo",
            Arith::Power => "power",
            Arith::IntDivide => "intDivide",
        }
    }

    const fn divides(self) -> bool {
        matches!(self, Arith::Modulo | Arith::IntDivide)
    }
}

pub(super) fn register(registry: &mut NativeRegistry) {
    for op in Arith::ALL {
        register_int_arith(registry, op);
        register_mixed_arith(registry, op);
        register_float_arith(registry, op);
    }

    registry.register("int.divide", "operator float divide(int other)", int_divide);
    registry.register(
        "int.divide_float",
        "operator float divide(float other)",
        int_divide,
    );
    registry.register("int.compare", "operator int compare(int other)", int_compare);
    registry.register(
        "int.compare_float",
        "operator int compare(float other)",
        number_compare,
    );
    registry.register("int.negative", "operator int negative()", int_negative);
    registry.register("int.positive", "operator int positive()", positive);
    registry.register("int.range", "operator array<int> range(int other)", int_range);

    registry.register(
        "float.divide",
        "operator float divide(int | float other)",
        float_divide,
    );
    registry.register(
        "float.compare",
        "operator int compare(int | float other)",
        number_compare,
    );
    registry.register("float.negative", "operator float negative()", float_negative);
    registry.register("float.positive", "operator float positive()", positive);
    registry.register("float.round", "int round()", float_round);
    registry.register("float.floor", "int floor()", float_floor);
}

/// `int op int`, staying in `int`.
fn register_int_arith(registry: &mut NativeRegistry, op: Arith) {
    let name = op.name();
    let symbol = format!("int.{name}");
    let signature = format!("operator int {name}(int other)");
    let key = symbol.clone();
    registry.register(&key, &signature, move |interp, this, args| {
        let a = expect_int(&symbol, require_this(&symbol, this)?)?;
        let b = require_int_arg(&symbol, args, 0)?;
        Ok(Value::int(interp.builtins(), int_arith(&symbol, op, a, b)?))
    });
}

/// `int op float`, widening to `float`.
fn register_mixed_arith(registry: &mut NativeRegistry, op: Arith) {
    let name = op.name();
    let symbol = format!("int.{name}_float");
    let signature = format!("operator float {name}(float other)");
    let key = symbol.clone();
    registry.register(&key, &signature, move |interp, this, args| {
        let a = expect_number(&symbol, require_this(&symbol, this)?)?;
        let b = require_number_arg(&symbol, args, 0)?;
        Ok(Value::float(interp.builtins(), float_arith(op, a, b)?))
    });
}

/// `float op (int | float)`.
fn register_float_arith(registry: &mut NativeRegistry, op: Arith) {
    let name = op.name();
    let symbol = format!("float.{name}");
    let signature = format!("operator float {name}(int | float other)");
    let key = symbol.clone();
    registry.register(&key, &signature, move |interp, this, args| {
        let a = expect_number(&symbol, require_this(&symbol, this)?)?;
        let b = require_number_arg(&symbol, args, 0)?;
        Ok(Value::float(interp.builtins(), float_arith(op, a, b)?))
    });
}

fn int_arith(symbol: &str, op: Arith, a: i64, b: i64) -> Result<i64, RuntimeFault> {
    if op.divides() && b == 0 {
        return Err(division_by_zero());
    }
    let result = match op {
        Arith::Add => a.checked_add(b),
        Arith::Subtract => a.checked_sub(b),
        Arith::Multiply => a.checked_mul(b),
        Arith::Modulo => a.checked_rem(b),
        Arith::IntDivide => floor_div(a, b),
        Arith::Power => {
            let exponent = u32::try_from(b).map_err(|_| {
                invalid_native_argument(symbol, format!("exponent {b} is out of range"))
            })?;
            a.checked_pow(exponent)
        }
    };
    result.ok_or_else(|| invalid_native_argument(symbol, "integer overflow"))
}

/// Division rounding towards negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

fn float_arith(op: Arith, a: f64, b: f64) -> Result<f64, RuntimeFault> {
    if op.divides() && b == 0.0 {
        return Err(division_by_zero());
    }
    Ok(match op {
        Arith::Add => a + b,
        Arith::Subtract => a - b,
        Arith::Multiply => a * b,
        Arith::Modulo => a % b,
        Arith::Power => a.powf(b),
        Arith::IntDivide => (a / b).floor(),
    })
}

fn int_divide(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let a = expect_number("int.divide", require_this("int.divide", this)?)?;
    let b = require_number_arg("int.divide", args, 0)?;
    if b == 0.0 {
        return Err(division_by_zero());
    }
    Ok(Value::float(interp.builtins(), a / b))
}

fn float_divide(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let a = expect_number("float.divide", require_this("float.divide", this)?)?;
    let b = require_number_arg("float.divide", args, 0)?;
    if b == 0.0 {
        return Err(division_by_zero());
    }
    Ok(Value::float(interp.builtins(), a / b))
}

fn int_compare(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let a = expect_int("int.compare", require_this("int.compare", this)?)?;
    let b = require_int_arg("int.compare", args, 0)?;
    Ok(Value::int(interp.builtins(), ordering_to_int(a.cmp(&b))))
}

/// Comparison with at least one `float` side.
fn number_compare(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let a = expect_number("compare", require_this("compare", this)?)?;
    let b = require_number_arg("compare", args, 0)?;
    Ok(Value::int(interp.builtins(), compare_floats(a, b)))
}

fn int_negative(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let a = expect_int("int.negative", require_this("int.negative", this)?)?;
    let negated = a
        .checked_neg()
        .ok_or_else(|| invalid_native_argument("int.negative", "integer overflow"))?;
    Ok(Value::int(interp.builtins(), negated))
}

fn float_negative(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let a = expect_number("float.negative", require_this("float.negative", this)?)?;
    Ok(Value::float(interp.builtins(), -a))
}

fn positive(_interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    require_this("positive", this).cloned()
}

/// `a..b`: the ints from `a` up to, not including, `b`.
fn int_range(interp: &mut Interpreter<'_>, this: Option<&Value>, args: &[Value]) -> EvalResult {
    let start = expect_int("int.range", require_this("int.range", this)?)?;
    let end = require_int_arg("int.range", args, 0)?;
    let builtins = interp.builtins();
    let items = (start..end).map(|i| Value::int(builtins, i)).collect();
    let ty = interp.table().array_of(builtins.int.clone());
    Ok(Value::array(ty, items))
}

fn float_round(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let a = expect_number("float.round", require_this("float.round", this)?)?;
    Ok(Value::int(interp.builtins(), float_to_int("float.round", a.round())?))
}

fn float_floor(interp: &mut Interpreter<'_>, this: Option<&Value>, _args: &[Value]) -> EvalResult {
    let a = expect_number("float.floor", require_this("float.floor", this)?)?;
    Ok(Value::int(interp.builtins(), float_to_int("float.floor", a.floor())?))
}

/// An integral float as an int, rejecting NaN, infinities and values
/// outside the `i64` range.
#[allow(clippy::cast_possible_truncation)]
fn float_to_int(symbol: &str, value: f64) -> Result<i64, RuntimeFault> {
    // 2^63 is exact in f64; the valid range is [-2^63, 2^63).
    let bound = 2.0_f64.powi(63);
    if !value.is_finite() || value >= bound || value < -bound {
        return Err(invalid_native_argument(
            symbol,
            format!("{value:?} is out of range for int"),
        ));
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::{float_to_int, floor_div};

    #[test]
    fn floor_div_rounds_down() {
        assert_eq!(floor_div(7, 2), Some(3));
        assert_eq!(floor_div(-7, 2), Some(-4));
        assert_eq!(floor_div(7, -2), Some(-4));
        assert_eq!(floor_div(-7, -2), Some(3));
        assert_eq!(floor_div(i64::MIN, -1), None);
    }

    #[test]
    fn float_to_int_rejects_non_finite() {
        assert_eq!(float_to_int("t", 3.0).ok(), Some(3));
        assert!(float_to_int("t", f64::NAN).is_err());
        assert!(float_to_int("t", f64::INFINITY).is_err());
        assert!(float_to_int("t", 1e19).is_err());
    }
}
