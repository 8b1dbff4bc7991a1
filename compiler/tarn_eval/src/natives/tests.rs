#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::rc::Rc;

use tarn_diagnostic::ErrorCode;

use super::NativeRegistry;
use crate::errors::invalid_native_argument;
use crate::tests::run_hosted;
use crate::{EvalConfig, FaultPolicy, Value, OBJECT_TO_STRING};

fn void(interp: &mut crate::Interpreter<'_>, _this: Option<&Value>, _args: &[Value]) -> crate::EvalResult {
    Ok(Value::void(interp.builtins()))
}

#[test]
fn registering_again_replaces_in_place() {
    let mut registry = NativeRegistry::new();
    assert!(registry.is_empty());
    registry.register("first", "void first()", void);
    registry.register("second", "void second()", void);
    registry.register("first", "int first()", void);

    assert_eq!(registry.len(), 2);
    let decls = registry.decls();
    let symbols: Vec<_> = decls.iter().map(|d| d.symbol.as_str()).collect();
    assert_eq!(symbols, ["first", "second"]);
    assert_eq!(decls[0].signature, "int first()");
    assert!(registry.contains("second"));
    assert!(registry.callback("third").is_none());
}

#[test]
fn core_natives_cover_the_builtin_types() {
    let registry = NativeRegistry::with_core();
    for symbol in [
        OBJECT_TO_STRING,
        "object.compare",
        "int.add",
        "int.add_float",
        "float.compare",
        "string.add",
        "string.charAt",
        "boolean.not",
        "array.at",
        "array.put",
        "array.iterate",
        "print",
        "readLine",
    ] {
        assert!(registry.contains(symbol), "missing {symbol}");
    }
}

#[test]
fn host_natives_are_callable_from_programs() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&calls);

    let mut registry = NativeRegistry::with_core();
    registry.register(
        "shout",
        "string shout(string text, int times = 1)",
        move |interp, _this, args| {
            let text = args[0].as_str().unwrap_or_default().to_uppercase();
            let times = args[1].as_int();
            seen.borrow_mut().push(times);
            let times = usize::try_from(times.unwrap_or(1))
                .map_err(|_| invalid_native_argument("shout", "negative count"))?;
            Ok(Value::string(interp.builtins(), text.repeat(times)))
        },
    );

    let outcome = run_hosted(
        "main {\n  print(shout(\"hi\"), shout(\"yo\", 2))\n  shout(\"x\", -1)\n}",
        &registry,
        EvalConfig::default(),
        &[],
    );
    assert_eq!(outcome.output, "HI YOYO\n");
    assert_eq!(*calls.borrow(), [None, Some(2), Some(-1)]);
    let codes: Vec<_> = outcome.faults.iter().map(|f| f.code()).collect();
    assert_eq!(codes, [ErrorCode::E6012]);
}

#[test]
fn missing_callbacks_fault() {
    let outcome = run_hosted(
        "native function int answer()\nmain {\n  print(answer())\n}",
        &NativeRegistry::with_core(),
        EvalConfig {
            fault_policy: FaultPolicy::Propagate,
            ..EvalConfig::default()
        },
        &[],
    );
    assert_eq!(outcome.result.unwrap_err().code(), ErrorCode::E6009);
}
