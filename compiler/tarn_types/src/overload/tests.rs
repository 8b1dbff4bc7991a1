use std::rc::Rc;

use crate::test_support::{defaulted, function, param, vararg};
use crate::{Type, TypeTable};

#[test]
fn defaults_and_varargs() {
    let table = TypeTable::new();
    let b = table.builtins();
    let f = function(
        "f",
        &b.void,
        vec![
            param("a", &b.int),
            defaulted("b", &b.string),
            vararg("rest", &b.int),
        ],
    );
    let (int, string) = (b.int.clone(), b.string.clone());

    assert!(table.accepts(&f, &[int.clone()], None));
    assert!(table.accepts(&f, &[int.clone(), string.clone()], None));
    assert!(table.accepts(
        &f,
        &[int.clone(), string.clone(), int.clone(), int.clone()],
        None
    ));
    assert!(!table.accepts(&f, &[int.clone(), string.clone(), string.clone()], None));
    assert!(!table.accepts(&f, &[], None));
}

#[test]
fn optional_parameters_may_be_omitted() {
    let table = TypeTable::new();
    let b = table.builtins();
    let f = function(
        "readLine",
        &b.string,
        vec![param("prompt", &Type::optional(b.string.clone()))],
    );
    assert!(table.accepts(&f, &[], None));
    assert!(table.accepts(&f, &[b.string.clone()], None));
    assert!(table.accepts(&f, &[b.null.clone()], None));
    assert!(!table.accepts(&f, &[b.int.clone()], None));
}

#[test]
fn extra_arguments_are_rejected() {
    let table = TypeTable::new();
    let b = table.builtins();
    let f = function("f", &b.void, vec![param("a", &b.int)]);
    assert!(!table.accepts(&f, &[b.int.clone(), b.int.clone()], None));
}

#[test]
fn select_prefers_exact_arity() {
    let table = TypeTable::new();
    let b = table.builtins();
    let three = function(
        "add",
        &b.int,
        vec![param("a", &b.int), param("b", &b.int), defaulted("c", &b.int)],
    );
    let two = function("add", &b.int, vec![param("a", &b.int), param("b", &b.int)]);
    let candidates = vec![Rc::clone(&three), Rc::clone(&two)];
    let args = [b.int.clone(), b.int.clone()];

    let chosen = table.select(&candidates, &args, None);
    assert!(chosen.is_some_and(|f| Rc::ptr_eq(&f, &two)));

    let args = [b.int.clone(), b.int.clone(), b.int.clone()];
    let chosen = table.select(&candidates, &args, None);
    assert!(chosen.is_some_and(|f| Rc::ptr_eq(&f, &three)));

    assert!(table.select(&candidates, &[b.string.clone()], None).is_none());
}

#[test]
fn select_falls_back_to_declaration_order() {
    let table = TypeTable::new();
    let b = table.builtins();
    let first = function("log", &b.void, vec![vararg("values", &b.object)]);
    let second = function("log", &b.void, vec![vararg("values", &b.int)]);
    let candidates = vec![Rc::clone(&first), second];
    let chosen = table.select(&candidates, &[b.int.clone()], None);
    assert!(chosen.is_some_and(|f| Rc::ptr_eq(&f, &first)));
}
