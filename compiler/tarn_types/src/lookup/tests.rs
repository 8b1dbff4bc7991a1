#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use tarn_ir::{BinaryOp, Modifiers, UnaryOp};

use crate::test_support::{class, field, method, param};
use crate::{Type, TypeTable};

#[test]
fn members_include_supertype_chain() {
    let table = TypeTable::new();
    let b = table.builtins();
    let to_string = method(&b.object, Modifiers::empty(), "toString", &b.string, vec![]);
    let point = class(&table, "Point");
    field(&point, Modifiers::empty(), "x", &b.int);

    let names: Vec<String> = point.members().iter().map(|m| m.name().to_string()).collect();
    assert_eq!(names, ["x", "toString"]);
    assert!(Rc::ptr_eq(&point.methods_named("toString")[0], &to_string));
    assert!(point.field_named("x").is_some());
    assert!(point.field_named("y").is_none());
}

#[test]
fn reflective_type_exposes_statics_only() {
    let table = TypeTable::new();
    let b = table.builtins();
    let counter = class(&table, "Counter");
    field(&counter, Modifiers::STATIC, "count", &b.int);
    field(&counter, Modifiers::empty(), "step", &b.int);

    let reflective = Type::reflective(counter.clone());
    assert!(reflective.field_named("count").is_some());
    assert!(reflective.field_named("step").is_none());
    assert_eq!(reflective.receiver_view(), counter);
}

#[test]
fn binary_operator_swaps_only_bidirectional() {
    let table = TypeTable::new();
    let b = table.builtins();
    let a_ty = class(&table, "A");
    let b_ty = class(&table, "B");
    let add = method(&a_ty, Modifiers::OPERATOR, "add", &a_ty, vec![param("other", &b_ty)]);
    method(&a_ty, Modifiers::OPERATOR, "subtract", &a_ty, vec![param("other", &b_ty)]);
    method(&a_ty, Modifiers::OPERATOR, "multiply", &b.int, vec![param("other", &b_ty)]);

    let direct = table.binary_operator(&a_ty, BinaryOp::Add, &b_ty).unwrap();
    assert!(!direct.swapped);
    assert!(Rc::ptr_eq(&direct.method, &add));

    let swapped = table.binary_operator(&b_ty, BinaryOp::Add, &a_ty).unwrap();
    assert!(swapped.swapped);
    assert!(Rc::ptr_eq(&swapped.method, &add));
    assert!(table.binary_operator(&b_ty, BinaryOp::Mul, &a_ty).is_some());

    assert!(table.binary_operator(&a_ty, BinaryOp::Sub, &b_ty).is_some());
    assert!(table.binary_operator(&b_ty, BinaryOp::Sub, &a_ty).is_none());
}

#[test]
fn operator_requires_modifier() {
    let table = TypeTable::new();
    let point = class(&table, "Point");
    method(&point, Modifiers::empty(), "add", &point, vec![param("other", &point)]);
    assert!(table.binary_operator(&point, BinaryOp::Add, &point).is_none());
}

#[test]
fn comparisons_share_compare() {
    let table = TypeTable::new();
    let b = table.builtins();
    let version = class(&table, "Version");
    method(&version, Modifiers::OPERATOR, "compare", &b.int, vec![param("other", &version)]);
    for op in [
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::LtEq,
        BinaryOp::GtEq,
        BinaryOp::Eq,
        BinaryOp::NotEq,
    ] {
        let found = table.binary_operator(&version, op, &version).unwrap();
        assert_eq!(found.method.name, "compare");
    }
}

#[test]
fn unary_operator_takes_no_arguments() {
    let table = TypeTable::new();
    let b = table.builtins();
    let vector = class(&table, "Vector");
    method(&vector, Modifiers::OPERATOR, "negative", &vector, vec![param("x", &b.int)]);
    assert!(table.unary_operator(&vector, UnaryOp::Neg).is_none());
    method(&vector, Modifiers::OPERATOR, "negative", &vector, vec![]);
    assert!(table.unary_operator(&vector, UnaryOp::Neg).is_some());
}

#[test]
fn generic_members_resolve_through_view() {
    let table = TypeTable::new();
    let b = table.builtins();
    let element = b.array_element.clone();
    method(&b.array, Modifiers::empty(), "add", &b.void, vec![param("value", &element)]);
    method(
        &b.array,
        Modifiers::GET | Modifiers::INDEXER,
        "at",
        &element,
        vec![param("index", &b.int)],
    );

    let ints = table.array_of(b.int.clone());
    let add = ints.methods_named("add").remove(0);
    assert!(table.accepts(&add, &[b.int.clone()], Some(&ints)));
    assert!(!table.accepts(&add, &[b.string.clone()], Some(&ints)));

    let getter = table.index_getter(&ints, &b.int).unwrap();
    assert_eq!(table.return_type(&getter, &ints), b.int);
    assert!(table.index_getter(&ints, &b.string).is_none());
}

#[test]
fn protocols_match_by_modifier_and_arity() {
    let table = TypeTable::new();
    let b = table.builtins();
    let bag = class(&table, "Bag");
    method(
        &bag,
        Modifiers::ACCESSOR,
        "read",
        &b.object,
        vec![param("name", &b.string)],
    );
    method(
        &bag,
        Modifiers::ASSIGNER,
        "write",
        &b.void,
        vec![param("name", &b.string), param("value", &b.int)],
    );
    method(
        &bag,
        Modifiers::SET | Modifiers::INDEXER,
        "put",
        &b.void,
        vec![param("key", &b.string), param("value", &b.int)],
    );
    method(
        &bag,
        Modifiers::ITERATOR,
        "items",
        &table.array_of(b.int.clone()),
        vec![],
    );
    method(
        &bag,
        Modifiers::INVOKER,
        "call",
        &b.int,
        vec![param("x", &b.int)],
    );

    assert_eq!(table.accessor(&bag).unwrap().name, "read");
    assert!(table.assigner(&bag, &b.int).is_some());
    assert!(table.assigner(&bag, &b.string).is_none());
    assert!(table.index_setter(&bag, &b.string, &b.int).is_some());
    assert!(table.index_setter(&bag, &b.int, &b.int).is_none());
    assert!(table.index_getter(&bag, &b.string).is_none());
    assert_eq!(table.iterator(&bag).unwrap().name, "items");
    assert!(table.invoker(&bag, &[b.int.clone()]).is_some());
    assert!(table.invoker(&bag, &[]).is_none());
}

#[test]
fn constructors_are_not_inherited() {
    let table = TypeTable::new();
    let point = class(&table, "Point");
    assert!(point.constructors().is_empty());
    assert!(table.object().constructors().is_empty());
}
