use pretty_assertions::assert_eq;

use crate::test_support::{class, function};
use crate::{NativeDecl, Type, TypeTable};

#[test]
fn builtins_are_registered_by_name() {
    let table = TypeTable::new();
    for name in ["object", "int", "float", "string", "boolean", "array", "void", "null"] {
        let ty = table.type_named(name);
        assert_eq!(ty.map(|t| t.to_string()).as_deref(), Some(name));
    }
    assert!(table.object().is_object());
    assert!(!table.builtins().int.is_object());
    assert!(table.user_types().is_empty());
}

#[test]
fn duplicate_type_names_are_rejected() {
    let table = TypeTable::new();
    let point = class(&table, "Point");
    let again = Type::class("Point", &table.object(), Vec::new());
    assert!(!table.register_type(again));
    assert_eq!(table.type_named("Point"), Some(point));
    assert!(!table.register_type(Type::class("int", &table.object(), Vec::new())));
}

#[test]
fn functions_keep_overloads() {
    let table = TypeTable::new();
    let b = table.builtins();
    table.register_function(function("f", &b.void, vec![]));
    table.register_function(function("f", &b.int, vec![]));
    assert_eq!(table.functions_named("f").len(), 2);
    assert!(table.has_function("f"));
    assert!(table.functions_named("g").is_empty());
}

#[test]
fn instantiations_are_interned() {
    let table = TypeTable::new();
    let b = table.builtins();
    let first = table.array_of(b.int.clone());
    let second = table.parameterized(&b.array, vec![b.int.clone()]);
    assert_eq!(first, second);
    assert_ne!(first, table.array_of(b.string.clone()));
    assert_eq!(first.to_string(), "array<int>");
    assert_eq!(table.element_type(&first), Some(b.int.clone()));
    assert_eq!(table.element_type(&b.array), Some(b.object.clone()));
    assert_eq!(table.element_type(&b.int), None);
}

#[test]
fn resolve_substitutes_view() {
    let table = TypeTable::new();
    let b = table.builtins();
    let t = Type::type_parameter("T", 0, b.object.clone());
    let boxed = Type::class("Box", &b.object, vec![t.clone()]);
    let box_of_int = table.parameterized(&boxed, vec![b.int.clone()]);

    assert_eq!(table.resolve(&t, &box_of_int), b.int);
    assert_eq!(table.resolve(&t, &boxed), b.object);
    assert_eq!(table.resolve(&Type::self_type(boxed.clone()), &box_of_int), box_of_int);

    let list_of_t = table.array_of(t.clone());
    assert_eq!(table.resolve(&list_of_t, &box_of_int), table.array_of(b.int.clone()));

    let maybe_t = Type::optional(t);
    assert_eq!(table.resolve(&maybe_t, &box_of_int).to_string(), "int?");
    assert_eq!(table.resolve(&b.string, &box_of_int), b.string);
}

#[test]
fn display_forms() {
    let table = TypeTable::new();
    let b = table.builtins();
    let union = Type::union([b.int.clone(), b.string.clone()]);
    assert_eq!(union.to_string(), "int | string");
    assert_eq!(Type::optional(union).to_string(), "(int | string)?");
    let f = Type::function(b.int.clone(), vec![b.int.clone(), b.string.clone()]);
    assert_eq!(f.to_string(), "(int, string) => int");
    assert_eq!(Type::reflective(b.int.clone()).to_string(), "type<int>");
    assert_eq!(Type::self_type(b.int.clone()).to_string(), "this");
}

#[test]
fn union_flattens_and_dedupes() {
    let table = TypeTable::new();
    let b = table.builtins();
    let inner = Type::union([b.int.clone(), b.string.clone()]);
    let outer = Type::union([inner, b.int.clone(), b.float.clone()]);
    assert_eq!(outer.to_string(), "int | string | float");
    assert_eq!(Type::union([b.int.clone(), b.int.clone()]), b.int);
}

#[test]
fn native_symbol_owner() {
    assert_eq!(NativeDecl::new("int.add", "operator int add(int x)").owner(), Some("int"));
    assert_eq!(NativeDecl::new("print", "void print(object... v)").owner(), None);
}

#[test]
fn structural_types_are_interned() {
    let table = TypeTable::new();
    let b = table.builtins();

    let maybe = table.optional_of(&b.int);
    assert_eq!(maybe, table.optional_of(&b.int));
    assert_eq!(
        table.array_of(maybe.clone()),
        table.array_of(Type::optional(b.int.clone()))
    );

    let either = table.union_of([b.int.clone(), b.string.clone()]);
    assert_eq!(either, table.union_of([b.string.clone(), b.int.clone()]));
    assert_eq!(either.to_string(), "int | string");
    assert_eq!(table.union_of([b.int.clone()]), b.int);
    assert_eq!(
        table.array_of(Type::union([b.string.clone(), b.int.clone()])),
        table.array_of(either.clone())
    );

    let f = table.function_of(&b.int, &[maybe.clone()]);
    let spelled = Type::function(b.int.clone(), vec![Type::optional(b.int.clone())]);
    assert_eq!(f, table.intern(&spelled));
    assert_ne!(f, table.function_of(&b.int, &[b.int.clone()]));

    let nested = table.optional_of(&either);
    let spelled = Type::optional(Type::union([b.int.clone(), b.string.clone()]));
    assert_eq!(nested, table.intern(&spelled));
    assert!(table
        .array_of(spelled)
        .can_assign_to(&table.array_of(nested)));
}

#[test]
fn rollback_forgets_later_registrations() {
    let table = TypeTable::new();
    let b = table.builtins();
    let kept = class(&table, "Kept");
    table.register_function(function("f", &b.int, vec![]));

    let checkpoint = table.checkpoint();
    class(&table, "Dropped");
    table.register_function(function("f", &b.void, vec![]));
    table.register_function(function("g", &b.void, vec![]));
    table.rollback(checkpoint);

    assert_eq!(table.user_types(), vec![kept]);
    assert_eq!(table.type_named("Dropped"), None);
    assert_eq!(table.functions_named("f").len(), 1);
    assert!(!table.has_function("g"));
    assert_eq!(table.checkpoint(), checkpoint);

    class(&table, "Dropped");
    assert!(table.type_named("Dropped").is_some());
}
