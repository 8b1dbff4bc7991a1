use proptest::prelude::*;

use crate::test_support::class;
use crate::{Type, TypeTable};

struct Fixture {
    table: TypeTable,
    a: Type,
    b: Type,
}

impl Fixture {
    fn new() -> Self {
        let table = TypeTable::new();
        let a = class(&table, "A");
        let b = class(&table, "B");
        Fixture { table, a, b }
    }

    fn build(&self, shape: &Shape) -> Type {
        let builtins = self.table.builtins();
        match shape {
            Shape::Int => builtins.int.clone(),
            Shape::Float => builtins.float.clone(),
            Shape::Str => builtins.string.clone(),
            Shape::Bool => builtins.boolean.clone(),
            Shape::Object => builtins.object.clone(),
            Shape::Null => builtins.null.clone(),
            Shape::A => self.a.clone(),
            Shape::B => self.b.clone(),
            Shape::Array(inner) => self.table.array_of(self.build(inner)),
            Shape::Optional(inner) => Type::optional(self.build(inner)),
            Shape::Union(left, right) => Type::union([self.build(left), self.build(right)]),
        }
    }
}

#[derive(Clone, Debug)]
enum Shape {
    Int,
    Float,
    Str,
    Bool,
    Object,
    Null,
    A,
    B,
    Array(Box<Shape>),
    Optional(Box<Shape>),
    Union(Box<Shape>, Box<Shape>),
}

fn leaf() -> impl Strategy<Value = Shape> {
    prop_oneof![
        Just(Shape::Int),
        Just(Shape::Float),
        Just(Shape::Str),
        Just(Shape::Bool),
        Just(Shape::Object),
        Just(Shape::Null),
        Just(Shape::A),
        Just(Shape::B),
    ]
}

fn shape() -> impl Strategy<Value = Shape> {
    leaf().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Array(Box::new(s))),
            inner.clone().prop_map(|s| Shape::Optional(Box::new(s))),
            (inner.clone(), inner).prop_map(|(l, r)| Shape::Union(Box::new(l), Box::new(r))),
        ]
    })
}

proptest! {
    #[test]
    fn assignability_is_reflexive_and_top_bounded(s in shape()) {
        let fx = Fixture::new();
        let ty = fx.build(&s);
        prop_assert!(ty.can_assign_to(&ty));
        prop_assert!(ty.can_assign_to(&fx.table.object()));
    }

    #[test]
    fn union_source_accepts_when_any_option_does(a in shape(), b in shape(), x in shape()) {
        let fx = Fixture::new();
        let (a, b, x) = (fx.build(&a), fx.build(&b), fx.build(&x));
        let union = Type::union([a.clone(), b.clone()]);
        prop_assert_eq!(
            union.can_assign_to(&x),
            a.can_assign_to(&x) || b.can_assign_to(&x)
        );
    }

    #[test]
    fn optional_to_optional_requires_identical_inner(a in shape(), b in shape()) {
        let fx = Fixture::new();
        let (a, b) = (fx.build(&a), fx.build(&b));
        let source = Type::optional(a.clone());
        prop_assert_eq!(source.can_assign_to(&Type::optional(b.clone())), a == b);
        prop_assert!(source.can_assign_to(&fx.table.object()));
    }

    #[test]
    fn array_arguments_are_invariant(a in shape(), b in shape()) {
        let fx = Fixture::new();
        let (a, b) = (fx.build(&a), fx.build(&b));
        let source = fx.table.array_of(a.clone());
        prop_assert_eq!(source.can_assign_to(&fx.table.array_of(b.clone())), a == b);
    }

    // A plain type against a union target is accepted when one option
    // accepts it. Without this rule `int` would not fit `int | string`.
    #[test]
    fn plain_source_against_union_target(s in leaf(), a in shape(), b in shape()) {
        let fx = Fixture::new();
        let (s, a, b) = (fx.build(&s), fx.build(&a), fx.build(&b));
        let union = Type::union([a.clone(), b.clone()]);
        prop_assert_eq!(
            s.can_assign_to(&union),
            s.can_assign_to(&a) || s.can_assign_to(&b)
        );
    }
}

#[test]
fn primitives_are_distinct() {
    let fx = Fixture::new();
    let b = fx.table.builtins();
    assert!(!b.int.can_assign_to(&b.float));
    assert!(!b.string.can_assign_to(&b.int));
    assert!(!fx.a.can_assign_to(&fx.b));
    assert!(!b.object.can_assign_to(&b.int));
}

#[test]
fn optional_targets() {
    let fx = Fixture::new();
    let b = fx.table.builtins();
    let maybe_int = Type::optional(b.int.clone());
    assert!(b.int.can_assign_to(&maybe_int));
    assert!(b.null.can_assign_to(&maybe_int));
    assert!(!b.float.can_assign_to(&maybe_int));
    assert!(!maybe_int.can_assign_to(&b.int));
    assert!(!maybe_int.can_assign_to(&Type::optional(b.float.clone())));
    assert!(maybe_int.can_assign_to(&Type::optional(b.int.clone())));
}

#[test]
fn union_target_accepts_member() {
    let fx = Fixture::new();
    let b = fx.table.builtins();
    let int_or_string = Type::union([b.int.clone(), b.string.clone()]);
    assert!(b.int.can_assign_to(&int_or_string));
    assert!(b.string.can_assign_to(&int_or_string));
    assert!(!b.float.can_assign_to(&int_or_string));
    assert!(!int_or_string.can_assign_to(&b.int));
}

#[test]
fn raw_and_parameterized_arrays() {
    let fx = Fixture::new();
    let b = fx.table.builtins();
    let ints = fx.table.array_of(b.int.clone());
    assert!(ints.can_assign_to(&b.array));
    assert!(b.array.can_assign_to(&ints));
    assert!(!ints.can_assign_to(&fx.table.array_of(b.object.clone())));
    assert!(!b.int.can_assign_to(&ints));
    assert_eq!(ints, fx.table.array_of(b.int.clone()));
}

#[test]
fn self_type_and_type_parameter() {
    let fx = Fixture::new();
    let this_a = Type::self_type(fx.a.clone());
    assert!(fx.a.can_assign_to(&this_a));
    assert!(this_a.can_assign_to(&fx.a));
    assert!(!fx.b.can_assign_to(&this_a));

    let t = Type::type_parameter("T", 0, fx.a.clone());
    assert!(t.can_assign_to(&fx.a));
    assert!(!t.can_assign_to(&fx.b));
}

#[test]
fn function_types_compare_structurally() {
    let fx = Fixture::new();
    let b = fx.table.builtins();
    let f = Type::function(b.int.clone(), vec![b.int.clone(), b.string.clone()]);
    let same = Type::function(b.int.clone(), vec![b.int.clone(), b.string.clone()]);
    let other = Type::function(b.int.clone(), vec![b.string.clone()]);
    assert!(f.can_assign_to(&same));
    assert!(!f.can_assign_to(&other));
    assert!(!b.int.can_assign_to(&f));
}
