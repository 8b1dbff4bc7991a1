use pretty_assertions::assert_eq;
use tarn_canon::Module;
use tarn_diagnostic::ErrorCode;
use tarn_ir::Modifiers;
use tarn_types::{ItemSymbol, Member, NativeDecl, TypeTable};

use super::{assert_clean, assert_codes, check_units, parse, processor};
use crate::Processor;

#[test]
fn members_line_up_with_declarations() {
    let unit = parse(
        "test",
        "class Point {\n  int x\n  int y = 2\n  int sum() { return x + y }\n}",
    );
    let (diagnostics, symbols) = check_units(&[unit]);
    assert!(diagnostics.is_empty(), "{:#?}", diagnostics.as_slice());

    let ItemSymbol::Class { ty, members } = &symbols[0].items[0] else {
        panic!("expected a class symbol");
    };
    let names: Vec<&str> = members.iter().map(Member::name).collect();
    assert_eq!(names, ["x", "y", "sum"]);

    // The synthesized constructor is on the type but not in the member list.
    let constructors = ty.constructors();
    assert_eq!(constructors.len(), 1);
    assert!(constructors[0].params.is_empty());
}

#[test]
fn declarations_are_visible_across_units() {
    let first = parse("first", "function Point origin() { return Point(0) }");
    let second = parse(
        "second",
        "class Point {\n  int x\n  constructor(this.x) { }\n}",
    );
    let (diagnostics, _) = check_units(&[first, second]);
    assert!(diagnostics.is_empty(), "{:#?}", diagnostics.as_slice());
}

#[test]
fn auto_assign_parameters_take_the_field_type() {
    let unit = parse(
        "test",
        "class Named {\n  string name\n  constructor(this.name) { }\n}",
    );
    let (_, symbols) = check_units(&[unit]);
    let ItemSymbol::Class { ty, .. } = &symbols[0].items[0] else {
        panic!("expected a class symbol");
    };
    let ctor = &ty.constructors()[0];
    assert!(ctor.params[0].auto_assign);
    assert_eq!(ctor.params[0].ty.to_string(), "string");
}

#[test]
fn auto_assign_without_a_field() {
    assert_codes(
        "class Named {\n  constructor(this.name) { }\n}",
        &[ErrorCode::E2009],
    );
}

#[test]
fn duplicate_declarations() {
    assert_codes("class A {\n}\nclass A {\n}", &[ErrorCode::E2004]);
    assert_codes(
        "function int f(int a) { return a }\nfunction int f(int b) { return b }",
        &[ErrorCode::E2004],
    );
    assert_codes("class A {\n  int x\n  string x\n}", &[ErrorCode::E2004]);
    assert_codes("main {\n}\nmain {\n}", &[ErrorCode::E2004]);
}

#[test]
fn overloads_with_distinct_parameters_coexist() {
    assert_clean(
        "function int f(int a) { return a }\nfunction int f(string s) { return 1 }\nfunction int f() { return 0 }",
    );
}

#[test]
fn invalid_parameter_lists() {
    assert_codes("function void f(int a, int a) { }", &[ErrorCode::E2009]);
    assert_codes("function void f(int... a, int b) { }", &[ErrorCode::E2009]);
}

#[test]
fn generic_arity() {
    assert_codes(
        "class Box<T> {\n  T value\n}\nmain {\n  var b: Box<int, int> = Box()\n}",
        &[ErrorCode::E2021],
    );
    assert_codes("main {\n  var s: string<int> = \"\"\n}", &[ErrorCode::E2021]);
}

#[test]
fn unknown_type() {
    assert_codes("main {\n  var x: Missing = null\n}", &[ErrorCode::E2001]);
}

#[test]
fn natives_attach_to_their_owner() {
    let table = TypeTable::new();
    let _processor = processor(&table);

    let add = table.builtins().int.methods_named("add");
    assert_eq!(add.len(), 2);
    assert_eq!(add[0].native.as_deref(), Some("int.add"));
    assert_eq!(add[1].native.as_deref(), Some("int.add_float"));
    assert!(add[0].modifiers.contains(Modifiers::NATIVE | Modifiers::OPERATOR));

    let print = table.functions_named("print");
    assert_eq!(print.len(), 1);
    assert!(print[0].has_vararg());
}

#[test]
fn invalid_natives_are_reported() {
    let table = TypeTable::new();
    let mut processor = Processor::new(&table);
    processor.bake_natives(&[
        NativeDecl::new("int.broken", "int broken("),
        NativeDecl::new("Nope.f", "void f()"),
    ]);
    let codes: Vec<ErrorCode> = processor.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E2022, ErrorCode::E2022]);
    assert!(table.builtins().int.methods_named("broken").is_empty());
}

#[test]
fn user_native_methods_get_owner_symbols() {
    let unit = parse("test", "class Host {\n  native string describe()\n}");
    let (diagnostics, symbols) = check_units(&[unit]);
    assert!(diagnostics.is_empty(), "{:#?}", diagnostics.as_slice());
    let ItemSymbol::Class { members, .. } = &symbols[0].items[0] else {
        panic!("expected a class symbol");
    };
    let describe = members[0].as_executable().unwrap();
    assert_eq!(describe.native.as_deref(), Some("Host.describe"));
}

#[test]
fn imported_module_is_visible() {
    let table = TypeTable::new();
    let sdk = [parse(
        "sdk",
        "class Greeter {\n  string greet(string name) { return \"hi \" + name }\n}\nfunction int answer() { return 42 }\nvar motto = \"tarn\"",
    )];
    let module = {
        let mut processor = processor(&table);
        let mut symbols = processor.index(&sdk);
        processor.process(&sdk, &mut symbols);
        assert!(!processor.has_errors(), "{:#?}", processor.diagnostics());
        Module::generate("sdk", &sdk, &symbols)
    };

    let app = [parse(
        "app",
        "main {\n  var g = Greeter()\n  print(g.greet(motto), answer())\n}",
    )];
    let mut processor = Processor::new(&table);
    processor.import(&module);
    processor.import(&module);
    let mut symbols = processor.index(&app);
    processor.process(&app, &mut symbols);

    assert!(processor.diagnostics().is_empty(), "{:#?}", processor.diagnostics());
    assert_eq!(table.functions_named("answer").len(), 1);
}
