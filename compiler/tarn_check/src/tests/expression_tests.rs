use tarn_diagnostic::ErrorCode;

use super::{assert_clean, assert_codes, check};

#[test]
fn a_small_program_checks_clean() {
    assert_clean(
        "class Counter {
  int count = 0
  constructor(this.count) { }
  void bump(int by = 1) { count += by }
  int value() { return count }
}
function int twice(int x) { return x + x }
main {
  var c = Counter(2)
  c.bump()
  c.bump(3)
  print(twice(c.value()))
}",
    );
}

#[test]
fn literal_types() {
    assert_clean("main {\n  var a: int = 1\n  var b: float = 1.5\n  var c: boolean = false\n  var d: string = \"s\"\n}");
    assert_codes("main {\n  var a: int = 1.5\n}", &[ErrorCode::E2010]);
    assert_codes("main {\n  var a: string = null\n}", &[ErrorCode::E2010]);
}

#[test]
fn array_literals() {
    assert_clean("main {\n  var xs: array<int> = [1, 2]\n  var ys: array<int> = []\n}");
    // Mixed elements give a raw array, which fits any element type.
    assert_clean("main {\n  var zs: array<string> = [1, \"a\"]\n}");
    assert_codes(
        "main {\n  var ws: array<string> = [1, 2]\n}",
        &[ErrorCode::E2010],
    );
}

#[test]
fn interpolation() {
    assert_clean("main {\n  var n = 3\n  var s: string = \"n is {n + 1}\"\n}");
    assert_codes(
        "function void f() { }\nmain {\n  print(\"x {f()}\")\n}",
        &[ErrorCode::E2010],
    );
}

#[test]
fn unknown_names() {
    assert_codes("main {\n  print(missing)\n}", &[ErrorCode::E2002]);
    assert_codes(
        "class A {\n}\nmain {\n  var a = A()\n  print(a.nope)\n}",
        &[ErrorCode::E2003],
    );
}

#[test]
fn operators_dispatch_to_methods() {
    assert_clean(
        "main {
  var b: boolean = 1 < 2
  var f: float = 1 + 2.5
  var g: float = 2.5 + 1
  var n: int = -(3 * 4)
  var t: boolean = !(true && false)
}",
    );
    assert_codes(
        "class A {\n}\nmain {\n  var x = A() - 1\n}",
        &[ErrorCode::E2005],
    );
    assert_codes("main {\n  var b = !1\n}", &[ErrorCode::E2005]);
}

#[test]
fn bidirectional_operators_try_the_right_operand() {
    assert_clean("main {\n  var s: string = 1 + \"a\"\n}");
    assert_codes("main {\n  var s = 1 - \"a\"\n}", &[ErrorCode::E2005]);
}

#[test]
fn user_operators() {
    assert_clean(
        "class Vec {
  int x
  constructor(this.x) { }
  operator Vec add(Vec other) { return Vec(x + other.x) }
  operator int compare(Vec other) { return x - other.x }
}
main {
  var v = Vec(1) + Vec(2)
  if v > Vec(0) {
    print(v.x)
  }
}",
    );
}

#[test]
fn indexing() {
    assert_clean(
        "main {\n  var xs = [1, 2, 3]\n  xs.add(4)\n  var first: int = xs[0]\n  var n: int = xs.length()\n}",
    );
    assert_codes("main {\n  var x = 1\n  print(x[0])\n}", &[ErrorCode::E2015]);
}

#[test]
fn generic_members_resolve_through_the_receiver() {
    assert_codes(
        "class Box<T> {
  T value
  constructor(this.value) { }
  T unwrap() { return value }
}
main {
  var b: Box<int> = Box(1)
  var n: int = b.unwrap()
  var m: int = Box(2).unwrap()
}",
        // A raw `Box` exposes `T` as its bound.
        &[ErrorCode::E2010],
    );
}

#[test]
fn reflective_access_reaches_statics() {
    assert_clean(
        "class Config {
  static int limit = 3
  static int twice() { return limit + limit }
}
main {
  print(Config.limit)
  print(Config.twice())
}",
    );
    assert_codes(
        "class Config {\n  int size = 1\n}\nmain {\n  print(Config.size)\n}",
        &[ErrorCode::E2003],
    );
}

#[test]
fn accessor_and_assigner_cover_unknown_fields() {
    assert_clean(
        "class Bag {
  accessor int read(string key) { return 1 }
  assigner void write(string key, int value) { }
}
main {
  var b = Bag()
  b.anything = 3
  var n: int = b.other
}",
    );
}

#[test]
fn accessor_types_reads_of_declared_fields() {
    assert_clean(
        "class Masked {
  string name = \"n\"
  accessor int read(string key) { return 0 }
  assigner void write(string key, int value) { }
}
main {
  var m = Masked()
  var n: int = m.name
  m.name = 4
  m.name = \"direct\"
}",
    );
    assert_codes(
        "class Masked {
  string name = \"n\"
  accessor int read(string key) { return 0 }
}
main {
  var s: string = Masked().name
}",
        &[ErrorCode::E2010],
    );
}

#[test]
fn optional_and_union_values() {
    assert_clean("main {\n  var m: int? = null\n  m = 3\n}");
    assert_clean(
        "function string show(int | string v) { return \"{v}\" }\nmain {\n  print(show(1), show(\"a\"))\n}",
    );
    assert_codes(
        "function string show(int | string v) { return \"{v}\" }\nmain {\n  print(show(1.5))\n}",
        &[ErrorCode::E2006],
    );
}

#[test]
fn diagnostics_carry_spans_and_messages() {
    let diagnostics = check("main {\n  print(missing)\n}");
    let diagnostic = diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.message, "unknown variable `missing`");
    let span = diagnostic.primary_span().unwrap();
    assert_eq!(span.len(), "missing".len() as u32);
}
