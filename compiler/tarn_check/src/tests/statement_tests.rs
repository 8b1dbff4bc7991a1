use tarn_diagnostic::ErrorCode;

use super::{assert_clean, assert_codes};

#[test]
fn only_calls_stand_alone() {
    assert_codes("main {\n  1 + 2\n}", &[ErrorCode::E2019]);
    assert_clean("main {\n  print(1)\n}");
}

#[test]
fn assignment_targets() {
    assert_codes("main {\n  f() = 1\n}", &[ErrorCode::E2018]);
    assert_codes(
        "function void f() { }\nmain {\n  f = 1\n}",
        &[ErrorCode::E2018],
    );
    assert_codes("main {\n  nowhere = 1\n}", &[ErrorCode::E2002]);
    assert_codes(
        "class A {\n}\nmain {\n  var a = A()\n  a.x = 1\n}",
        &[ErrorCode::E2003],
    );
}

#[test]
fn assignment_types() {
    assert_codes("main {\n  var n = 1\n  n = \"s\"\n}", &[ErrorCode::E2010]);
    assert_clean("main {\n  var s = \"a\"\n  s += 1\n}");
    // `int + string` resolves to string through the right operand.
    assert_codes("main {\n  var n = 1\n  n += \"a\"\n}", &[ErrorCode::E2010]);
}

#[test]
fn index_assignment_uses_the_setter() {
    assert_clean("main {\n  var xs = [1]\n  xs[0] = 2\n  xs[0] += 3\n}");
    assert_codes("main {\n  var xs = [1]\n  xs[0] = \"a\"\n}", &[ErrorCode::E2015]);
}

#[test]
fn conditions_and_counts() {
    assert_codes(
        "main {\n  if 1 {\n  }\n  while \"x\" {\n  }\n  repeat \"3\" {\n  }\n}",
        &[ErrorCode::E2010, ErrorCode::E2010, ErrorCode::E2010],
    );
    assert_clean("main {\n  var i = 0\n  while i < 3 {\n    i += 1\n  }\n  repeat 2 {\n    print(i)\n  }\n}");
}

#[test]
fn for_loops() {
    assert_clean("main {\n  for x in [1, 2] {\n    var y: int = x\n  }\n}");
    assert_clean(
        "class Words {
  iterator array<string> all() { return [\"a\", \"b\"] }
}
main {
  for w in Words() {
    var s: string = w
  }
}",
    );
    assert_codes("main {\n  for i in 5 {\n  }\n}", &[ErrorCode::E2017]);
    assert_codes(
        "main {\n  for x in [1] {\n  }\n  print(x)\n}",
        &[ErrorCode::E2002],
    );
}

#[test]
fn scopes() {
    assert_clean("main {\n  var a = 1\n  if true {\n    var a = \"s\"\n  }\n}");
    assert_codes("main {\n  var a = 1\n  var a = 2\n}", &[ErrorCode::E2004]);
    assert_codes(
        "main {\n  if true {\n    var inner = 1\n  }\n  print(inner)\n}",
        &[ErrorCode::E2002],
    );
}

#[test]
fn globals() {
    assert_clean("var total = 0\nmain {\n  total += 1\n}");
    assert_codes("var total: string = 0", &[ErrorCode::E2010]);
    assert_clean("function int next() { return counter + 1 }\nvar counter = 0");
}

#[test]
fn return_values() {
    assert_codes("function void f() {\n  return 1\n}", &[ErrorCode::E2011]);
    assert_codes("function int f() {\n  return\n}", &[ErrorCode::E2011]);
    assert_codes("function int f() {\n  return \"s\"\n}", &[ErrorCode::E2010]);
    assert_clean("main {\n  return\n}");
}

#[test]
fn every_path_must_return() {
    assert_codes(
        "function int f(boolean b) {\n  if b {\n    return 1\n  }\n}",
        &[ErrorCode::E2011],
    );
    assert_clean(
        "function int f(boolean b) {\n  if b {\n    return 1\n  } else {\n    return 2\n  }\n}",
    );
    assert_clean("function int f() {\n  {\n    return 1\n  }\n}");
    assert_codes(
        "function int f() {\n  while true {\n    return 1\n  }\n}",
        &[ErrorCode::E2011],
    );
}
