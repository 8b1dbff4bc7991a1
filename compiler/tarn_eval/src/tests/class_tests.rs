use super::assert_output;

#[test]
fn constructors_initialise_fields_then_copy_parameters() {
    assert_output(
        "class Trace {
  int a = 1
  int b = a + 1
  int c
  constructor(this.c) {
    print(a, b, c)
    this.c = c * 10
  }
}
main {
  var t = Trace(5)
  print(t.c)
}",
        "1 2 5\n50\n",
    );
}

#[test]
fn classes_without_a_constructor_take_no_arguments() {
    assert_output(
        "class Plain {\n  string label = \"plain\"\n  int n\n}\nmain {\n  var p = Plain()\n  print(p.label, p.n)\n}",
        "plain 0\n",
    );
}

#[test]
fn default_arguments_fill_omitted_parameters() {
    assert_output(
        "class Counter {
  int count = 0
  constructor(this.count) { }
  void bump(int by = 1) { count += by }
  int value() { return count }
}
main {
  var c = Counter(2)
  c.bump()
  c.bump(3)
  print(c.value())
}",
        "6\n",
    );
}

#[test]
fn defaults_see_earlier_parameters() {
    assert_output(
        "function int area(int w, int h = w) { return w * h }\nmain {\n  print(area(3), area(3, 4))\n}",
        "9 12\n",
    );
}

#[test]
fn omitted_optional_parameters_are_null() {
    assert_output(
        "function string label(string? name = \"anon\") {
  if name == null {
    return \"none\"
  }
  return \"some\"
}
main {
  print(label(), label(\"a\"))
}",
        "none some\n",
    );
}

#[test]
fn varargs_collect_trailing_arguments() {
    assert_output(
        "function int sum(int first, int... rest) {
  var total = first
  for r in rest {
    total += r
  }
  return total
}
main {
  print(sum(1), sum(1, 2, 3))
}",
        "1 6\n",
    );
}

#[test]
fn statics_live_on_the_type() {
    assert_output(
        "class Config {
  static int limit = 3
  static int twice() { return limit + limit }
  static void raise() { limit += 1 }
}
main {
  print(Config.limit, Config.twice())
  Config.raise()
  Config.limit = Config.limit * 2
  print(Config.limit)
}",
        "3 6\n8\n",
    );
}

#[test]
fn user_operators() {
    assert_output(
        "class Vec {
  int x
  constructor(this.x) { }
  operator Vec add(Vec other) { return Vec(x + other.x) }
  operator int compare(Vec other) { return x - other.x }
}
main {
  var v = Vec(1) + Vec(2)
  print(v.x, v > Vec(0), v == Vec(3), v < Vec(3))
}",
        "3 true true false\n",
    );
}

#[test]
fn user_to_string_is_used_for_rendering() {
    assert_output(
        "class Point {
  int x
  int y
  constructor(this.x, this.y) { }
  string toString() { return \"({x}, {y})\" }
}
main {
  var p = Point(1, 2)
  print(p, \"at \" + p, [p])
}",
        "(1, 2) at (1, 2) [(1, 2)]\n",
    );
}

#[test]
fn instances_without_to_string_render_their_type() {
    assert_output("class Thing {\n}\nmain {\n  print(Thing())\n}", "Thing\n");
}

#[test]
fn accessor_and_assigner_handle_unknown_fields() {
    assert_output(
        "class Bag {
  string log = \"\"
  accessor int read(string key) { return key.length() }
  assigner void write(string key, int value) { log = log + key + \"=\" + value }
  string history() { return log }
}
main {
  var b = Bag()
  b.size = 3
  print(b.anything, b.history())
}",
        "8 size=3\n",
    );
}

#[test]
fn accessor_and_assigner_take_over_declared_fields() {
    assert_output(
        "class Guarded {
  int x = 1
  string seen = \"\"
  accessor int read(string key) { return 42 }
  assigner void write(string key, int value) { seen = seen + key }
  int real() { return x }
  string writes() { return seen }
}
main {
  var g = Guarded()
  g.x = 7
  print(g.x, g.real(), g.writes())
}",
        "42 1 x\n",
    );
}

#[test]
fn an_assigner_that_rejects_the_value_leaves_the_field_write() {
    assert_output(
        "class Tagged {
  string name = \"a\"
  string log = \"\"
  assigner void write(string key, int value) { log = log + key }
  string current() { return name + log }
}
main {
  var t = Tagged()
  t.name = \"b\"
  t.count = 2
  print(t.name, t.current())
}",
        "b bcount\n",
    );
}

#[test]
fn indexers_on_user_classes() {
    assert_output(
        "class Grid {
  array<int> cells = [0, 0, 0]
  get indexer int at(int i) { return cells[i] }
  set indexer void put(int i, int v) { cells[i] = v }
}
main {
  var g = Grid()
  g[1] = 7
  g[1] += 1
  print(g[1], g.cells)
}",
        "8 [0, 8, 0]\n",
    );
}

#[test]
fn invokers_make_instances_callable() {
    assert_output(
        "class Adder {
  int by
  constructor(this.by) { }
  invoker int call(int x) { return x + by }
}
main {
  var add = Adder(10)
  print(add(2))
}",
        "12\n",
    );
}

#[test]
fn fields_holding_functions_are_called_through_the_field() {
    assert_output(
        "function int inc(int x) { return x + 1 }
class Holder {
  (int) => int f = inc
}
main {
  var h = Holder()
  print(h.f(1))
}",
        "2\n",
    );
}

#[test]
fn overloads_resolve_by_argument_type() {
    assert_output(
        "function string show(int v) { return \"int\" }
function string show(string v) { return \"string \" + v }
function string show(object v) { return \"object\" }
main {
  print(show(1), show(\"s\"), show(true))
}",
        "int string s object\n",
    );
}

#[test]
fn overloads_prefer_exact_arity_over_defaults() {
    assert_output(
        "function string pick(int a) { return \"one\" }
function string pick(int a, int b = 0) { return \"two\" }
main {
  print(pick(1), pick(1, 2))
}",
        "one two\n",
    );
}

#[test]
fn methods_shadow_free_functions() {
    assert_output(
        "function string name() { return \"free\" }
class A {
  string name() { return \"method\" }
  string use() { return name() }
}
main {
  print(A().use(), name())
}",
        "method free\n",
    );
}

#[test]
fn generic_classes() {
    assert_output(
        "class Box<T> {
  T value
  constructor(this.value) { }
  T unwrap() { return value }
}
main {
  var b: Box<int> = Box(41)
  print(b.unwrap() + 1)
}",
        "42\n",
    );
}

#[test]
fn identity_and_aliasing() {
    assert_output(
        "class Cell {
  int v = 0
}
main {
  var a = Cell()
  var b = a
  b.v = 4
  print(a.v, a == b, a == Cell())
}",
        "4 true false\n",
    );
}

#[test]
fn structural_type_arguments_are_shared() {
    assert_output(
        "function int count(array<int?> items) {
  var n = 0
  for item in items {
    if item != null {
      n += 1
    }
  }
  return n
}
main {
  var xs: array<int?> = [1, null, 3]
  print(count(xs))
}",
        "2\n",
    );
}
