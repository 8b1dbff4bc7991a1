#![allow(clippy::unwrap_used)]

use std::cell::OnceCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tarn_ir::ast::{Item, MemberDecl, SourceUnit};
use tarn_ir::canon::{Callee, ExprKind, Literal, Place, Segment, StmtKind};
use tarn_ir::{Modifiers, Span};
use tarn_types::{
    Executable, ExecutableKind, Field, ItemSymbol, Member, Parameter, Type, TypeTable,
    UnitSymbols,
};

use super::*;

fn parse(source: &str) -> SourceUnit {
    let out = tarn_parse::parse_unit("test", source);
    assert!(out.diagnostics.is_empty(), "{:#?}", out.diagnostics);
    out.unit
}

fn executable(
    name: &str,
    kind: ExecutableKind,
    owner: Option<&Type>,
    params: Vec<Parameter>,
    ret: &Type,
) -> Rc<Executable> {
    Rc::new(Executable {
        name: name.to_string(),
        kind,
        modifiers: Modifiers::empty(),
        owner: owner.map(Type::downgrade),
        ret: ret.clone(),
        params,
        native: None,
        body: OnceCell::new(),
        span: Span::DUMMY,
    })
}

/// Symbols shaped like the index phase would build them for `unit`.
fn symbols_for(table: &TypeTable, unit: &SourceUnit) -> UnitSymbols {
    let b = table.builtins();
    let items = unit
        .items
        .iter()
        .map(|item| match item {
            Item::Class(decl) => {
                let ty = Type::class(&decl.name.name, &b.object, Vec::new());
                let members = decl
                    .members
                    .iter()
                    .map(|m| match m {
                        MemberDecl::Field(f) => Member::Field(Rc::new(Field {
                            name: f.name.name.clone(),
                            modifiers: f.modifiers.flags,
                            ty: b.int.clone(),
                            owner: ty.downgrade(),
                            init: OnceCell::new(),
                            span: f.span,
                        })),
                        MemberDecl::Method(m) => Member::Executable(executable(
                            &m.signature.name.name,
                            ExecutableKind::Method,
                            Some(&ty),
                            Vec::new(),
                            &b.int,
                        )),
                        MemberDecl::Constructor(c) => Member::Executable(executable(
                            "constructor",
                            ExecutableKind::Constructor,
                            Some(&ty),
                            c.params
                                .iter()
                                .map(|p| Parameter::new(p.name.name.clone(), b.int.clone(), p.span))
                                .collect(),
                            &ty,
                        )),
                    })
                    .collect();
                ItemSymbol::Class { ty, members }
            }
            Item::Function(decl) => ItemSymbol::Function(executable(
                &decl.signature.name.name,
                ExecutableKind::Function,
                None,
                decl.signature
                    .params
                    .iter()
                    .map(|p| Parameter::new(p.name.name.clone(), b.int.clone(), p.span))
                    .collect(),
                &b.int,
            )),
            Item::Global(decl) => ItemSymbol::Global {
                name: decl.name.name.clone(),
                ty: b.int.clone(),
            },
            Item::Main(_) => ItemSymbol::Main,
        })
        .collect();
    UnitSymbols { items }
}

#[test]
fn attaches_function_bodies_and_defaults() {
    let table = TypeTable::new();
    let unit = parse("function int add(int a, int b = 2) { return a + b }");
    let symbols = symbols_for(&table, &unit);
    let program = generate(&unit, &symbols);

    assert_eq!(program.functions.len(), 1);
    let add = &program.functions[0];
    let body = add.body.get().unwrap();
    assert_eq!(body.stmts.len(), 1);
    assert!(matches!(body.stmts[0].kind, StmtKind::Return(Some(_))));
    assert!(add.params[0].default.get().is_none());
    assert!(matches!(
        add.params[1].default.get().map(|e| &e.kind),
        Some(ExprKind::Literal(Literal::Int(2)))
    ));
}

#[test]
fn attaches_class_members_in_order() {
    let table = TypeTable::new();
    let unit = parse(
        "class Point {\n  int x = 1\n  int y\n  constructor(this.x) { }\n  int sum() { return x + y }\n}",
    );
    let symbols = symbols_for(&table, &unit);
    let program = generate(&unit, &symbols);

    assert_eq!(program.classes.len(), 1);
    let ItemSymbol::Class { members, .. } = &symbols.items[0] else {
        panic!("expected class symbol");
    };
    let x = members[0].as_field().unwrap();
    assert!(matches!(
        x.init.get().map(|e| &e.kind),
        Some(ExprKind::Literal(Literal::Int(1)))
    ));
    assert!(members[1].as_field().unwrap().init.get().is_none());
    assert!(members[2].as_executable().unwrap().body.get().is_some());
    assert!(members[3].as_executable().unwrap().body.get().is_some());
}

#[test]
fn lowers_globals_and_main() {
    let table = TypeTable::new();
    let unit = parse("var total = 0\nmain {\n  total += 5\n  print(\"total {total}!\")\n  items[0] = 1\n  p.x = 2\n}");
    let symbols = symbols_for(&table, &unit);
    let program = generate(&unit, &symbols);

    assert_eq!(program.globals.len(), 1);
    assert_eq!(program.globals[0].name, "total");
    assert!(program.globals[0].init.is_some());

    let main = program.main.unwrap();
    let kinds: Vec<&StmtKind> = main.stmts.iter().map(|s| &s.kind).collect();
    assert!(matches!(kinds[0], StmtKind::Assign { place: Place::Var(name), .. } if name == "total"));

    let StmtKind::Expr(call) = kinds[1] else {
        panic!("expected call statement");
    };
    let ExprKind::Call { callee: Callee::Name(name), args } = &call.kind else {
        panic!("expected call by name");
    };
    assert_eq!(name, "print");
    let ExprKind::Interpolate(segments) = &args[0].kind else {
        panic!("expected interpolation");
    };
    assert_eq!(segments.len(), 3);
    assert!(matches!(&segments[1], Segment::Expr(e) if matches!(&e.kind, ExprKind::Var(v) if v == "total")));

    assert!(matches!(kinds[2], StmtKind::Assign { place: Place::Index { .. }, .. }));
    assert!(matches!(kinds[3], StmtKind::Assign { place: Place::Field { name, .. }, .. } if name == "x"));
}

#[test]
fn plain_strings_become_literals() {
    let table = TypeTable::new();
    let unit = parse("main {\n  print(\"plain\")\n  obj.run(1)\n  make()(2)\n}");
    let program = generate(&unit, &symbols_for(&table, &unit));
    let main = program.main.unwrap();

    let StmtKind::Expr(call) = &main.stmts[0].kind else {
        panic!("expected call");
    };
    let ExprKind::Call { args, .. } = &call.kind else {
        panic!("expected call");
    };
    assert!(matches!(&args[0].kind, ExprKind::Literal(Literal::Str(s)) if &**s == "plain"));

    let StmtKind::Expr(member_call) = &main.stmts[1].kind else {
        panic!("expected call");
    };
    assert!(matches!(
        &member_call.kind,
        ExprKind::Call { callee: Callee::Member { name, .. }, .. } if name == "run"
    ));

    let StmtKind::Expr(value_call) = &main.stmts[2].kind else {
        panic!("expected call");
    };
    assert!(matches!(
        &value_call.kind,
        ExprKind::Call { callee: Callee::Value(_), .. }
    ));
}

#[test]
fn module_collects_programs() {
    let table = TypeTable::new();
    let first = parse("class A { }");
    let second = parse("function int f() { return 1 }");
    let symbols = vec![symbols_for(&table, &first), symbols_for(&table, &second)];
    let module = Module::generate("sdk", &[first, second], &symbols);
    assert_eq!(module.programs.len(), 2);
    assert_eq!(module.classes().count(), 1);
    assert_eq!(module.functions().count(), 1);
    assert_eq!(module.globals().count(), 0);
}
