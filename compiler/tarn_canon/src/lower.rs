//! Syntax tree to canonical IR.

use std::rc::Rc;

use tarn_ir::ast::{self, ExprKind, Item, MemberDecl, SourceUnit, StmtKind, StrPart};
use tarn_ir::canon::{self, Callee, Literal, Place, Segment};
use tarn_stack::ensure_sufficient_stack;
use tarn_types::{Executable, ItemSymbol, Member, UnitSymbols};

use crate::{Global, Program};

/// Lower one checked unit.
#[tracing::instrument(level = "debug", skip_all, fields(unit = %unit.name))]
pub fn generate(unit: &SourceUnit, symbols: &UnitSymbols) -> Program {
    let mut program = Program {
        name: unit.name.clone(),
        globals: Vec::new(),
        main: None,
        classes: Vec::new(),
        functions: Vec::new(),
    };

    for (item, symbol) in unit.items.iter().zip(&symbols.items) {
        match (item, symbol) {
            (Item::Class(decl), ItemSymbol::Class { ty, members }) => {
                for (member_decl, member) in decl.members.iter().zip(members) {
                    attach_member(member_decl, member);
                }
                program.classes.push(ty.clone());
            }
            (Item::Function(decl), ItemSymbol::Function(exec)) => {
                attach_executable(exec, decl.body.as_ref(), &decl.signature.params);
                program.functions.push(Rc::clone(exec));
            }
            (Item::Global(decl), ItemSymbol::Global { name, ty }) => {
                program.globals.push(Global {
                    name: name.clone(),
                    ty: ty.clone(),
                    init: decl.init.as_ref().map(expr),
                    span: decl.span,
                });
            }
            (Item::Main(body), ItemSymbol::Main) => {
                program.main = Some(Rc::new(block(body)));
            }
            (_, symbol) => {
                tracing::warn!(?symbol, "item does not match its symbol; skipped");
            }
        }
    }

    tracing::debug!(
        classes = program.classes.len(),
        functions = program.functions.len(),
        globals = program.globals.len(),
        "generated"
    );
    program
}

fn attach_member(decl: &MemberDecl, member: &Member) {
    match (decl, member) {
        (MemberDecl::Field(field_decl), Member::Field(field)) => {
            if let Some(init) = &field_decl.init {
                if field.init.set(expr(init)).is_err() {
                    tracing::warn!(field = %field.name, "initializer already attached");
                }
            }
        }
        (MemberDecl::Method(method), Member::Executable(exec)) => {
            attach_executable(exec, method.body.as_ref(), &method.signature.params);
        }
        (MemberDecl::Constructor(ctor), Member::Executable(exec)) => {
            attach_executable(exec, ctor.body.as_ref(), &ctor.params);
        }
        _ => tracing::warn!(member = member.name(), "member does not match its declaration"),
    }
}

fn attach_executable(exec: &Executable, body: Option<&ast::Block>, params: &[ast::Param]) {
    if let Some(body) = body {
        if exec.body.set(Rc::new(block(body))).is_err() {
            tracing::warn!(name = %exec.name, "body already attached");
        }
    }
    for (param, decl) in exec.params.iter().zip(params) {
        if let Some(default) = &decl.default {
            if param.default.set(expr(default)).is_err() {
                tracing::warn!(name = %param.name, "default already attached");
            }
        }
    }
}

fn block(block: &ast::Block) -> canon::Block {
    canon::Block {
        stmts: block.stmts.iter().map(stmt).collect(),
        span: block.span,
    }
}

fn stmt(stmt: &ast::Stmt) -> canon::Stmt {
    let kind = match &stmt.kind {
        StmtKind::Var(decl) => canon::StmtKind::Var {
            name: decl.name.name.clone(),
            init: decl.init.as_ref().map(expr),
        },
        StmtKind::Assign { target, op, value } => match place(target) {
            Some(place) => canon::StmtKind::Assign {
                place,
                op: *op,
                value: expr(value),
            },
            None => canon::StmtKind::Expr(expr(value)),
        },
        StmtKind::Expr(e) => canon::StmtKind::Expr(expr(e)),
        StmtKind::If {
            cond,
            then_block,
            else_block,
        } => canon::StmtKind::If {
            cond: expr(cond),
            then_block: block(then_block),
            else_block: else_block.as_ref().map(block),
        },
        StmtKind::While { cond, body } => canon::StmtKind::While {
            cond: expr(cond),
            body: block(body),
        },
        StmtKind::For {
            var,
            iterable,
            body,
        } => canon::StmtKind::For {
            var: var.name.clone(),
            iterable: expr(iterable),
            body: block(body),
        },
        StmtKind::Repeat { count, body } => canon::StmtKind::Repeat {
            count: expr(count),
            body: block(body),
        },
        StmtKind::Return(value) => canon::StmtKind::Return(value.as_ref().map(expr)),
        StmtKind::Block(inner) => canon::StmtKind::Block(block(inner)),
    };
    canon::Stmt {
        kind,
        span: stmt.span,
    }
}

fn place(target: &ast::Expr) -> Option<Place> {
    match &target.kind {
        ExprKind::Ident(name) => Some(Place::Var(name.clone())),
        ExprKind::Field { object, name } => Some(Place::Field {
            object: expr(object),
            name: name.name.clone(),
        }),
        ExprKind::Index { object, index } => Some(Place::Index {
            object: expr(object),
            index: expr(index),
        }),
        _ => None,
    }
}

fn boxed(e: &ast::Expr) -> Box<canon::Expr> {
    Box::new(expr(e))
}

fn expr(e: &ast::Expr) -> canon::Expr {
    ensure_sufficient_stack(|| canon::Expr {
        kind: expr_kind(&e.kind),
        span: e.span,
    })
}

fn expr_kind(kind: &ExprKind) -> canon::ExprKind {
    match kind {
        ExprKind::Int(v) => canon::ExprKind::Literal(Literal::Int(*v)),
        ExprKind::Float(v) => canon::ExprKind::Literal(Literal::Float(*v)),
        ExprKind::Bool(b) => canon::ExprKind::Literal(Literal::Bool(*b)),
        // Recovery placeholders never reach generation; null keeps it total.
        ExprKind::Null | ExprKind::Error => canon::ExprKind::Literal(Literal::Null),
        ExprKind::Str(parts) => string(parts),
        ExprKind::Array(items) => canon::ExprKind::Array(items.iter().map(expr).collect()),
        ExprKind::Ident(name) => canon::ExprKind::Var(name.clone()),
        ExprKind::This => canon::ExprKind::This,
        ExprKind::Field { object, name } => canon::ExprKind::Field {
            object: boxed(object),
            name: name.name.clone(),
        },
        ExprKind::Index { object, index } => canon::ExprKind::Index {
            object: boxed(object),
            index: boxed(index),
        },
        ExprKind::Call { callee, args } => canon::ExprKind::Call {
            callee: match &callee.kind {
                ExprKind::Ident(name) => Callee::Name(name.clone()),
                ExprKind::Field { object, name } => Callee::Member {
                    object: boxed(object),
                    name: name.name.clone(),
                },
                _ => Callee::Value(boxed(callee)),
            },
            args: args.iter().map(expr).collect(),
        },
        ExprKind::Binary { op, left, right } => canon::ExprKind::Binary {
            op: *op,
            left: boxed(left),
            right: boxed(right),
        },
        ExprKind::Unary { op, operand } => canon::ExprKind::Unary {
            op: *op,
            operand: boxed(operand),
        },
    }
}

/// Plain strings become literals; interpolated ones keep their segments.
fn string(parts: &[StrPart]) -> canon::ExprKind {
    if parts.iter().all(|p| matches!(p, StrPart::Text(_))) {
        let text: String = parts
            .iter()
            .filter_map(|p| match p {
                StrPart::Text(t) => Some(t.as_str()),
                StrPart::Expr(_) => None,
            })
            .collect();
        return canon::ExprKind::Literal(Literal::Str(text.into()));
    }
    canon::ExprKind::Interpolate(
        parts
            .iter()
            .map(|p| match p {
                StrPart::Text(t) => Segment::Text(t.as_str().into()),
                StrPart::Expr(e) => Segment::Expr(expr(e)),
            })
            .collect(),
    )
}
