//! Executable IR.
//!
//! The canonical tree is what the interpreter walks. It is a structural
//! lowering of the checked syntax tree: names stay names, call targets are
//! chosen at run time from the runtime types of the operands.

use std::rc::Rc;

use crate::{AssignOp, BinaryOp, Span, UnaryOp};

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Declare a variable in the current call frame.
    Var { name: String, init: Option<Expr> },
    Assign {
        place: Place,
        op: AssignOp,
        value: Expr,
    },
    /// A call evaluated for its effect.
    Expr(Expr),
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While { cond: Expr, body: Block },
    For {
        var: String,
        iterable: Expr,
        body: Block,
    },
    Repeat { count: Expr, body: Block },
    Return(Option<Expr>),
    Block(Block),
}

/// Assignment destination.
#[derive(Clone, Debug, PartialEq)]
pub enum Place {
    Var(String),
    Field { object: Expr, name: String },
    Index { object: Expr, index: Expr },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    Null,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    Text(Rc<str>),
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// String with interpolated segments, concatenated at run time.
    Interpolate(Vec<Segment>),
    Array(Vec<Expr>),
    Var(String),
    This,
    Field {
        object: Box<Expr>,
        name: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Callee,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

/// What a call expression targets.
#[derive(Clone, Debug, PartialEq)]
pub enum Callee {
    /// `name(args)`: a callable local, a method of the current type, a free
    /// function, then a constructor of the type with that name.
    Name(String),
    /// `object.name(args)`.
    Member { object: Box<Expr>, name: String },
    /// Any other expression, called through its type's invoker.
    Value(Box<Expr>),
}
