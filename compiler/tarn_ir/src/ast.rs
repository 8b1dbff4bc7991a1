//! Syntax tree produced by the parser.
//!
//! Nodes own their children (`Box`/`Vec`). Every node that can be the
//! subject of a diagnostic carries a [`Span`].

use crate::{AssignOp, BinaryOp, Modifiers, Span, UnaryOp};

/// An identifier together with its location.
#[derive(Clone, Debug, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Ident {
            name: name.into(),
            span,
        }
    }
}

/// Modifiers as written, keeping each keyword's span for diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierList {
    pub flags: Modifiers,
    pub spans: Vec<(Modifiers, Span)>,
}

impl ModifierList {
    pub fn contains(&self, flag: Modifiers) -> bool {
        self.flags.contains(flag)
    }

    /// Span of the keyword for `flag`, if present.
    pub fn span_of(&self, flag: Modifiers) -> Option<Span> {
        self.spans
            .iter()
            .find(|(f, _)| *f == flag)
            .map(|(_, span)| *span)
    }
}

/// A type as written in source.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    /// `name` or `name<args>`.
    Named {
        name: Ident,
        args: Vec<TypeExpr>,
        span: Span,
    },
    /// `this` inside a class body.
    SelfType(Span),
    /// `(int a, string b) => int`.
    Function {
        params: Vec<TypeExpr>,
        ret: Box<TypeExpr>,
        span: Span,
    },
    /// `a | b | c`.
    Union(Vec<TypeExpr>, Span),
    /// `T?`.
    Optional(Box<TypeExpr>, Span),
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Named { span, .. }
            | TypeExpr::SelfType(span)
            | TypeExpr::Function { span, .. }
            | TypeExpr::Union(_, span)
            | TypeExpr::Optional(_, span) => *span,
        }
    }
}

/// One compilation unit: a single source file.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceUnit {
    pub name: String,
    pub items: Vec<Item>,
}

/// Top-level declarations.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Class(ClassDecl),
    Function(FunctionDecl),
    Global(VarDecl),
    Main(Block),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: Ident,
    pub type_params: Vec<Ident>,
    pub members: Vec<MemberDecl>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum MemberDecl {
    Field(FieldDecl),
    Method(FunctionDecl),
    Constructor(ConstructorDecl),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub modifiers: ModifierList,
    pub ty: TypeExpr,
    pub name: Ident,
    pub init: Option<Expr>,
    pub span: Span,
}

/// Header of a function or method: `modifiers RetType name(params)`.
///
/// Native signature text parses to exactly this shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub modifiers: ModifierList,
    pub ret: TypeExpr,
    pub name: Ident,
    pub params: Vec<Param>,
    pub span: Span,
}

/// A free function (`function ...`) or a method inside a class.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub signature: Signature,
    pub body: Option<Block>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstructorDecl {
    pub modifiers: ModifierList,
    pub params: Vec<Param>,
    pub body: Option<Block>,
    pub span: Span,
}

/// A declared parameter.
///
/// `ty` is `None` only for constructor auto-assign parameters written as
/// `this.field`; their type comes from the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub default: Option<Expr>,
    pub vararg: bool,
    pub auto_assign: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: Ident,
    pub ty: Option<TypeExpr>,
    pub init: Option<Expr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Var(VarDecl),
    Assign {
        target: Expr,
        op: AssignOp,
        value: Expr,
    },
    Expr(Expr),
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    For {
        var: Ident,
        iterable: Expr,
        body: Block,
    },
    Repeat {
        count: Expr,
        body: Block,
    },
    Return(Option<Expr>),
    Block(Block),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// A piece of a string literal: raw text or an interpolated expression.
#[derive(Clone, Debug, PartialEq)]
pub enum StrPart {
    Text(String),
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Str(Vec<StrPart>),
    Array(Vec<Expr>),
    Ident(String),
    This,
    Field {
        object: Box<Expr>,
        name: Ident,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
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
    /// Placeholder left behind by parser recovery.
    Error,
}
