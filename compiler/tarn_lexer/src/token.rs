use std::fmt;

use tarn_ir::{AssignOp, Modifiers, Span};

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// A piece of a string literal.
///
/// Interpolated segments are lexed eagerly into their own token stream,
/// terminated by [`TokenKind::Eof`], with spans relative to the whole unit.
#[derive(Clone, Debug, PartialEq)]
pub enum StrPiece {
    Text(String),
    Interp { tokens: Vec<Token>, span: Span },
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(Vec<StrPiece>),

    // Keywords
    Main,
    Function,
    Class,
    Constructor,
    Var,
    If,
    Else,
    While,
    For,
    In,
    Repeat,
    Return,
    This,
    True,
    False,
    Null,
    Modifier(Modifiers),

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    DotDot,
    Ellipsis,
    Colon,
    Semicolon,
    Question,
    FatArrow,

    Assign(AssignOp),

    // Operators
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    Pipe,
    Bang,

    Newline,
    Eof,
    /// Unrecognized input; a diagnostic has already been reported.
    Error,
}

impl TokenKind {
    /// Short human-readable description for "expected X, found Y" messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("identifier `{name}`"),
            TokenKind::Int(_) => "integer literal".to_string(),
            TokenKind::Float(_) => "float literal".to_string(),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Error => "invalid token".to_string(),
            other => format!("`{other}`"),
        }
    }

    /// Whether this token ends a statement.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Ident(name) => return f.write_str(name),
            TokenKind::Int(v) => return write!(f, "{v}"),
            TokenKind::Float(v) => return write!(f, "{v}"),
            TokenKind::Str(_) => "\"...\"",
            TokenKind::Modifier(m) => return write!(f, "{m}"),
            TokenKind::Assign(op) => op.as_symbol(),
            TokenKind::Main => "main",
            TokenKind::Function => "function",
            TokenKind::Class => "class",
            TokenKind::Constructor => "constructor",
            TokenKind::Var => "var",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::In => "in",
            TokenKind::Repeat => "repeat",
            TokenKind::Return => "return",
            TokenKind::This => "this",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Ellipsis => "...",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Question => "?",
            TokenKind::FatArrow => "=>",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::SlashSlash => "//",
            TokenKind::Percent => "%",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Pipe => "|",
            TokenKind::Bang => "!",
            TokenKind::Newline => "\\n",
            TokenKind::Eof => "<eof>",
            TokenKind::Error => "<error>",
        };
        f.write_str(text)
    }
}
