//! Logos token table.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub(crate) enum RawToken {
    #[token("\n")]
    Newline,

    // Keywords
    #[token("main")]
    Main,
    #[token("function")]
    Function,
    #[token("class")]
    Class,
    #[token("constructor")]
    Constructor,
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("repeat")]
    Repeat,
    #[token("return")]
    Return,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("private")]
    #[token("protected")]
    #[token("abstract")]
    #[token("native")]
    #[token("final")]
    #[token("static")]
    #[token("readonly")]
    #[token("operator")]
    #[token("iterator")]
    #[token("get")]
    #[token("set")]
    #[token("indexer")]
    #[token("accessor")]
    #[token("assigner")]
    #[token("invoker")]
    Modifier,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    /// Digits only; a fractional part is taken by the lexer loop so that
    /// `1..5` stays a range.
    #[regex(r"[0-9]+")]
    Int,
    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("...")]
    Ellipsis,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token("=>")]
    FatArrow,

    // Assignment
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("//=")]
    SlashSlashEq,
    #[token("**=")]
    StarStarEq,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("//")]
    SlashSlash,
    #[token("%")]
    Percent,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("|")]
    Pipe,
    #[token("!")]
    Bang,
}
