//! Tokenizer for Tarn source text.
//!
//! Built on `logos` for the flat token table. Three things are handled by
//! hand in the driving loop because they need context a regex lacks:
//! fractional parts of numbers (so `1..5` is a range), string literals with
//! `{expr}` interpolation, and integer overflow.
//!
//! Newlines are significant and emitted as [`TokenKind::Newline`]; `#` line
//! comments and `/* */` block comments are skipped.

mod raw;
mod string;
mod token;

use logos::Logos;
use tarn_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use tarn_ir::{AssignOp, Modifiers, Span};

use raw::RawToken;
pub use token::{StrPiece, Token, TokenKind};

/// Tokens for one unit plus any lexical errors.
#[derive(Debug)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: DiagnosticBag,
}

/// Tokenize a whole source unit. The token list always ends with `Eof`.
pub fn lex(source: &str) -> LexOutput {
    let mut diagnostics = DiagnosticBag::new();
    let tokens = lex_at(source, 0, &mut diagnostics);
    LexOutput {
        tokens,
        diagnostics,
    }
}

/// Tokenize `source`, which starts `base` bytes into the enclosing unit.
pub(crate) fn lex_at(source: &str, base: u32, diagnostics: &mut DiagnosticBag) -> Vec<Token> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let slice = lexer.slice();
        let kind = match result {
            Ok(RawToken::Int) => {
                let fraction = fraction_len(&source[range.end..]);
                if fraction > 0 {
                    lexer.bump(fraction);
                }
                let text = &source[range.start..range.end + fraction];
                number(text, fraction > 0, Span::from_range(lexer.span()).offset(base), diagnostics)
            }
            Ok(RawToken::DoubleQuote | RawToken::SingleQuote) => {
                let quote = if slice == "'" { '\'' } else { '"' };
                let scanned = string::scan(source, range.end, quote, base, diagnostics);
                lexer.bump(scanned.end - range.end);
                TokenKind::Str(scanned.pieces)
            }
            Ok(RawToken::Modifier) => {
                Modifiers::from_keyword(slice).map_or(TokenKind::Error, TokenKind::Modifier)
            }
            Ok(RawToken::Ident) => TokenKind::Ident(slice.to_string()),
            Ok(raw) => convert(raw),
            Err(()) => {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E0002)
                        .with_message(format!("invalid character `{slice}`"))
                        .with_label(Span::from_range(range).offset(base), "not valid here"),
                );
                TokenKind::Error
            }
        };
        tokens.push(Token::new(kind, Span::from_range(lexer.span()).offset(base)));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::new(end, end).offset(base)));
    tokens
}

/// Length of a `.digits` suffix directly after an integer, or 0.
fn fraction_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'.' || !bytes[1].is_ascii_digit() {
        return 0;
    }
    1 + bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn number(text: &str, is_float: bool, span: Span, diagnostics: &mut DiagnosticBag) -> TokenKind {
    let parsed = if is_float {
        text.parse::<f64>().ok().map(TokenKind::Float)
    } else {
        text.parse::<i64>().ok().map(TokenKind::Int)
    };
    parsed.unwrap_or_else(|| {
        diagnostics.push(
            Diagnostic::error(ErrorCode::E0003)
                .with_message(format!("number literal `{text}` is out of range"))
                .with_label(span, "does not fit in 64 bits"),
        );
        TokenKind::Error
    })
}

fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::Newline => TokenKind::Newline,
        RawToken::Main => TokenKind::Main,
        RawToken::Function => TokenKind::Function,
        RawToken::Class => TokenKind::Class,
        RawToken::Constructor => TokenKind::Constructor,
        RawToken::Var => TokenKind::Var,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::Repeat => TokenKind::Repeat,
        RawToken::Return => TokenKind::Return,
        RawToken::This => TokenKind::This,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::DotDot => TokenKind::DotDot,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Question => TokenKind::Question,
        RawToken::FatArrow => TokenKind::FatArrow,
        RawToken::Eq => TokenKind::Assign(AssignOp::Set),
        RawToken::PlusEq => TokenKind::Assign(AssignOp::Add),
        RawToken::MinusEq => TokenKind::Assign(AssignOp::Sub),
        RawToken::StarEq => TokenKind::Assign(AssignOp::Mul),
        RawToken::SlashEq => TokenKind::Assign(AssignOp::Div),
        RawToken::PercentEq => TokenKind::Assign(AssignOp::Mod),
        RawToken::SlashSlashEq => TokenKind::Assign(AssignOp::IntDiv),
        RawToken::StarStarEq => TokenKind::Assign(AssignOp::Pow),
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::SlashSlash => TokenKind::SlashSlash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Bang => TokenKind::Bang,
        // Handled by the caller.
        RawToken::Modifier
        | RawToken::Ident
        | RawToken::Int
        | RawToken::DoubleQuote
        | RawToken::SingleQuote => TokenKind::Error,
    }
}

#[cfg(test)]
mod tests;
