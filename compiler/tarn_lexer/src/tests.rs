use pretty_assertions::assert_eq;
use tarn_diagnostic::ErrorCode;
use tarn_ir::{AssignOp, Modifiers, Span};

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let out = lex(source);
    assert!(
        out.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        out.diagnostics
    );
    out.tokens.into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_string())
}

#[test]
fn function_header() {
    assert_eq!(
        kinds("function int add(int a, int b)"),
        vec![
            TokenKind::Function,
            ident("int"),
            ident("add"),
            TokenKind::LParen,
            ident("int"),
            ident("a"),
            TokenKind::Comma,
            ident("int"),
            ident("b"),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn modifiers_are_keywords() {
    assert_eq!(
        kinds("static get indexer"),
        vec![
            TokenKind::Modifier(Modifiers::STATIC),
            TokenKind::Modifier(Modifiers::GET),
            TokenKind::Modifier(Modifiers::INDEXER),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped_and_newlines_kept() {
    assert_eq!(
        kinds("a # trailing\n/* block\n comment */ b"),
        vec![ident("a"), TokenKind::Newline, ident("b"), TokenKind::Eof]
    );
}

#[test]
fn numbers_and_ranges() {
    assert_eq!(
        kinds("1..5 2.5 7"),
        vec![
            TokenKind::Int(1),
            TokenKind::DotDot,
            TokenKind::Int(5),
            TokenKind::Float(2.5),
            TokenKind::Int(7),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn longest_operator_wins() {
    assert_eq!(
        kinds("a //= b ** c // d ... =>"),
        vec![
            ident("a"),
            TokenKind::Assign(AssignOp::IntDiv),
            ident("b"),
            TokenKind::StarStar,
            ident("c"),
            TokenKind::SlashSlash,
            ident("d"),
            TokenKind::Ellipsis,
            TokenKind::FatArrow,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn plain_string_with_escapes() {
    let out = kinds(r#""a\tb\{c\}" 'it\'s'"#);
    assert_eq!(
        out,
        vec![
            TokenKind::Str(vec![StrPiece::Text("a\tb{c}".to_string())]),
            TokenKind::Str(vec![StrPiece::Text("it's".to_string())]),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn interpolation_is_lexed_in_place() {
    let source = r#""sum {add(2, 3)}!""#;
    let out = lex(source);
    assert!(out.diagnostics.is_empty());
    let TokenKind::Str(pieces) = &out.tokens[0].kind else {
        panic!("expected string, got {:?}", out.tokens[0].kind);
    };
    assert_eq!(pieces.len(), 3);
    assert_eq!(pieces[0], StrPiece::Text("sum ".to_string()));
    assert_eq!(pieces[2], StrPiece::Text("!".to_string()));

    let StrPiece::Interp { tokens, span } = &pieces[1] else {
        panic!("expected interpolation");
    };
    assert_eq!(*span, Span::new(5, 16));
    let inner: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        inner,
        vec![
            ident("add"),
            TokenKind::LParen,
            TokenKind::Int(2),
            TokenKind::Comma,
            TokenKind::Int(3),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
    // Inner spans point into the enclosing unit.
    assert_eq!(tokens[0].span, Span::new(6, 9));
    assert_eq!(out.tokens[0].span, Span::new(0, 18));
}

#[test]
fn nested_braces_and_quotes_inside_interpolation() {
    let out = lex(r#""{f("}")} done""#);
    assert!(out.diagnostics.is_empty());
    let TokenKind::Str(pieces) = &out.tokens[0].kind else {
        panic!("expected string");
    };
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[1], StrPiece::Text(" done".to_string()));
}

#[test]
fn unterminated_string_reports() {
    let out = lex("\"abc\nx");
    let codes: Vec<_> = out.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0001]);
    let kinds: Vec<_> = out.tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Str(vec![StrPiece::Text("abc".to_string())]),
            TokenKind::Newline,
            ident("x"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_interpolation_reports() {
    let out = lex("\"a {b\"\n");
    assert!(out
        .diagnostics
        .iter()
        .any(|d| d.code == ErrorCode::E0004));
}

#[test]
fn invalid_character_and_overflow() {
    let out = lex("a @ 99999999999999999999");
    let codes: Vec<_> = out.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0002, ErrorCode::E0003]);
    assert_eq!(out.tokens[1].kind, TokenKind::Error);
    assert_eq!(out.tokens[2].kind, TokenKind::Error);
}
