#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

#[test]
fn line_col_lookup() {
    let source = "main {\n    print(x)\n}";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_col(source, 0), (1, 1));
    assert_eq!(table.line_col(source, 7), (2, 1));
    assert_eq!(table.line_col(source, 17), (2, 11));
    assert_eq!(table.line_text(source, 2), "    print(x)");
    assert_eq!(table.line_text(source, 3), "}");
    assert_eq!(table.line_text(source, 9), "");
}

#[test]
fn renders_caret_under_primary_span() {
    let source = "main {\n    print(x)\n}";
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("unknown variable `x`")
        .with_label(Span::new(17, 18), "not found in this scope");

    let out = render(&[diag], "demo.tarn", source);
    let expected = [
        "error[E2002]: unknown variable `x`",
        " --> demo.tarn:2:11",
        " |",
        "2 |     print(x)",
        " |           ^ not found in this scope",
        "aborting due to 1 error",
        "",
    ]
    .join("\n");
    assert_eq!(out, expected);
}

#[test]
fn respects_error_limit() {
    let source = "a\nb\n";
    let diags: Vec<_> = (0..3)
        .map(|_| Diagnostic::error(ErrorCode::E1001).with_message("bad"))
        .collect();
    let config = DiagnosticConfig {
        error_limit: 2,
        colors: false,
    };
    let mut emitter = TerminalEmitter::new(Vec::new(), "f", source, config);
    emitter.emit_all(&diags).unwrap();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(out.matches("error[E1001]").count(), 2);
    assert!(out.ends_with("aborting due to 2 errors\n"));
}

#[test]
fn renders_context_labels_and_warnings() {
    let source = "var s = \"{x y}\"";
    let error = Diagnostic::error(ErrorCode::E1002)
        .with_message("expected `}`")
        .with_label(Span::new(12, 13), "")
        .with_context(Span::new(8, 15), "in this interpolation");
    let warning = Diagnostic::warning(ErrorCode::E2024).with_message("no effect");

    let out = render(&[warning, error], "t.tarn", source);
    let caret = format!(" | {}^ ", " ".repeat(12));
    let expected = [
        "warning[E2024]: no effect",
        "error[E1002]: expected `}`",
        " --> t.tarn:1:13",
        " |",
        "1 | var s = \"{x y}\"",
        caret.as_str(),
        "  = in this interpolation: 1:9",
        "aborting due to 1 error",
        "",
    ]
    .join("\n");
    assert_eq!(out, expected);
}
