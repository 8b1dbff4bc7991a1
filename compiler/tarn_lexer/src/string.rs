//! String literal scanning with `{expr}` interpolation.

use tarn_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use tarn_ir::Span;

use crate::{lex_at, StrPiece};

pub(crate) struct Scanned {
    pub pieces: Vec<StrPiece>,
    /// Byte offset just past the closing quote, or where scanning stopped.
    pub end: usize,
}

/// Scan a literal whose opening quote ends at `start`.
pub(crate) fn scan(
    source: &str,
    start: usize,
    quote: char,
    base: u32,
    diagnostics: &mut DiagnosticBag,
) -> Scanned {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut pos = start;

    while let Some(c) = source[pos..].chars().next() {
        let at = pos;
        pos += c.len_utf8();
        match c {
            c if c == quote => {
                flush(&mut text, &mut pieces);
                return Scanned { pieces, end: pos };
            }
            '\n' => {
                pos = at;
                break;
            }
            '\\' => {
                let Some(escaped) = source[pos..].chars().next() else {
                    break;
                };
                pos += escaped.len_utf8();
                match unescape(escaped) {
                    Some(ch) => text.push(ch),
                    None => {
                        diagnostics.push(
                            Diagnostic::error(ErrorCode::E0005)
                                .with_message(format!("unknown escape sequence `\\{escaped}`"))
                                .with_label(Span::from_range(at..pos).offset(base), "here"),
                        );
                        text.push(escaped);
                    }
                }
            }
            '{' => {
                let Some(close) = interpolation_end(source, pos) else {
                    diagnostics.push(
                        Diagnostic::error(ErrorCode::E0004)
                            .with_message("unterminated interpolation in string literal")
                            .with_label(Span::from_range(at..pos).offset(base), "opened here")
                            .with_note("use `\\{` for a literal brace"),
                    );
                    flush(&mut text, &mut pieces);
                    let end = source[at..].find('\n').map_or(source.len(), |n| at + n);
                    return Scanned { pieces, end };
                };
                flush(&mut text, &mut pieces);
                let inner_base = base.saturating_add(u32::try_from(pos).unwrap_or(u32::MAX));
                let tokens = lex_at(&source[pos..close], inner_base, diagnostics);
                pieces.push(StrPiece::Interp {
                    tokens,
                    span: Span::from_range(at..close + 1).offset(base),
                });
                pos = close + 1;
            }
            _ => text.push(c),
        }
    }

    let opened = start.saturating_sub(1);
    diagnostics.push(
        Diagnostic::error(ErrorCode::E0001)
            .with_message("unterminated string literal")
            .with_label(Span::from_range(opened..pos).offset(base), "missing closing quote"),
    );
    flush(&mut text, &mut pieces);
    Scanned { pieces, end: pos }
}

fn flush(text: &mut String, pieces: &mut Vec<StrPiece>) {
    if !text.is_empty() {
        pieces.push(StrPiece::Text(std::mem::take(text)));
    }
}

fn unescape(c: char) -> Option<char> {
    Some(match c {
        '\\' => '\\',
        '"' => '"',
        '\'' => '\'',
        '{' => '{',
        '}' => '}',
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        '0' => '\0',
        _ => return None,
    })
}

/// Offset of the `}` closing an interpolation whose body starts at `from`.
///
/// Braces nest; quoted strings inside the body are skipped so a `}` in a
/// nested literal does not close the interpolation. Returns `None` at a
/// newline or end of input.
fn interpolation_end(source: &str, from: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 1u32;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            q @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != q {
                    if bytes[i] == b'\n' {
                        return None;
                    }
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'\n' => return None,
            _ => {}
        }
        i += 1;
    }
    None
}
