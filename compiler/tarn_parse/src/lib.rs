//! Recursive-descent parser for Tarn.
//!
//! Three entry points share one grammar:
//! - [`parse_unit`] for whole source files
//! - [`parse_signature`] for native member declarations supplied by the host
//! - [`parse_type`] for standalone type text
//!
//! Errors inside a statement or class member are reported and skipped to the
//! end of the line, so a single mistake yields a single diagnostic.

mod cursor;
mod grammar;

use tarn_diagnostic::DiagnosticBag;
use tarn_ir::ast::{Signature, SourceUnit, TypeExpr};
use tarn_lexer::{lex, TokenKind};

use cursor::Parser;

/// Parsed unit with lexer and parser diagnostics combined.
#[derive(Debug)]
pub struct ParseOutput {
    pub unit: SourceUnit,
    pub diagnostics: DiagnosticBag,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

#[tracing::instrument(level = "debug", skip(source))]
pub fn parse_unit(name: &str, source: &str) -> ParseOutput {
    let lexed = lex(source);
    let mut parser = Parser::new(&lexed.tokens);
    let unit = parser.unit(name);

    let mut diagnostics = lexed.diagnostics;
    diagnostics.extend(parser.diagnostics);
    tracing::debug!(items = unit.items.len(), errors = diagnostics.error_count(), "parsed");
    ParseOutput { unit, diagnostics }
}

/// Parse `modifiers* [function] RetType name(params)` with nothing after it.
pub fn parse_signature(text: &str) -> Result<Signature, DiagnosticBag> {
    parse_fragment(text, |parser| {
        let start = parser.span();
        let modifiers = parser.modifiers();
        parser.eat(&TokenKind::Function);
        parser.signature_rest(modifiers, start)
    })
}

/// Parse a single type expression with nothing after it.
pub fn parse_type(text: &str) -> Result<TypeExpr, DiagnosticBag> {
    parse_fragment(text, |parser| parser.type_expr())
}

fn parse_fragment<T>(
    text: &str,
    rule: impl FnOnce(&mut Parser<'_>) -> Result<T, tarn_diagnostic::Diagnostic>,
) -> Result<T, DiagnosticBag> {
    let lexed = lex(text);
    let mut diagnostics = lexed.diagnostics;
    let mut parser = Parser::new(&lexed.tokens);
    parser.skip_newlines();
    let result = rule(&mut parser).and_then(|value| {
        parser.skip_separators();
        if parser.at_eof() {
            Ok(value)
        } else {
            Err(parser.unexpected("end of input"))
        }
    });
    diagnostics.extend(std::mem::take(&mut parser.diagnostics));
    match result {
        Ok(value) if !diagnostics.has_errors() => Ok(value),
        Ok(_) => Err(diagnostics),
        Err(diag) => {
            diagnostics.push(diag);
            Err(diagnostics)
        }
    }
}
