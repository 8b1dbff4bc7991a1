//! Tests for the processor, grouped by the phase or construct they cover.

#![allow(clippy::unwrap_used)]

mod expression_tests;
mod registration_tests;
mod statement_tests;

use tarn_diagnostic::{DiagnosticBag, ErrorCode};
use tarn_ir::ast::SourceUnit;
use tarn_types::{NativeDecl, TypeTable, UnitSymbols};

use crate::Processor;

/// A small host surface, enough for bodies to do arithmetic, print and use
/// arrays.
fn natives() -> Vec<NativeDecl> {
    vec![
        NativeDecl::new("print", "void print(object... values)"),
        NativeDecl::new("int.add", "operator int add(int other)"),
        NativeDecl::new("int.add_float", "operator float add(float other)"),
        NativeDecl::new("int.subtract", "operator int subtract(int other)"),
        NativeDecl::new("int.multiply", "operator int multiply(int other)"),
        NativeDecl::new("int.compare", "operator int compare(int other)"),
        NativeDecl::new("int.negative", "operator int negative()"),
        NativeDecl::new("float.add", "operator float add(int | float other)"),
        NativeDecl::new("string.add", "operator string add(object other)"),
        NativeDecl::new("string.length", "int length()"),
        NativeDecl::new("boolean.and", "operator boolean and(boolean other)"),
        NativeDecl::new("boolean.not", "operator boolean not()"),
        NativeDecl::new("array.add", "void add(T item)"),
        NativeDecl::new("array.at", "get indexer T at(int index)"),
        NativeDecl::new("array.put", "set indexer void put(int index, T value)"),
        NativeDecl::new("array.length", "int length()"),
    ]
}

fn parse(name: &str, source: &str) -> SourceUnit {
    let out = tarn_parse::parse_unit(name, source);
    assert!(out.diagnostics.is_empty(), "{:#?}", out.diagnostics);
    out.unit
}

fn processor(table: &TypeTable) -> Processor<'_> {
    let mut processor = Processor::new(table);
    processor.bake_natives(&natives());
    assert!(!processor.has_errors(), "{:#?}", processor.diagnostics());
    processor
}

/// Index and process `units` against a fresh table with the test natives.
fn check_units(units: &[SourceUnit]) -> (DiagnosticBag, Vec<UnitSymbols>) {
    let table = TypeTable::new();
    let mut processor = processor(&table);
    let mut symbols = processor.index(units);
    processor.process(units, &mut symbols);
    (processor.finish(), symbols)
}

fn check(source: &str) -> DiagnosticBag {
    check_units(&[parse("test", source)]).0
}

fn codes(source: &str) -> Vec<ErrorCode> {
    check(source).iter().map(|d| d.code).collect()
}

#[track_caller]
fn assert_clean(source: &str) {
    let diagnostics = check(source);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {:#?}",
        diagnostics.as_slice()
    );
}

#[track_caller]
fn assert_codes(source: &str, expected: &[ErrorCode]) {
    pretty_assertions::assert_eq!(codes(source), expected);
}
