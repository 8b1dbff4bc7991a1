//! End-to-end interpreter tests: parse, check and generate a unit, then run
//! it with captured output.

#![allow(clippy::unwrap_used)]

mod class_tests;

use tarn_check::Processor;
use tarn_diagnostic::ErrorCode;
use tarn_types::TypeTable;

use crate::{
    buffer_handler, scripted_handler, EvalConfig, FaultPolicy, Interpreter, NativeRegistry,
    RuntimeFault,
};

/// What one run produced.
pub(crate) struct Outcome {
    pub(crate) output: String,
    pub(crate) faults: Vec<RuntimeFault>,
    pub(crate) result: Result<(), RuntimeFault>,
}

impl Outcome {
    fn fault_codes(&self) -> Vec<ErrorCode> {
        self.faults.iter().map(RuntimeFault::code).collect()
    }
}

fn run_with(source: &str, policy: FaultPolicy, input: &[&str]) -> Outcome {
    let config = EvalConfig {
        fault_policy: policy,
        ..EvalConfig::default()
    };
    run_configured(source, config, input)
}

fn run_configured(source: &str, config: EvalConfig, input: &[&str]) -> Outcome {
    run_hosted(source, &NativeRegistry::with_core(), config, input)
}

/// Run against a host-provided registry.
pub(crate) fn run_hosted(
    source: &str,
    natives: &NativeRegistry,
    config: EvalConfig,
    input: &[&str],
) -> Outcome {
    let table = TypeTable::new();

    let parsed = tarn_parse::parse_unit("test", source);
    assert!(parsed.diagnostics.is_empty(), "{:#?}", parsed.diagnostics);
    let units = [parsed.unit];

    let mut processor = Processor::new(&table);
    processor.bake_natives(&natives.decls());
    let mut symbols = processor.index(&units);
    processor.process(&units, &mut symbols);
    let diagnostics = processor.finish();
    assert!(!diagnostics.has_errors(), "{:#?}", diagnostics.as_slice());

    let program = tarn_canon::generate(&units[0], &symbols[0]);
    let output = buffer_handler();
    let mut interpreter = Interpreter::builder(&table, natives)
        .print_handler(output.clone())
        .input(scripted_handler(input.iter().copied()))
        .config(config)
        .build();
    let result = interpreter.run(&program);
    Outcome {
        output: output.get_output(),
        faults: interpreter.take_faults(),
        result,
    }
}

fn run(source: &str) -> Outcome {
    run_with(source, FaultPolicy::Continue, &[])
}

/// Output of a run that must finish without any fault.
#[track_caller]
fn output(source: &str) -> String {
    let outcome = run(source);
    assert!(outcome.result.is_ok(), "{:?}", outcome.result);
    assert!(outcome.faults.is_empty(), "{:#?}", outcome.faults);
    outcome.output
}

#[track_caller]
fn assert_output(source: &str, expected: &str) {
    pretty_assertions::assert_eq!(output(source), expected);
}
