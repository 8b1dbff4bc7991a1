//! The `run` command: compile a file and run its `main` block.

use std::process::ExitCode;

use tarn_diagnostic::emitter::render;
use tarn_diagnostic::Diagnostic;

use super::{open_session, read_source, report_compile_error, report_warnings, Options};

/// Compile and run `options.file`.
///
/// Compile errors stop before anything runs. Runtime faults are reported
/// after the run and make the exit code non-zero, even when execution
/// continued past them.
pub fn run_file(options: &Options) -> ExitCode {
    let source = match read_source(options) {
        Ok(source) => source,
        Err(code) => return code,
    };
    let session = match open_session(options) {
        Ok(session) => session,
        Err(code) => return code,
    };
    let compiled = session.compile(&source);
    report_warnings(&session);
    let program = match compiled {
        Ok(program) => program,
        Err(error) => return report_compile_error(&error),
    };

    let outcome = session.run(&program);
    if outcome.is_clean() {
        return ExitCode::SUCCESS;
    }
    let diagnostics: Vec<Diagnostic> = outcome.all_faults().map(|f| f.to_diagnostic()).collect();
    eprint!("{}", render(&diagnostics, source.name(), source.text()));
    ExitCode::FAILURE
}
