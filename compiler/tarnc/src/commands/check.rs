//! The `check` command: compile a file without running it.

use std::process::ExitCode;

use super::{open_session, read_source, report_compile_error, report_warnings, Options};

pub fn check_file(options: &Options) -> ExitCode {
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
    match compiled {
        Ok(program) => {
            tracing::info!(
                classes = program.classes.len(),
                functions = program.functions.len(),
                "checked"
            );
            ExitCode::SUCCESS
        }
        Err(error) => report_compile_error(&error),
    }
}
