//! Command handlers for the `tarn` binary.
//!
//! Each handler reports to stderr and returns the process exit code.
//! Argument parsing lives here too so it can be tested without a process.

mod check;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use tarn_eval::{EvalConfig, FaultPolicy};

use crate::{CompileError, LoadError, Session, SourceFile};

pub use check::check_file;
pub use run::run_file;

/// Options shared by `run` and `check`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub file: PathBuf,
    /// Directory of `.tarn` files imported before the file is compiled.
    pub sdk: Option<PathBuf>,
    /// Stop at the first runtime fault instead of continuing after the
    /// faulting block.
    pub fail_fast: bool,
    pub max_call_depth: Option<usize>,
}

impl Options {
    /// Parse the arguments following the command name.
    pub fn parse(args: &[String]) -> Result<Options, String> {
        let mut options = Options::default();
        let mut file = None;
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--sdk" => {
                    let dir = args.next().ok_or("`--sdk` needs a directory")?;
                    options.sdk = Some(PathBuf::from(dir));
                }
                "--fail-fast" => options.fail_fast = true,
                "--max-depth" => {
                    let depth = args.next().ok_or("`--max-depth` needs a number")?;
                    let depth = depth
                        .parse()
                        .map_err(|_| format!("invalid depth `{depth}`"))?;
                    options.max_call_depth = Some(depth);
                }
                flag if flag.starts_with('-') => return Err(format!("unknown option `{flag}`")),
                path if file.is_none() => file = Some(PathBuf::from(path)),
                extra => return Err(format!("unexpected argument `{extra}`")),
            }
        }
        options.file = file.ok_or("missing file path")?;
        Ok(options)
    }

    pub fn eval_config(&self) -> EvalConfig {
        let mut config = EvalConfig::default();
        if self.fail_fast {
            config.fault_policy = FaultPolicy::Propagate;
        }
        if let Some(depth) = self.max_call_depth {
            config.max_call_depth = depth;
        }
        config
    }
}

fn read_source(options: &Options) -> Result<SourceFile, ExitCode> {
    SourceFile::read(&options.file).map_err(|error| {
        eprintln!("error: cannot read '{}': {error}", options.file.display());
        ExitCode::FAILURE
    })
}

/// A session with the options' configuration and SDK loaded.
fn open_session(options: &Options) -> Result<Session, ExitCode> {
    let mut session = Session::new()
        .map_err(|error| report_compile_error(&error))?
        .with_config(options.eval_config());
    if let Some(sdk) = &options.sdk {
        match session.load_sdk(sdk) {
            Ok(()) => {}
            Err(LoadError::Io(error)) => {
                eprintln!("error: cannot read SDK '{}': {error}", sdk.display());
                return Err(ExitCode::FAILURE);
            }
            Err(LoadError::Compile(error)) => return Err(report_compile_error(&error)),
        }
    }
    Ok(session)
}

/// Print warnings the session collected so far.
fn report_warnings(session: &Session) {
    for group in session.take_warnings() {
        eprint!("{}", group.render());
    }
}

fn report_compile_error(error: &CompileError) -> ExitCode {
    eprint!("{}", error.render());
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests;
