//! `InterpreterBuilder` for creating Interpreter instances with various
//! configurations.

use rustc_hash::FxHashMap;
use tarn_types::TypeTable;

use super::Interpreter;
use crate::environment::Environment;
use crate::input::{stdin_handler, SharedInputHandler};
use crate::{stdout_handler, EvalConfig, FaultPolicy, NativeRegistry, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// The type table must be the one the checker baked `natives` into and
/// populated from the programs that will run.
pub struct InterpreterBuilder<'t> {
    table: &'t TypeTable,
    natives: &'t NativeRegistry,
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
    input: Option<SharedInputHandler>,
}

impl<'t> InterpreterBuilder<'t> {
    pub fn new(table: &'t TypeTable, natives: &'t NativeRegistry) -> Self {
        InterpreterBuilder {
            table,
            natives,
            config: EvalConfig::default(),
            print_handler: None,
            input: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.config.fault_policy = policy;
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    /// Set the print handler. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set where `readLine` reads from. Defaults to stdin.
    #[must_use]
    pub fn input(mut self, input: SharedInputHandler) -> Self {
        self.input = Some(input);
        self
    }

    pub fn build(self) -> Interpreter<'t> {
        Interpreter {
            table: self.table,
            natives: self.natives,
            config: self.config,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            input: self.input.unwrap_or_else(stdin_handler),
            env: Environment::new(),
            globals: FxHashMap::default(),
            statics: FxHashMap::default(),
            faults: Vec::new(),
            next_identity: 0,
        }
    }
}
