//! One module graph: a type table, its natives and the modules imported
//! into it.

use std::cell::RefCell;
use std::path::Path;

use tarn_canon::{Module, Program};
use tarn_check::Processor;
use tarn_eval::{
    EvalConfig, EvalResult, Interpreter, NativeRegistry, RuntimeFault, SharedInputHandler,
    SharedPrintHandler, Value,
};
use tarn_ir::ast::SourceUnit;
use tarn_types::TypeTable;

use crate::{CompileError, DiagnosticGroup, SourceFile};

/// Name under which native signature problems are reported.
const NATIVES: &str = "<natives>";

/// What running a program did.
#[derive(Debug)]
pub struct RunOutcome {
    /// `Err` only under [`FaultPolicy::Propagate`](tarn_eval::FaultPolicy).
    pub result: Result<(), RuntimeFault>,
    /// Faults blocks caught and recorded, oldest first.
    pub faults: Vec<RuntimeFault>,
}

impl RunOutcome {
    /// Finished without any fault, caught or not.
    pub fn is_clean(&self) -> bool {
        self.result.is_ok() && self.faults.is_empty()
    }

    /// Recorded faults followed by the one that ended the run, if any.
    pub fn all_faults(&self) -> impl Iterator<Item = &RuntimeFault> {
        self.faults.iter().chain(self.result.as_ref().err())
    }
}

/// Compiles and runs units against one shared [`TypeTable`].
///
/// Classes and functions of every compiled unit stay registered in the
/// table, so a session holds one program together with the modules it
/// imports. Compile each unit once.
///
/// A compile that fails unregisters whatever it registered, so a corrected
/// unit can be compiled again in the same session.
pub struct Session {
    table: TypeTable,
    natives: NativeRegistry,
    imports: Vec<Module>,
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
    input: Option<SharedInputHandler>,
    warnings: RefCell<Vec<DiagnosticGroup>>,
}

impl Session {
    /// A session over the core natives.
    pub fn new() -> Result<Self, CompileError> {
        Session::with_natives(NativeRegistry::with_core())
    }

    /// A session over `natives`, whose signatures are baked into a fresh
    /// table.
    #[tracing::instrument(level = "debug", skip_all, fields(natives = natives.len()))]
    pub fn with_natives(natives: NativeRegistry) -> Result<Self, CompileError> {
        let table = TypeTable::new();
        let mut processor = Processor::new(&table);
        processor.bake_natives(&natives.decls());
        let diagnostics = processor.finish();
        if diagnostics.has_errors() {
            let mut error = CompileError::default();
            error.push_detached(NATIVES, diagnostics);
            return Err(error);
        }
        Ok(Session {
            table,
            natives,
            imports: Vec::new(),
            config: EvalConfig::default(),
            print_handler: None,
            input: None,
            warnings: RefCell::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_input(mut self, input: SharedInputHandler) -> Self {
        self.input = Some(input);
        self
    }

    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    pub fn natives(&self) -> &NativeRegistry {
        &self.natives
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Check `file` and generate its program.
    pub fn compile(&self, file: &SourceFile) -> Result<Program, CompileError> {
        let mut module = self.compile_module(file.unit_name(), std::slice::from_ref(file))?;
        // One unit in, one program out.
        module.programs.pop().ok_or_else(CompileError::default)
    }

    /// Check `files` as one module, so each may use what any other declares,
    /// and generate a program per file.
    ///
    /// Nothing is generated unless every file parses and checks cleanly.
    #[tracing::instrument(level = "debug", skip(self, files), fields(files = files.len()))]
    pub fn compile_module(&self, name: &str, files: &[SourceFile]) -> Result<Module, CompileError> {
        let mut error = CompileError::default();
        let mut units: Vec<SourceUnit> = Vec::with_capacity(files.len());
        for file in files {
            let parsed = tarn_parse::parse_unit(file.unit_name(), file.text());
            if parsed.has_errors() {
                error.push_file(file, parsed.diagnostics);
            } else {
                units.push(parsed.unit);
            }
        }
        if error.has_errors() {
            return Err(error);
        }

        let checkpoint = self.table.checkpoint();
        let mut processor = Processor::new(&self.table);
        for module in &self.imports {
            processor.import(module);
        }
        let mut symbols = processor.index(&units);
        processor.process(&units, &mut symbols);
        let diagnostics = processor.finish();
        if diagnostics.has_errors() {
            self.table.rollback(checkpoint);
            match files {
                [file] => error.push_file(file, diagnostics),
                _ => error.push_detached(name, diagnostics),
            }
            return Err(error);
        }
        if !diagnostics.is_empty() {
            let group = match files {
                [file] => DiagnosticGroup::file(file, diagnostics),
                _ => DiagnosticGroup::detached(name, diagnostics),
            };
            self.warnings.borrow_mut().push(group);
        }

        let module = Module::generate(name, &units, &symbols);
        tracing::debug!(programs = module.programs.len(), "generated");
        Ok(module)
    }

    /// Warnings from successful compiles since the last call, oldest first.
    pub fn take_warnings(&self) -> Vec<DiagnosticGroup> {
        std::mem::take(&mut *self.warnings.borrow_mut())
    }

    /// Make `module` visible to later compiles and include it before every
    /// run.
    pub fn import(&mut self, module: Module) {
        tracing::debug!(module = %module.name, "imported");
        self.imports.push(module);
    }

    /// Compile every `.tarn` file in `dir` as one module and import it.
    pub fn load_sdk(&mut self, dir: &Path) -> Result<(), LoadError> {
        let files = SourceFile::read_dir(dir).map_err(LoadError::Io)?;
        let name = dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("sdk")
            .to_string();
        let module = self.compile_module(&name, &files).map_err(LoadError::Compile)?;
        self.import(module);
        Ok(())
    }

    fn interpreter(&self) -> Interpreter<'_> {
        let mut builder = Interpreter::builder(&self.table, &self.natives).config(self.config.clone());
        if let Some(handler) = &self.print_handler {
            builder = builder.print_handler(handler.clone());
        }
        if let Some(input) = &self.input {
            builder = builder.input(input.clone());
        }
        builder.build()
    }

    fn include_imports(&self, interpreter: &mut Interpreter<'_>) -> Result<(), RuntimeFault> {
        for module in &self.imports {
            interpreter.include_module(module)?;
        }
        Ok(())
    }

    /// Run `program` after including every imported module.
    pub fn run(&self, program: &Program) -> RunOutcome {
        let mut interpreter = self.interpreter();
        let result = self
            .include_imports(&mut interpreter)
            .and_then(|()| interpreter.run(program));
        RunOutcome {
            result,
            faults: interpreter.take_faults(),
        }
    }

    /// Run a module compiled by [`compile_module`](Self::compile_module):
    /// programs without `main` are included first, then each program with
    /// one runs in module order.
    pub fn run_module(&self, module: &Module) -> RunOutcome {
        let mut interpreter = self.interpreter();
        let result = self.include_imports(&mut interpreter).and_then(|()| {
            let (entry, libraries): (Vec<&Program>, Vec<&Program>) =
                module.programs.iter().partition(|p| p.main.is_some());
            for program in libraries {
                interpreter.include(program)?;
            }
            for program in entry {
                interpreter.run(program)?;
            }
            Ok(())
        });
        RunOutcome {
            result,
            faults: interpreter.take_faults(),
        }
    }

    /// Include `program` without running `main`, then call its free
    /// function `name`.
    pub fn call(&self, program: &Program, name: &str, args: Vec<Value>) -> EvalResult {
        let mut interpreter = self.interpreter();
        self.include_imports(&mut interpreter)?;
        interpreter.include(program)?;
        interpreter.call_function(name, args)
    }
}

/// Failure to load a module from disk.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Compile(CompileError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(error) => write!(f, "cannot read module: {error}"),
            LoadError::Compile(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(error) => Some(error),
            LoadError::Compile(error) => Some(error),
        }
    }
}
