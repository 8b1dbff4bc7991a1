//! Processor state and the helpers shared by both phases.

use rustc_hash::FxHashMap;
use tarn_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use tarn_ir::ast::{Item, SourceUnit};
use tarn_ir::Span;
use tarn_types::{ItemSymbol, Type, TypeTable, UnitSymbols};

/// Where the checker currently is.
#[derive(Clone, Debug, Default)]
pub(crate) struct Context {
    /// Class whose declaration or body is being checked.
    pub class: Option<Type>,
    /// No `this` and no instance fields.
    pub is_static: bool,
    /// Declared return type of the enclosing executable.
    pub ret: Option<Type>,
    /// Inside a constructor body or a field initializer of `class`.
    pub initializing: bool,
}

impl Context {
    pub fn global() -> Self {
        Context {
            is_static: true,
            ..Context::default()
        }
    }
}

/// Two-phase semantic checker over one module graph.
///
/// Frame 0 holds module globals; every body gets a fresh stack on top of it.
pub struct Processor<'t> {
    pub(crate) table: &'t TypeTable,
    pub(crate) diagnostics: DiagnosticBag,
    pub(crate) frames: Vec<FxHashMap<String, Type>>,
    pub(crate) context: Context,
}

impl<'t> Processor<'t> {
    pub fn new(table: &'t TypeTable) -> Self {
        Processor {
            table,
            diagnostics: DiagnosticBag::new(),
            frames: vec![FxHashMap::default()],
            context: Context::global(),
        }
    }

    pub fn table(&self) -> &'t TypeTable {
        self.table
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn finish(self) -> DiagnosticBag {
        self.diagnostics
    }

    /// Check every body of `units`. Global types in `symbols` are settled
    /// here.
    #[tracing::instrument(level = "debug", skip_all, fields(units = units.len()))]
    pub fn process(&mut self, units: &[SourceUnit], symbols: &mut [UnitSymbols]) {
        for (unit, unit_symbols) in units.iter().zip(symbols.iter_mut()) {
            for (item, symbol) in unit.items.iter().zip(unit_symbols.items.iter_mut()) {
                if let (Item::Global(decl), ItemSymbol::Global { ty, .. }) = (item, symbol) {
                    *ty = self.check_global(decl);
                }
            }
        }
        for (unit, unit_symbols) in units.iter().zip(symbols.iter()) {
            for (item, symbol) in unit.items.iter().zip(&unit_symbols.items) {
                match (item, symbol) {
                    (Item::Class(decl), ItemSymbol::Class { ty, members }) => {
                        self.check_class(decl, ty, members);
                    }
                    (Item::Function(decl), ItemSymbol::Function(exec)) => {
                        self.check_function(decl, exec);
                    }
                    (Item::Main(body), ItemSymbol::Main) => {
                        self.with_body(Context::global(), |this| this.check_block_here(body));
                    }
                    _ => {}
                }
            }
        }
        tracing::debug!(errors = self.diagnostics.error_count(), "processed");
    }

    pub(crate) fn error(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(%code, %message, "diagnostic");
        self.diagnostics
            .push(Diagnostic::error(code).with_message(message).with_label(span, ""));
    }

    pub(crate) fn warn(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(%code, %message, "warning");
        self.diagnostics
            .push(Diagnostic::warning(code).with_message(message).with_label(span, ""));
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Run `f` as the body of an executable: a fresh frame stack over the
    /// globals and the given context, both restored afterwards.
    pub(crate) fn with_body<T>(&mut self, context: Context, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved_frames = self.frames.split_off(1);
        let saved_context = std::mem::replace(&mut self.context, context);
        self.frames.push(FxHashMap::default());

        let result = f(self);

        self.frames.truncate(1);
        self.frames.extend(saved_frames);
        self.context = saved_context;
        result
    }

    /// Run `f` inside a nested block frame.
    pub(crate) fn with_frame<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.frames.push(FxHashMap::default());
        let result = f(self);
        self.frames.pop();
        result
    }

    /// Declare a variable in the innermost frame.
    pub(crate) fn declare(&mut self, name: &str, ty: Type, span: Span) {
        let frame = self.frames.last_mut();
        let duplicate = match frame {
            Some(frame) => frame.insert(name.to_string(), ty).is_some(),
            None => false,
        };
        if duplicate {
            self.error(
                ErrorCode::E2004,
                span,
                format!("variable `{name}` is already declared in this scope"),
            );
        }
    }

    /// Bind a name in the innermost frame without a duplicate check.
    pub(crate) fn bind(&mut self, name: &str, ty: Type) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), ty);
        }
    }

    pub(crate) fn lookup_local(&self, name: &str) -> Option<Type> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name).cloned())
    }

    /// Resolve `ty` against the current class, if any.
    pub(crate) fn in_class_view(&self, ty: &Type) -> Type {
        match &self.context.class {
            Some(class) => self.table.resolve(ty, class),
            None => ty.clone(),
        }
    }

    /// Whether a private member of `owner` is reachable from here.
    pub(crate) fn can_see_private(&self, owner: Option<&Type>) -> bool {
        match (owner, &self.context.class) {
            (Some(owner), Some(class)) => owner == class,
            _ => false,
        }
    }
}
