//! Errors a [`Session`](crate::Session) hands back to its host.

use std::fmt;

use tarn_diagnostic::emitter::render;
use tarn_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};

use crate::SourceFile;

/// Diagnostics that point into one source, or into no single source when
/// `source` is `None`.
#[derive(Clone, Debug)]
pub struct DiagnosticGroup {
    pub name: String,
    pub source: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticGroup {
    pub(crate) fn file(file: &SourceFile, bag: DiagnosticBag) -> Self {
        DiagnosticGroup {
            name: file.name().to_string(),
            source: Some(file.text().to_string()),
            diagnostics: bag.into_vec(),
        }
    }

    pub(crate) fn detached(name: &str, bag: DiagnosticBag) -> Self {
        DiagnosticGroup {
            name: name.to_string(),
            source: None,
            diagnostics: bag.into_vec(),
        }
    }

    /// Rendered for a terminal, without colors.
    pub fn render(&self) -> String {
        match &self.source {
            Some(source) => render(&self.diagnostics, &self.name, source),
            None => {
                // Spans would index into an unknown file.
                let detached: Vec<Diagnostic> = self
                    .diagnostics
                    .iter()
                    .cloned()
                    .map(|diagnostic| {
                        diagnostic
                            .without_spans()
                            .with_note(format!("in {}", self.name))
                    })
                    .collect();
                render(&detached, &self.name, "")
            }
        }
    }
}

/// A compile that produced errors. Nothing was generated.
#[derive(Clone, Debug, Default)]
pub struct CompileError {
    pub groups: Vec<DiagnosticGroup>,
}

impl CompileError {
    pub(crate) fn push_file(&mut self, file: &SourceFile, bag: DiagnosticBag) {
        if !bag.is_empty() {
            self.groups.push(DiagnosticGroup::file(file, bag));
        }
    }

    pub(crate) fn push_detached(&mut self, name: &str, bag: DiagnosticBag) {
        if !bag.is_empty() {
            self.groups.push(DiagnosticGroup::detached(name, bag));
        }
    }

    /// Whether a file failed to lex or parse, so nothing was checked.
    pub fn is_syntax_error(&self) -> bool {
        self.diagnostics()
            .any(|d| d.is_error() && (d.code.is_lexer_error() || d.code.is_parser_error()))
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics().any(Diagnostic::is_error)
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.groups.iter().flat_map(|group| group.diagnostics.iter())
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.diagnostics().map(|d| d.code).collect()
    }

    /// Every group rendered for a terminal, without colors.
    pub fn render(&self) -> String {
        self.groups.iter().map(DiagnosticGroup::render).collect()
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.diagnostics().filter(|d| d.is_error()).count();
        let s = if errors == 1 { "" } else { "s" };
        let stage = if self.is_syntax_error() { "parsing" } else { "compilation" };
        write!(f, "{stage} failed with {errors} error{s}")
    }
}

impl std::error::Error for CompileError {}
