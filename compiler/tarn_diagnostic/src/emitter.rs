//! Terminal rendering of diagnostics.
//!
//! Output follows the familiar `error[CODE]: message` header, a `-->`
//! location line with 1-based line and column, the offending source line and
//! a caret underline for the primary label.

use std::io::{self, Write};

use tarn_ir::Span;

use crate::{Diagnostic, Severity};

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Rendering knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Stop after this many errors; 0 means unlimited.
    pub error_limit: usize,
    pub colors: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            colors: false,
        }
    }
}

impl DiagnosticConfig {
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            ..Self::default()
        }
    }
}

/// Byte offset of every line start, for line/column lookup.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line and column (in chars) of `offset`.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line_index = match self.offsets.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.offsets.get(line_index).copied().unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        let line = u32::try_from(line_index + 1).unwrap_or(u32::MAX);
        (line, u32::try_from(col + 1).unwrap_or(u32::MAX))
    }

    /// Text of the 1-based `line`, without its newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> &'s str {
        let index = line.saturating_sub(1) as usize;
        let Some(&start) = self.offsets.get(index) else {
            return "";
        };
        let end = self
            .offsets
            .get(index + 1)
            .map_or(source.len(), |next| (*next as usize).saturating_sub(1));
        source
            .get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches('\r')
    }
}

/// Writes diagnostics for a single source unit.
pub struct TerminalEmitter<'s, W: Write> {
    writer: W,
    file_name: &'s str,
    source: &'s str,
    lines: LineOffsetTable,
    config: DiagnosticConfig,
}

impl<'s, W: Write> TerminalEmitter<'s, W> {
    pub fn new(writer: W, file_name: &'s str, source: &'s str, config: DiagnosticConfig) -> Self {
        TerminalEmitter {
            writer,
            file_name,
            source,
            lines: LineOffsetTable::build(source),
            config,
        }
    }

    fn paint(&self, color: &'static str) -> &'static str {
        if self.config.colors {
            color
        } else {
            ""
        }
    }

    pub fn emit(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let color = match diagnostic.severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
        };
        let (color, bold, reset) = (
            self.paint(color),
            self.paint(colors::BOLD),
            self.paint(colors::RESET),
        );
        writeln!(
            self.writer,
            "{color}{}[{}]{reset}{bold}: {}{reset}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        )?;

        if let Some(span) = diagnostic.primary_span().filter(|s| !s.is_dummy()) {
            self.emit_snippet(diagnostic, span, color, reset)?;
        }

        for label in diagnostic.context.iter().filter(|l| !l.span.is_dummy()) {
            let (line, col) = self.lines.line_col(self.source, label.span.start);
            writeln!(self.writer, "  = {}: {line}:{col}", label.message)?;
        }
        for note in &diagnostic.notes {
            writeln!(self.writer, "  = note: {note}")?;
        }
        Ok(())
    }

    fn emit_snippet(
        &mut self,
        diagnostic: &Diagnostic,
        span: Span,
        color: &str,
        reset: &str,
    ) -> io::Result<()> {
        let (line, col) = self.lines.line_col(self.source, span.start);
        let gutter = line.to_string().len();
        let pad = " ".repeat(gutter);
        writeln!(self.writer, "{pad}--> {}:{line}:{col}", self.file_name)?;
        writeln!(self.writer, "{pad} |")?;
        let text = self.lines.line_text(self.source, line);
        writeln!(self.writer, "{line} | {text}")?;

        let width = span
            .len()
            .min(u32::try_from(text.chars().count()).unwrap_or(u32::MAX))
            .max(1) as usize;
        let indent = " ".repeat(col.saturating_sub(1) as usize);
        let carets = "^".repeat(width);
        let message = diagnostic
            .primary
            .as_ref()
            .map_or("", |label| label.message.as_str());
        writeln!(
            self.writer,
            "{pad} | {indent}{color}{carets} {message}{reset}"
        )?;
        Ok(())
    }

    /// Emit every diagnostic up to the configured error limit, then a summary.
    pub fn emit_all<'d>(
        &mut self,
        diagnostics: impl IntoIterator<Item = &'d Diagnostic>,
    ) -> io::Result<()> {
        let mut errors = 0usize;
        for diagnostic in diagnostics {
            if diagnostic.is_error() {
                if self.config.error_limit != 0 && errors >= self.config.error_limit {
                    continue;
                }
                errors += 1;
            }
            self.emit(diagnostic)?;
        }
        if errors > 0 {
            let s = if errors == 1 { "" } else { "s" };
            writeln!(self.writer, "aborting due to {errors} error{s}")?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Render diagnostics into a string without colors.
pub fn render(diagnostics: &[Diagnostic], file_name: &str, source: &str) -> String {
    let mut emitter = TerminalEmitter::new(
        Vec::new(),
        file_name,
        source,
        DiagnosticConfig::unlimited(),
    );
    // Writing into a Vec cannot fail.
    let _ = emitter.emit_all(diagnostics);
    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}

#[cfg(test)]
mod tests;
