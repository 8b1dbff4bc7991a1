//! Source text and the name diagnostics report it under.

use std::io;
use std::path::Path;

/// File extension of Tarn source files.
pub const SOURCE_EXTENSION: &str = "tarn";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(SourceFile::new(path.display().to_string(), text))
    }

    /// Every `.tarn` file directly inside `dir`, sorted by path so that
    /// loading order does not depend on the file system.
    pub fn read_dir(dir: &Path) -> io::Result<Vec<Self>> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_source = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION));
            if is_source && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        paths.iter().map(|path| SourceFile::read(path)).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Unit name: the file stem, or the whole name if it has none.
    pub fn unit_name(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&self.name)
    }
}
