// src/documents/models.rs
use std::path::{Path, PathBuf};

/// Document formats the loader can read as text without a decoding library.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// One resume, already decoded to plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new<P: Into<PathBuf>>(source: P, text: String) -> Self {
        Self { source: source.into(), text }
    }

    /// File name of the source, used to label records and debug output.
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Whether `path` has one of the supported text extensions (case-insensitive).
pub fn is_text_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| TEXT_EXTENSIONS.iter().any(|t| ext.eq_ignore_ascii_case(t)))
        .unwrap_or(false)
}
