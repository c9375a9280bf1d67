use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("failed to open document: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("failed to decode text: {0}")]
    Decode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} support not compiled in")]
    NoBackend(&'static str),
}

/// One unit of extracted text.
///
/// PDF loaders emit one segment per page; DOCX and plain-text loaders emit a
/// single segment for the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub content: String,
    /// Zero-based page index, when the source format has pages.
    pub page: Option<usize>,
}

impl Segment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            page: None,
        }
    }

    pub fn page(content: impl Into<String>, page: usize) -> Self {
        Self {
            content: content.into(),
            page: Some(page),
        }
    }
}

/// Trait for format-specific text extraction backends.
///
/// Implementors read the file at `path` and return its text as an ordered
/// sequence of segments. Joining, output naming and temp-file handling live in
/// [`crate::Extractor`].
pub trait SegmentLoader: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Extract the text content of the file at `path`.
    fn load(&self, path: &Path) -> Result<Vec<Segment>, LoaderError>;
}

/// Placeholder for a backend that was compiled out.
///
/// Every call fails with [`LoaderError::NoBackend`], which surfaces to the
/// user as an ordinary extraction failure.
pub struct MissingBackend(pub &'static str);

impl SegmentLoader for MissingBackend {
    fn name(&self) -> &'static str {
        self.0
    }

    fn load(&self, _path: &Path) -> Result<Vec<Segment>, LoaderError> {
        Err(LoaderError::NoBackend(self.0))
    }
}

/// Join segment contents with `\n`, preserving order.
pub fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
