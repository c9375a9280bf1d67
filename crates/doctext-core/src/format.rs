use std::fmt;
use std::path::Path;

/// MIME type of every downloadable extraction result.
pub const OUTPUT_MIME: &str = "text/plain";

/// Extraction procedure selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Pdf,
    Docx,
    Text,
}

/// Accepted extensions (lowercase, without the dot) and the strategy each maps to.
pub const ACCEPTED_EXTENSIONS: &[(&str, Strategy)] = &[
    ("pdf", Strategy::Pdf),
    ("docx", Strategy::Docx),
    ("doc", Strategy::Docx),
    ("txt", Strategy::Text),
];

impl Strategy {
    /// Select the strategy for a filename's extension (case-insensitive).
    ///
    /// Returns `None` for unrecognized or missing extensions.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = extension_of(filename)?;
        ACCEPTED_EXTENSIONS
            .iter()
            .find(|(accepted, _)| *accepted == ext)
            .map(|(_, strategy)| *strategy)
    }

    /// Filename tag appended to the stem of the output file.
    pub fn suffix(self) -> &'static str {
        match self {
            Strategy::Pdf => "_PyMuPDFLoader.txt",
            Strategy::Docx => "_Docx2txtLoader.txt",
            Strategy::Text => "_TextLoader.txt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Pdf => "pdf",
            Strategy::Docx => "docx",
            Strategy::Text => "text",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased extension of `filename`, without the dot.
///
/// Dotfiles such as `.pdf` have no extension, matching `Path::extension`.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Suggested name for the extracted text: the upload's stem plus the strategy suffix.
///
/// Any directory components a client sent along with the filename are dropped.
pub fn output_filename(filename: &str, strategy: Strategy) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let stem = Path::new(base)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(base);
    format!("{}{}", stem, strategy.suffix())
}
