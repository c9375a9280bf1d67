use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::{LoaderError, MissingBackend, SegmentLoader, join_segments};
use crate::format::{OUTPUT_MIME, Strategy, extension_of, output_filename};
use crate::text::{TextLoader, TextOutcome, load_text};

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("unsupported file format: {}", display_extension(.extension))]
    UnsupportedFormat { extension: Option<String> },
    #[error("uploaded file is empty")]
    EmptyUpload,
    #[error("failed to stage upload in a temporary file: {0}")]
    TempFile(#[source] std::io::Error),
    #[error("error processing file: {source}")]
    ExtractionFailed {
        strategy: Strategy,
        #[source]
        source: LoaderError,
    },
    #[error("no text could be extracted from the {strategy} file")]
    NoText { strategy: Strategy },
}

fn display_extension(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!(".{ext}"),
        None => "no extension".to_string(),
    }
}

/// Non-fatal condition reported alongside a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The structured text loader failed and the raw UTF-8 read was used instead.
    TextLoaderFallback { reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::TextLoaderFallback { reason } => write!(
                f,
                "TextLoader encountered an issue: {reason}. Using direct file read."
            ),
        }
    }
}

/// An uploaded file: raw bytes plus the filename the client supplied.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Text extracted from one upload, plus the name to offer it under.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub text: String,
    pub filename: String,
    pub strategy: Strategy,
    /// Number of segments joined to form `text`.
    pub segments: usize,
    pub notices: Vec<Notice>,
}

impl ExtractionResult {
    pub fn mime(&self) -> &'static str {
        OUTPUT_MIME
    }
}

/// Dispatches uploads to format-specific loaders.
///
/// Holds one loader per strategy. The extractor itself is immutable, so one
/// instance can serve concurrent callers; each call owns its own temp file.
pub struct Extractor {
    pdf: Box<dyn SegmentLoader>,
    docx: Box<dyn SegmentLoader>,
    text: Box<dyn SegmentLoader>,
    temp_dir: Option<PathBuf>,
}

impl Default for Extractor {
    /// Plain text only; PDF and DOCX report a missing backend until set.
    fn default() -> Self {
        Self {
            pdf: Box::new(MissingBackend("PDF")),
            docx: Box::new(MissingBackend("DOCX")),
            text: Box::new(TextLoader),
            temp_dir: None,
        }
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pdf_loader(mut self, loader: impl SegmentLoader + 'static) -> Self {
        self.pdf = Box::new(loader);
        self
    }

    pub fn with_docx_loader(mut self, loader: impl SegmentLoader + 'static) -> Self {
        self.docx = Box::new(loader);
        self
    }

    pub fn with_text_loader(mut self, loader: impl SegmentLoader + 'static) -> Self {
        self.text = Box::new(loader);
        self
    }

    /// Stage uploads in `dir` instead of the system temp directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }

    pub fn extract_file(&self, upload: &UploadedFile) -> Result<ExtractionResult, ExtractionError> {
        self.extract(&upload.data, &upload.filename)
    }

    /// Extract text from `data`, choosing the strategy from `filename`'s extension.
    ///
    /// Unsupported extensions and empty payloads fail before anything touches
    /// the filesystem. Otherwise the bytes are staged in a temp file which is
    /// removed before this returns, whatever the outcome.
    pub fn extract(&self, data: &[u8], filename: &str) -> Result<ExtractionResult, ExtractionError> {
        let strategy = Strategy::from_filename(filename).ok_or_else(|| {
            ExtractionError::UnsupportedFormat {
                extension: extension_of(filename),
            }
        })?;
        if data.is_empty() {
            return Err(ExtractionError::EmptyUpload);
        }

        let temp = self.stage(data, filename).map_err(ExtractionError::TempFile)?;
        tracing::debug!(
            filename,
            strategy = %strategy,
            temp = %temp.path().display(),
            bytes = data.len(),
            "staged upload"
        );

        let outcome = self.run(strategy, temp.path());

        let temp_path = temp.path().to_path_buf();
        if let Err(e) = temp.close() {
            tracing::warn!(path = %temp_path.display(), error = %e, "failed to remove temp file");
        }

        let (text, segments, notices) = outcome.map_err(|source| {
            tracing::warn!(filename, strategy = %strategy, error = %source, "extraction failed");
            ExtractionError::ExtractionFailed { strategy, source }
        })?;

        if text.is_empty() {
            return Err(ExtractionError::NoText { strategy });
        }

        let result = ExtractionResult {
            filename: output_filename(filename, strategy),
            text,
            strategy,
            segments,
            notices,
        };
        tracing::info!(
            filename,
            strategy = %strategy,
            segments = result.segments,
            chars = result.text.chars().count(),
            output = %result.filename,
            "extracted text"
        );
        Ok(result)
    }

    fn stage(&self, data: &[u8], filename: &str) -> std::io::Result<tempfile::NamedTempFile> {
        // Keep the original extension so loaders that sniff it see the right type.
        let suffix = extension_of(filename)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let mut builder = tempfile::Builder::new();
        builder.prefix("doctext-").suffix(&suffix);

        let mut temp = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        temp.write_all(data)?;
        temp.flush()?;
        Ok(temp)
    }

    fn run(
        &self,
        strategy: Strategy,
        path: &Path,
    ) -> Result<(String, usize, Vec<Notice>), LoaderError> {
        let loader = match strategy {
            Strategy::Pdf => self.pdf.as_ref(),
            Strategy::Docx => self.docx.as_ref(),
            Strategy::Text => {
                return match load_text(self.text.as_ref(), path)? {
                    TextOutcome::Structured(segments) => {
                        Ok((join_segments(&segments), segments.len(), Vec::new()))
                    }
                    TextOutcome::Fallback { text, cause } => {
                        tracing::warn!(
                            loader = self.text.name(),
                            error = %cause,
                            "structured text loader failed, using direct read"
                        );
                        let notice = Notice::TextLoaderFallback {
                            reason: cause.to_string(),
                        };
                        Ok((text, 1, vec![notice]))
                    }
                };
            }
        };

        let segments = loader.load(path)?;
        tracing::debug!(loader = loader.name(), segments = segments.len(), "loader finished");
        Ok((join_segments(&segments), segments.len(), Vec::new()))
    }
}
