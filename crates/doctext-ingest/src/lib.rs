use std::path::PathBuf;

// Re-export domain types for convenience
pub use doctext_core::{
    ExtractionError, ExtractionResult, Extractor, Notice, Strategy, UploadedFile,
};

/// Build an [`Extractor`] with every compiled-in loader installed.
///
/// - `.pdf` → MuPDF (requires the `pdf` feature)
/// - `.docx` / `.doc` → OOXML reader (requires the `docx` feature)
/// - `.txt` → structured text loader with raw-read fallback (always available)
///
/// A format whose feature is disabled still dispatches, but every upload of
/// that format fails with a "support not compiled in" extraction error.
pub fn default_extractor(temp_dir: Option<PathBuf>) -> Extractor {
    let extractor = with_docx(with_pdf(Extractor::new()));
    match temp_dir {
        Some(dir) => {
            tracing::debug!(temp_dir = %dir.display(), "staging uploads in configured directory");
            extractor.with_temp_dir(dir)
        }
        None => extractor,
    }
}

/// Extract text from one upload with the default loaders and system temp dir.
pub fn extract(data: &[u8], filename: &str) -> Result<ExtractionResult, ExtractionError> {
    default_extractor(None).extract(data, filename)
}

#[cfg(feature = "pdf")]
fn with_pdf(extractor: Extractor) -> Extractor {
    extractor.with_pdf_loader(doctext_pdf_mupdf::MupdfLoader::new())
}

#[cfg(not(feature = "pdf"))]
fn with_pdf(extractor: Extractor) -> Extractor {
    extractor
}

#[cfg(feature = "docx")]
fn with_docx(extractor: Extractor) -> Extractor {
    extractor.with_docx_loader(doctext_docx::DocxLoader::new())
}

#[cfg(not(feature = "docx"))]
fn with_docx(extractor: Extractor) -> Extractor {
    extractor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_works_out_of_the_box() {
        let result = extract(b"hello\nworld", "notes.txt").unwrap();
        assert_eq!(result.text, "hello\nworld");
        assert_eq!(result.filename, "notes_TextLoader.txt");
    }

    #[test]
    fn configured_temp_dir_is_used_and_left_empty() {
        let dir = tempfile::tempdir().unwrap();
        let extractor = default_extractor(Some(dir.path().to_path_buf()));
        assert_eq!(extractor.temp_dir(), Some(dir.path()));

        extractor.extract(b"x", "x.txt").unwrap();
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[test]
    fn unsupported_format_is_rejected() {
        let err = extract(b"a,b", "data.csv").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat { .. }));
    }

    #[cfg(feature = "docx")]
    #[test]
    fn corrupt_docx_reaches_the_docx_loader() {
        let err = extract(b"definitely not a zip", "letter.docx").unwrap_err();
        match err {
            ExtractionError::ExtractionFailed { strategy, source } => {
                assert_eq!(strategy, Strategy::Docx);
                assert!(source.to_string().contains("not a DOCX"), "{source}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
