use std::path::Path;

use mupdf::{Document, TextPageFlags};

use doctext_core::{LoaderError, Segment, SegmentLoader};

/// MuPDF-based implementation of [`SegmentLoader`] for PDF files.
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the DOCX and plain-text paths do not
/// transitively depend on it.
///
/// Produces one segment per page, in page order. Page text is rebuilt from
/// MuPDF's block/line structure with one `\n` after every line.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfLoader;

impl MupdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SegmentLoader for MupdfLoader {
    fn name(&self) -> &'static str {
        "PyMuPDFLoader"
    }

    fn load(&self, path: &Path) -> Result<Vec<Segment>, LoaderError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| LoaderError::Open("invalid path encoding".into()))?;

        let document = Document::open(path_str).map_err(|e| LoaderError::Open(e.to_string()))?;

        let mut segments = Vec::new();

        for (index, page_result) in document
            .pages()
            .map_err(|e| LoaderError::Extraction(e.to_string()))?
            .enumerate()
        {
            let page = page_result.map_err(|e| LoaderError::Extraction(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| LoaderError::Extraction(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            segments.push(Segment::page(page_text, index));
        }

        tracing::debug!(path = %path.display(), pages = segments.len(), "read PDF pages");
        Ok(segments)
    }
}
