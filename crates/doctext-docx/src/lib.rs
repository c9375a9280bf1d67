use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use thiserror::Error;

use doctext_core::{LoaderError, Segment, SegmentLoader};

pub mod xml_parser;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("not a DOCX (OOXML) package: {0}")]
    NotAPackage(#[from] zip::result::ZipError),
    #[error("package has no {0} part")]
    MissingPart(&'static str),
    #[error("malformed XML: {0}")]
    Xml(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DocxError> for LoaderError {
    fn from(err: DocxError) -> Self {
        match err {
            DocxError::Io(e) => LoaderError::Io(e),
            DocxError::NotAPackage(_) => LoaderError::Open(err.to_string()),
            other => LoaderError::Extraction(other.to_string()),
        }
    }
}

/// Extract the text of a DOCX package.
///
/// Header parts come first, then the main document, then footer parts, each
/// in archive order. Surrounding whitespace of the combined text is trimmed.
pub fn extract_text<R: Read + Seek>(reader: R) -> Result<String, DocxError> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();

    if !names.iter().any(|n| n == DOCUMENT_PART) {
        return Err(DocxError::MissingPart(DOCUMENT_PART));
    }

    let parts = names
        .iter()
        .filter(|n| is_part(n, "header"))
        .chain(names.iter().filter(|n| n.as_str() == DOCUMENT_PART))
        .chain(names.iter().filter(|n| is_part(n, "footer")));

    let mut text = String::new();
    for name in parts {
        let mut xml = String::new();
        archive.by_name(name)?.read_to_string(&mut xml)?;
        text.push_str(&xml_parser::part_to_text(&xml)?);
    }

    Ok(text.trim().to_string())
}

/// `word/header1.xml`, `word/footer2.xml`, ...
fn is_part(name: &str, kind: &str) -> bool {
    name.strip_prefix("word/")
        .and_then(|rest| rest.strip_prefix(kind))
        .and_then(|rest| rest.strip_suffix(".xml"))
        .is_some_and(|digits| digits.chars().all(|c| c.is_ascii_digit()))
}

/// DOCX implementation of [`SegmentLoader`]. Produces a single segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxLoader;

impl DocxLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SegmentLoader for DocxLoader {
    fn name(&self) -> &'static str {
        "Docx2txtLoader"
    }

    fn load(&self, path: &Path) -> Result<Vec<Segment>, LoaderError> {
        let file = File::open(path)?;
        let text = extract_text(file)?;
        tracing::debug!(path = %path.display(), chars = text.len(), "read DOCX package");
        Ok(vec![Segment::new(text)])
    }
}
