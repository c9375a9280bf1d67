//! Plain-text strategy: a structured loader with a raw UTF-8 read fallback.

use std::path::Path;

use crate::backend::{LoaderError, Segment, SegmentLoader};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Structured plain-text loader.
///
/// Honors a leading byte-order mark (UTF-8, UTF-16 LE/BE) and otherwise decodes
/// strictly as UTF-8. Content carrying NUL characters is treated as binary and
/// rejected. Produces a single segment.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader;

impl TextLoader {
    pub fn new() -> Self {
        Self
    }

    /// Decode raw file bytes into text.
    pub fn decode(bytes: &[u8]) -> Result<String, LoaderError> {
        let text = if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
            std::str::from_utf8(rest)
                .map_err(|e| LoaderError::Decode(e.to_string()))?
                .to_string()
        } else if let Some(rest) = bytes.strip_prefix(UTF16_LE_BOM) {
            decode_utf16(rest, u16::from_le_bytes)?
        } else if let Some(rest) = bytes.strip_prefix(UTF16_BE_BOM) {
            decode_utf16(rest, u16::from_be_bytes)?
        } else {
            String::from_utf8(bytes.to_vec()).map_err(|e| LoaderError::Decode(e.to_string()))?
        };

        if let Some(pos) = text.find('\0') {
            return Err(LoaderError::Decode(format!(
                "binary content (NUL character at byte {pos})"
            )));
        }
        Ok(text)
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String, LoaderError> {
    if bytes.len() % 2 != 0 {
        return Err(LoaderError::Decode(
            "UTF-16 content has an odd number of bytes".into(),
        ));
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| LoaderError::Decode(e.to_string()))
}

impl SegmentLoader for TextLoader {
    fn name(&self) -> &'static str {
        "TextLoader"
    }

    fn load(&self, path: &Path) -> Result<Vec<Segment>, LoaderError> {
        let bytes = std::fs::read(path)?;
        Ok(vec![Segment::new(Self::decode(&bytes)?)])
    }
}

/// Read a file directly as UTF-8, with no further interpretation.
pub fn read_raw_utf8(path: &Path) -> Result<String, LoaderError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            Err(LoaderError::Decode("stream did not contain valid UTF-8".into()))
        }
        Err(e) => Err(LoaderError::Io(e)),
    }
}

/// How the plain-text strategy produced its text.
#[derive(Debug)]
pub enum TextOutcome {
    /// The structured loader succeeded.
    Structured(Vec<Segment>),
    /// The structured loader failed with `cause`; `text` came from the raw read.
    Fallback { text: String, cause: LoaderError },
}

/// Run `loader` on `path`; if it fails, fall back to a raw UTF-8 read.
///
/// The fallback is taken only when the structured attempt returns an error,
/// never because its output is empty. When both fail, the raw read's error is
/// returned and the structured error is folded into its message.
pub fn load_text(loader: &dyn SegmentLoader, path: &Path) -> Result<TextOutcome, LoaderError> {
    match loader.load(path) {
        Ok(segments) => Ok(TextOutcome::Structured(segments)),
        Err(cause) => match read_raw_utf8(path) {
            Ok(text) => Ok(TextOutcome::Fallback { text, cause }),
            Err(raw) => Err(LoaderError::Decode(format!(
                "{} failed ({cause}); direct read failed ({raw})",
                loader.name()
            ))),
        },
    }
}
