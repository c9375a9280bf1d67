//! Core of doctext: turn an uploaded PDF, DOCX or plain-text file into text.
//!
//! The [`Extractor`] picks a strategy from the upload's extension, stages the
//! bytes in a temp file, runs the matching [`SegmentLoader`], and joins the
//! returned segments with `\n`. Format-specific loaders live in their own
//! crates (`doctext-pdf-mupdf`, `doctext-docx`); the plain-text loader and its
//! raw-read fallback live here in [`text`].

pub mod backend;
pub mod config_file;
pub mod format;
pub mod orchestrator;
pub mod text;

pub use backend::{LoaderError, MissingBackend, Segment, SegmentLoader, join_segments};
pub use format::{ACCEPTED_EXTENSIONS, OUTPUT_MIME, Strategy, output_filename};
pub use orchestrator::{ExtractionError, ExtractionResult, Extractor, Notice, UploadedFile};
pub use text::{TextLoader, TextOutcome};
