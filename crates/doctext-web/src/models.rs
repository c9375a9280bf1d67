use serde::Serialize;

use doctext_core::ExtractionResult;

/// JSON body returned by `POST /extract`.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub filename: String,
    pub mime: &'static str,
    pub strategy: &'static str,
    pub segments: usize,
    pub notices: Vec<String>,
}

impl From<ExtractionResult> for ExtractResponse {
    fn from(result: ExtractionResult) -> Self {
        Self {
            mime: result.mime(),
            strategy: result.strategy.as_str(),
            segments: result.segments,
            notices: result.notices.iter().map(ToString::to_string).collect(),
            text: result.text,
            filename: result.filename,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
