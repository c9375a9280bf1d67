use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use doctext_core::{ExtractionError, ExtractionResult, UploadedFile};

use crate::models::ErrorResponse;
use crate::state::AppState;

pub mod download;
pub mod extract;
pub mod index;

/// Error returned by the upload handlers, rendered as `{ "error": message }`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Extraction(ExtractionError),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(e) => match e {
                ExtractionError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ExtractionError::EmptyUpload => StatusCode::BAD_REQUEST,
                ExtractionError::ExtractionFailed { .. } | ExtractionError::NoText { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ExtractionError::TempFile(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::BadRequest(msg) | ApiError::Internal(msg) => msg,
            ApiError::Extraction(e) => e.to_string(),
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Run the extractor on the blocking pool; loaders do synchronous file I/O.
pub async fn extract_blocking(
    state: &AppState,
    upload: UploadedFile,
) -> Result<ExtractionResult, ApiError> {
    let extractor = state.extractor.clone();
    tokio::task::spawn_blocking(move || extractor.extract_file(&upload))
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?
        .map_err(ApiError::Extraction)
}
