use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::handlers::{ApiError, extract_blocking};
use crate::state::AppState;
use crate::upload;

/// Extract an upload and return the text as a `text/plain` attachment.
pub async fn download(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let file = upload::parse_multipart(multipart)
        .await
        .map_err(ApiError::BadRequest)?;
    let result = extract_blocking(&state, file).await?;

    let content_type = format!("{}; charset=utf-8", result.mime());
    let disposition = content_disposition(&result.filename);
    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        result.text,
    ))
}

/// `attachment` disposition with an ASCII fallback name and an RFC 5987
/// `filename*` carrying the exact UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(filename)
    )
}
