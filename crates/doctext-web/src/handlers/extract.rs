use axum::Json;
use axum::extract::{Multipart, State};
use std::sync::Arc;

use crate::handlers::{ApiError, extract_blocking};
use crate::models::ExtractResponse;
use crate::state::AppState;
use crate::upload;

pub async fn extract(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let file = upload::parse_multipart(multipart)
        .await
        .map_err(ApiError::BadRequest)?;
    tracing::debug!(filename = %file.filename, bytes = file.data.len(), "received upload");

    let result = extract_blocking(&state, file).await?;
    Ok(Json(ExtractResponse::from(result)))
}
