//! Stem download handler.

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handle `GET /api/download/:file_name`.
///
/// Only well-formed stem names resolve; everything else is rejected before
/// touching the filesystem.
pub async fn download_stem(
    State(state): State<AppState>,
    UrlPath(file_name): UrlPath<String>,
) -> ApiResult<Response> {
    let (_, path) = state.output.resolve(&file_name)?;

    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::not_found("file not found")
        } else {
            ApiError::Media(vsep_media::MediaError::Io(e))
        }
    })?;

    debug!(file = %file_name, bytes = bytes.len(), "Serving stem download");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/wav")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        )
        .body(bytes.into())
        .map_err(|e| ApiError::internal(format!("failed to build response: {e}")))
}
