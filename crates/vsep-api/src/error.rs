//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Media error: {0}")]
    Media(#[from] vsep_media::MediaError),

    #[error("Separation error: {0}")]
    Separation(#[from] vsep_separator::SeparatorError),

    #[error("Analysis error: {0}")]
    Dsp(#[from] vsep_dsp::DspError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Unusable uploads are the client's problem, not ours
            ApiError::Media(vsep_media::MediaError::NoAudioData)
            | ApiError::Media(vsep_media::MediaError::FfmpegFailed { .. }) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Separation(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) | ApiError::Media(_) | ApiError::Dsp(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = if status.is_server_error()
            && std::env::var("ENVIRONMENT").unwrap_or_default() == "production"
        {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Media(vsep_media::MediaError::NoAudioData).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Separation(vsep_separator::SeparatorError::RequestFailed(
                "down".to_string()
            ))
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
