use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::DocumentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Per-section extraction failures are NOT represented here: they degrade the
/// grouped response in place (see `extraction::GroupOutcome`) instead of
/// failing the request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid upload: {0}")]
    Upload(String),

    #[error(transparent)]
    Extraction(#[from] DocumentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnsupportedFormat(_) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FORMAT",
                "Only PDF and DOCX files are supported.".to_string(),
            ),
            AppError::Upload(msg) => (StatusCode::BAD_REQUEST, "INVALID_UPLOAD", msg.clone()),
            AppError::Extraction(e) => {
                tracing::error!("Text extraction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
