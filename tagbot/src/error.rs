//! Error types for tagbot
//!
//! `EditError` is the edit-workflow taxonomy: every variant is caught at a
//! transition boundary and rendered as a user-facing reply, never surfaced
//! as a process fault. `ApiError` covers the HTTP layer itself (malformed
//! event payloads).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Edit workflow errors
#[derive(Debug, Error)]
pub enum EditError {
    /// Remote file retrieval failed; the user must resend, no automatic retry
    #[error("Failed to retrieve the file: {0}")]
    Fetch(String),

    /// File unparsable as tagged audio; no session is created
    #[error("Could not read the tags of this file: {0}")]
    Decode(String),

    /// Cover image is not PNG or JPEG; session preserved, retry allowed
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// Source file vanished from the workspace before commit
    #[error("The audio file is no longer available")]
    MissingFile,

    /// Codec failed to persist tags or merge the cover; commit retryable
    #[error("Failed to write tags: {0}")]
    Write(String),

    /// Upload exceeds the configured size limit
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// API error type for the event gateway
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
