//! Error types for the HTTP API.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hydrosense_core::AllocationError;
use thiserror::Error;

/// Errors returned by API handlers.
///
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request has no `file` part.
    #[error("No file part")]
    MissingFile,

    /// The `file` part has an empty filename.
    #[error("No selected file")]
    EmptyFilename,

    /// The multipart body could not be read.
    #[error("Invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    /// The pipeline hit a broken invariant.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] AllocationError),

    /// Temporary upload storage failed.
    #[error("Temporary storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking allocation task panicked or was cancelled.
    #[error("Allocation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::EmptyFilename => StatusCode::BAD_REQUEST,
            ApiError::Multipart(e) => e.status(),
            ApiError::Allocation(_) | ApiError::Io(_) | ApiError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
