//! Request pipeline errors and their HTTP representation.
//!
//! Every variant is terminal for the request; nothing is retried. The wire
//! shape is `{error, message, details?}` with status 400 for a rejected
//! upload and 500 for everything else.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can terminate a transcription request.
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// The request was rejected before any provider call was made.
    #[error("{0}")]
    Validation(String),

    /// Local I/O failed while handling the uploaded file.
    #[error("Failed to handle upload: {0}")]
    Upload(#[from] std::io::Error),

    /// The provider was unreachable or returned a non-2xx response.
    /// `details` carries the provider's error body when one was returned.
    #[error("{message}")]
    Provider {
        message: String,
        details: Option<Value>,
    },

    /// The provider response did not have the expected shape.
    #[error("{0}")]
    Extraction(String),
}

impl TranscribeError {
    fn status(&self) -> StatusCode {
        match self {
            TranscribeError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TranscribeError {
    fn into_response(self) -> Response {
        tracing::error!("Transcription error: {self}");

        let body = match &self {
            TranscribeError::Validation(message) => json!({ "error": message }),
            TranscribeError::Provider { message, details } => json!({
                "error": "Transcription failed",
                "message": message,
                "details": details,
            }),
            other => json!({
                "error": "Transcription failed",
                "message": other.to_string(),
                "details": Value::Null,
            }),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = TranscribeError::Validation("No file uploaded".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn other_errors_map_to_internal_error() {
        let err = TranscribeError::Extraction("Unable to extract transcript".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = TranscribeError::Provider {
            message: "rate limited".to_string(),
            details: None,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
