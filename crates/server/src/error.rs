//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.
//!
//! Failure bodies are always `{"error": "<message>"}`. Validation and
//! not-found messages go to the client verbatim; store and internal causes
//! are logged and replaced with a generic message.
//!
//! Single-contact delivery failures never become an `AppError` - the alert
//! handler aggregates them into its 200 response body instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::StoreError;

/// Application-level error type for the alert service.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is missing, empty, or malformed.
    #[error("{0}")]
    Validation(String),

    /// Resource not found (no contacts to alert).
    #[error("{0}")]
    NotFound(String),

    /// Contact store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side errors to Sentry; client errors are expected
        // traffic and only get a debug line.
        match &self {
            Self::Store(_) | Self::Internal(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
            }
            Self::Validation(_) | Self::NotFound(_) => {
                tracing::debug!(error = %self, "Request rejected");
            }
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose store or internal details to clients
        let message = match &self {
            Self::Store(_) => "Contact store error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_returns_400_with_message() {
        let (status, body) = parts(AppError::Validation("user_id is required".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "user_id is required"}));
    }

    #[tokio::test]
    async fn not_found_returns_404_with_message() {
        let (status, body) = parts(AppError::NotFound("No contacts found.".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "No contacts found."}));
    }

    #[tokio::test]
    async fn store_error_returns_502_with_generic_body() {
        let err = AppError::Store(StoreError::Api {
            status: 500,
            message: "internal store detail".to_string(),
        });
        let (status, body) = parts(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"error": "Contact store error"}));
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let (status, body) = parts(AppError::Internal("secret detail".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}
