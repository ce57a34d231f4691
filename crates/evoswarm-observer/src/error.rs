//! Error types for the Observer API server.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use evoswarm_core::report::ReportError;

/// Errors that can occur in the Observer API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request conflicts with the current state (e.g. a run in flight).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The engine is shutting down and no longer accepts the request.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The investor report could not be rendered.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// A UUID could not be parsed from the request path.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            Self::Serialization(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("JSON error: {e}"))
            }
            Self::Report(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            Self::InvalidUuid(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "observer request failed");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
