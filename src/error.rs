//! API error types and their HTTP representations.
//!
//! Authorization failures map to 401 with a structured error body; anything
//! unexpected maps to a generic 500 whose details are logged server-side
//! only and never sent to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing or malformed authorization header")]
    MissingAuthHeader,

    #[error("token mismatch")]
    InvalidToken,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingAuthHeader => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authorization header",
            ),
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error while processing request");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Map a handler panic to the generic 500 response.
///
/// Installed via `CatchPanicLayer` so that no fault propagates uncaught to
/// the transport layer. The panic payload is logged through
/// `ApiError::Internal`; the client only sees the generic body.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(detail).into_response()
}
