//! Request logging and authorization middleware.
//!
//! `request_log_layer` generates a UUID v4 for each incoming request and
//! creates a tracing span that wraps the entire request lifecycle. All logs
//! emitted during request processing carry the request_id field for
//! correlation. `auth_layer` gates the processing route behind the
//! configured bearer token; the health route bypasses both layers.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::BEARER_PREFIX;
use crate::error::ApiError;
use crate::state::AppState;

/// Extension type for accessing the request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Middleware that logs each request before and after processing.
///
/// Before the handler runs it logs the method, path, and header names;
/// after, the resulting status code and duration. Header values carry the
/// bearer token, so they only appear at debug level. Pure side channel: it
/// never alters the response.
///
/// This should be the outermost layer on the routes it covers so the span
/// wraps all request processing, including the authorization check.
pub async fn request_log_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let path = uri.path();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    let mut request = request;
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        tracing::info!(headers = ?header_names(request.headers()), "Request received");
        tracing::debug!(headers = ?request.headers(), "Request headers");

        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

/// Names of the request headers, values elided.
fn header_names(headers: &HeaderMap) -> Vec<&str> {
    headers.keys().map(|name| name.as_str()).collect()
}

/// Middleware that enforces bearer-token authorization.
///
/// The Authorization header must be present, start with the literal
/// `"Bearer "` prefix, and carry exactly the configured token. Failures
/// short-circuit with a 401 and an audit log line recording the remote
/// address; the handler never runs.
pub async fn auth_layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match header.and_then(|h| h.strip_prefix(BEARER_PREFIX)) {
        Some(token) => token,
        None => {
            audit_rejection(&request, "missing or malformed authorization header");
            return ApiError::MissingAuthHeader.into_response();
        }
    };

    if token != state.config.api_token {
        audit_rejection(&request, "token mismatch");
        return ApiError::InvalidToken.into_response();
    }

    next.run(request).await
}

/// Log a rejected request with its remote address.
///
/// The address comes from `ConnectInfo` and is only available when the
/// server is built with connect-info; in-process test requests log "unknown".
fn audit_rejection(request: &Request, reason: &str) {
    let remote = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    tracing::warn!(remote_addr = %remote, reason, "Rejected unauthorized request");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    use crate::config::AppConfig;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    fn test_router(token: &str) -> Router {
        let state = AppState::new(AppConfig {
            api_token: token.to_string(),
            port: 0,
            debug: false,
            environment: "test".to_string(),
            log_format: crate::config::LogFormat::Text,
        });
        Router::new()
            .route("/guarded", get(ok_handler))
            .layer(middleware::from_fn_with_state(state, auth_layer))
            .layer(middleware::from_fn(request_log_layer))
    }

    fn request(auth: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/guarded");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn header_names_elide_values() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer sekret".parse().unwrap());
        headers.insert("accept", "application/json".parse().unwrap());

        let names = header_names(&headers);
        assert!(names.contains(&"authorization"));
        assert!(names.contains(&"accept"));
        assert!(!format!("{names:?}").contains("sekret"));
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let response = test_router("sekret")
            .oneshot(request(None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let response = test_router("sekret")
            .oneshot(request(Some("Basic abc")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_token_is_rejected() {
        let response = test_router("sekret")
            .oneshot(request(Some("Bearer wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn lowercase_bearer_prefix_is_rejected() {
        let response = test_router("sekret")
            .oneshot(request(Some("bearer sekret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn correct_token_passes_through() {
        let response = test_router("sekret")
            .oneshot(request(Some("Bearer sekret")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
