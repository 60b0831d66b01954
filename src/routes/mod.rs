//! HTTP route handlers for the API.
//!
//! Two routes: `/api/process` (bearer-token gated) and `/api/health`
//! (unauthenticated liveness probe). The processing route is wrapped in the
//! authorization and request-logging layers; the health route deliberately
//! bypasses both so liveness never depends on anything that can fail.
//!
//! A panic-catching layer sits over the whole router so no fault reaches
//! the transport layer uncaught.

pub mod health;
pub mod process;

use axum::{middleware, routing::get, Router};
use chrono::{SecondsFormat, Utc};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::handle_panic;
use crate::middleware::{auth_layer, request_log_layer};
use crate::state::AppState;

/// Current wall-clock time as an ISO-8601 string.
///
/// Fixed-width microsecond precision so sequential timestamps compare
/// lexicographically.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Creates the axum router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Processing route - gated by the bearer token, with request logging
    // as the outermost of the two layers so rejections are logged too.
    let process_routes = Router::new()
        .route("/api/process", get(process::process))
        .layer(middleware::from_fn_with_state(state.clone(), auth_layer))
        .layer(middleware::from_fn(request_log_layer));

    // Health check - no auth, no request logging, always fresh
    let health_routes = Router::new().route("/api/health", get(health::health));

    Router::new()
        .merge(process_routes)
        .merge(health_routes)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
