//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that always returns 200 when the process is
//! running. It must not depend on any component that can fail: no auth, no
//! I/O beyond reading the static configuration.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::UPTIME_MESSAGE;
use crate::routes::iso_timestamp;
use crate::state::AppState;

/// Response body for the health check.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub uptime: &'static str,
    pub environment: String,
}

/// Health check handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: iso_timestamp(),
        uptime: UPTIME_MESSAGE,
        environment: state.config.environment.clone(),
    })
}
