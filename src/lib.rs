//! Tollgate - a minimal bearer-token authenticated request-processing API.
//!
//! Exposes two routes: `/api/process`, which validates a static bearer token
//! and returns a JSON summary of the received query parameters, and
//! `/api/health`, an unauthenticated liveness probe.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
