//! Request processing endpoint.
//!
//! Extracts the recognized query parameters and assembles the JSON response
//! summary. Authorization has already happened in the middleware layer by
//! the time this handler runs.

use std::collections::HashSet;

use axum::{extract::Query, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::{RECOGNIZED_PARAMS, SUCCESS_MESSAGE, UNKNOWN_PARAM};
use crate::error::ApiError;
use crate::routes::iso_timestamp;

/// Response body for a successfully processed request.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub received_params_count: usize,
    pub processed_data: String,
    pub timestamp: String,
}

/// Processing handler.
///
/// The query string is parsed as an ordered list of key/value pairs.
/// `received_params_count` reflects every distinct supplied parameter name,
/// recognized or not; a name repeated in the query counts once, and its
/// first occurrence wins for extraction. `processed_data` only ever reflects
/// `param1`; requests without it get the "unknown" placeholder.
#[instrument(name = "process::process", skip_all)]
pub async fn process(
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let recognized = recognized_values(&params);
    tracing::debug!(params = ?recognized, "Extracted recognized parameters");

    let subject = first_value(&params, RECOGNIZED_PARAMS[0]).unwrap_or(UNKNOWN_PARAM);

    Ok(Json(ProcessResponse {
        status: "success",
        message: SUCCESS_MESSAGE,
        received_params_count: distinct_param_count(&params),
        processed_data: format!("Processed data for {subject}"),
        timestamp: iso_timestamp(),
    }))
}

/// Number of distinct parameter names supplied, duplicates collapsed.
fn distinct_param_count(params: &[(String, String)]) -> usize {
    params
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// First value supplied for the given parameter name, if any.
fn first_value<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Resolve all recognized parameters in declaration order.
///
/// Unrecognized parameters are left out here; they still count toward the
/// total in the response.
fn recognized_values<'a>(params: &'a [(String, String)]) -> Vec<(&'static str, Option<&'a str>)> {
    RECOGNIZED_PARAMS
        .iter()
        .map(|&name| (name, first_value(params, name)))
        .collect()
}
