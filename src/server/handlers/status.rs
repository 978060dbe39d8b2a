//! JSON status handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::{FailureCounts, ServerState, StatusResponse};
use crate::error_handling::FailureKind;

/// Lookup counters since the server started.
pub async fn status_handler(State(state): State<ServerState>) -> Response {
    let aggregator = &state.aggregator;
    let stats = aggregator.stats();

    let response = StatusResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        providers: aggregator.providers().iter().map(|p| p.name()).collect(),
        provider_timeout_seconds: aggregator.timeout().as_secs_f64(),
        lookups: stats.lookups(),
        empty_lookups: stats.empty_lookups(),
        provider_successes: stats.successes(),
        cache_hits: stats.cache_hits(),
        cache_entries: aggregator.cache().map(|c| c.len()),
        failures: FailureCounts {
            total: stats.total_failures(),
            timeout: stats.get_failure_count(FailureKind::Timeout),
            transport_error: stats.get_failure_count(FailureKind::TransportError),
            upstream_error: stats.get_failure_count(FailureKind::UpstreamError),
            parse_error: stats.get_failure_count(FailureKind::ParseError),
            unsupported: stats.get_failure_count(FailureKind::Unsupported),
            family_mismatch: stats.get_failure_count(FailureKind::FamilyMismatch),
        },
    };

    let json = match serde_json::to_string_pretty(&response) {
        Ok(json) => json,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize status: {}", e),
            )
                .into_response();
        }
    };

    (StatusCode::OK, [("content-type", "application/json")], json).into_response()
}
