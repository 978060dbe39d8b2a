//! HTTP API data structures.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::aggregator::{AggregationOutcome, Aggregator, DualStackReport};
use crate::error_handling::ProviderFailure;
use crate::record::GeoRecord;

/// Shared state for the API server.
#[derive(Clone)]
pub struct ServerState {
    pub aggregator: Arc<Aggregator>,
    pub start_time: Arc<Instant>,
}

impl ServerState {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self {
            aggregator,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// `?ip=` query parameter accepted by every lookup route.
#[derive(Debug, Default, Deserialize)]
pub struct TargetQuery {
    pub ip: Option<String>,
}

/// Envelope for every lookup response.
///
/// `failures` is always present so clients can tell a partial answer from a
/// complete one.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub failures: Vec<ProviderFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse<Vec<GeoRecord>> {
    pub fn from_outcome(outcome: AggregationOutcome) -> Self {
        let failures = outcome.failures().to_vec();
        if outcome.is_empty() {
            return Self {
                success: false,
                data: None,
                failures,
                error: Some(format!(
                    "No {} geolocation data available from any provider",
                    outcome.family()
                )),
            };
        }
        Self {
            success: true,
            data: Some(outcome.into_records()),
            failures,
            error: None,
        }
    }
}

/// Both families side by side, never merged.
#[derive(Debug, Serialize)]
pub struct DualStackData {
    pub ipv4: Vec<GeoRecord>,
    pub ipv6: Vec<GeoRecord>,
}

impl ApiResponse<DualStackData> {
    pub fn from_report(report: DualStackReport) -> Self {
        let empty = report.is_empty();
        let mut failures = report.ipv4.failures().to_vec();
        failures.extend_from_slice(report.ipv6.failures());

        if empty {
            return Self {
                success: false,
                data: None,
                failures,
                error: Some("No geolocation data available from any provider".to_string()),
            };
        }
        Self {
            success: true,
            data: Some(DualStackData {
                ipv4: report.ipv4.into_records(),
                ipv6: report.ipv6.into_records(),
            }),
            failures,
            error: None,
        }
    }
}

/// JSON response for `/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub providers: Vec<&'static str>,
    pub provider_timeout_seconds: f64,
    pub lookups: usize,
    pub empty_lookups: usize,
    pub provider_successes: usize,
    pub cache_hits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_entries: Option<usize>,
    pub failures: FailureCounts,
}

#[derive(Debug, Serialize)]
pub struct FailureCounts {
    pub total: usize,
    pub timeout: usize,
    pub transport_error: usize,
    pub upstream_error: usize,
    pub parse_error: usize,
    pub unsupported: usize,
    pub family_mismatch: usize,
}
