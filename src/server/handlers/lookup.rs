//! Lookup handlers.
//!
//! Every handler answers 200 when at least one provider produced a record and
//! 503 when none did. The failure list is included either way.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::super::target::resolve_target;
use super::super::types::{ApiResponse, DualStackData, ServerState, TargetQuery};
use crate::family::Family;
use crate::record::GeoRecord;

fn respond<T: Serialize>(body: ApiResponse<T>) -> Response {
    let status = if body.success {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}

async fn single_family(
    state: &ServerState,
    query: &TargetQuery,
    headers: &HeaderMap,
    family: Family,
) -> ApiResponse<Vec<GeoRecord>> {
    let target = resolve_target(query.ip.as_deref(), headers);
    log::info!(
        "{} lookup for {}",
        family,
        target.as_deref().unwrap_or("own address")
    );
    let outcome = state.aggregator.aggregate(target.as_deref(), family).await;
    ApiResponse::from_outcome(outcome)
}

/// `GET /api/ip-info`: IPv4 and IPv6 records, reported separately.
pub async fn ip_info_handler(
    State(state): State<ServerState>,
    Query(query): Query<TargetQuery>,
    headers: HeaderMap,
) -> Response {
    let target = resolve_target(query.ip.as_deref(), &headers);
    log::info!(
        "Dual-stack lookup for {}",
        target.as_deref().unwrap_or("own address")
    );
    let report = state.aggregator.aggregate_both(target.as_deref()).await;
    respond::<DualStackData>(ApiResponse::from_report(report))
}

/// `GET /api/ipv4`
pub async fn ipv4_handler(
    State(state): State<ServerState>,
    Query(query): Query<TargetQuery>,
    headers: HeaderMap,
) -> Response {
    respond(single_family(&state, &query, &headers, Family::Ipv4).await)
}

/// `GET /api/ipv6`
pub async fn ipv6_handler(
    State(state): State<ServerState>,
    Query(query): Query<TargetQuery>,
    headers: HeaderMap,
) -> Response {
    respond(single_family(&state, &query, &headers, Family::Ipv6).await)
}

/// `GET /api/refresh`: drops cached results for the target and looks it up again.
pub async fn refresh_handler(
    State(state): State<ServerState>,
    Query(query): Query<TargetQuery>,
    headers: HeaderMap,
) -> Response {
    let target = resolve_target(query.ip.as_deref(), &headers);
    log::info!(
        "Refreshing {}",
        target.as_deref().unwrap_or("own address")
    );
    let report = state.aggregator.refresh_both(target.as_deref()).await;
    respond::<DualStackData>(ApiResponse::from_report(report))
}
