//! HTTP API server.
//!
//! Routes:
//! - `/api/ip-info` - IPv4 and IPv6 records for the target
//! - `/api/ipv4`, `/api/ipv6` - one family
//! - `/api/refresh` - drop cached results and look up again
//! - `/status` - lookup counters
//!
//! Every `/api` route takes an optional `?ip=`; without it the first
//! `X-Forwarded-For` entry is used, and without that the server's own address.

mod handlers;
mod target;
mod types;


use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use handlers::{ip_info_handler, ipv4_handler, ipv6_handler, refresh_handler, status_handler};
pub use target::{first_forwarded_for, resolve_target};
pub use types::{ApiResponse, DualStackData, FailureCounts, ServerState, StatusResponse, TargetQuery};

/// Builds the API router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/ip-info", get(ip_info_handler))
        .route("/api/ipv4", get(ipv4_handler))
        .route("/api/ipv6", get(ipv6_handler))
        .route("/api/refresh", get(refresh_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `bind:port` and serves the API until the process exits.
pub async fn start_server(bind: &str, port: u16, state: ServerState) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind((bind, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to {}:{}: {}", bind, port, e))?;

    log::info!("API server listening on http://{}:{}/", bind, port);
    log::info!("  - Lookup: http://{}:{}/api/ip-info", bind, port);
    log::info!("  - Status: http://{}:{}/status", bind, port);

    serve_on(listener, state).await
}

/// Serves the API on an already bound listener.
pub async fn serve_on(listener: TcpListener, state: ServerState) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))
}
