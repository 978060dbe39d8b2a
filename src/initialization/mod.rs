//! Application initialization and resource setup.
//!
//! Builds the shared HTTP client, the logger and the aggregator with its
//! provider set, cache and statistics.

mod client;
mod logger;

use std::sync::Arc;
use std::time::Duration;

use crate::aggregator::Aggregator;
use crate::cache::LookupCache;
use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::provider::{default_providers, ProviderEndpoints};

pub use client::init_client;
pub use logger::init_logger_with;

/// Builds an aggregator over the standard providers.
///
/// `endpoints` is only overridden by tests; pass `ProviderEndpoints::default()`
/// otherwise. A cache is attached when `cache` is `Some`.
pub fn init_aggregator(
    config: &Config,
    endpoints: &ProviderEndpoints,
    cache: Option<Arc<LookupCache>>,
) -> Result<Aggregator, InitializationError> {
    let client = init_client(config)?;
    let providers = default_providers(client, endpoints);
    log::debug!(
        "Registered providers: {}",
        providers
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let aggregator = Aggregator::new(providers, Duration::from_secs(config.timeout_seconds));
    Ok(match cache {
        Some(cache) => aggregator.with_cache(cache),
        None => aggregator,
    })
}
