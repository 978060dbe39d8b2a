//! Multi-provider aggregation.
//!
//! The aggregator fans one query out to every registered provider that supports
//! the requested family, runs the calls in parallel under a per-call deadline
//! and collects the survivors in registration order. Provider failures are
//! returned as [`ProviderFailure`] values next to the records; an aggregation
//! itself never fails.

mod types;


use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};

use crate::cache::{CacheKey, LookupCache};
use crate::error_handling::{LookupStats, ProviderError, ProviderFailure};
use crate::family::Family;
use crate::provider::GeoProvider;
use crate::record::GeoRecord;

pub use types::{AggregationOutcome, AggregationResult, DualStackReport};

/// Fans lookups out to a fixed, ordered set of providers.
pub struct Aggregator {
    providers: Vec<Arc<dyn GeoProvider>>,
    timeout: Duration,
    cache: Option<Arc<LookupCache>>,
    stats: Arc<LookupStats>,
}

impl Aggregator {
    /// Creates an aggregator without a cache.
    ///
    /// `providers` order is the registration order and therefore the order of
    /// records in every outcome.
    pub fn new(providers: Vec<Arc<dyn GeoProvider>>, timeout: Duration) -> Self {
        Self {
            providers,
            timeout,
            cache: None,
            stats: Arc::new(LookupStats::new()),
        }
    }

    pub fn with_cache(mut self, cache: Arc<LookupCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_stats(mut self, stats: Arc<LookupStats>) -> Self {
        self.stats = stats;
        self
    }

    pub fn providers(&self) -> &[Arc<dyn GeoProvider>] {
        &self.providers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn stats(&self) -> &Arc<LookupStats> {
        &self.stats
    }

    pub fn cache(&self) -> Option<&Arc<LookupCache>> {
        self.cache.as_ref()
    }

    /// Looks up `target` (or the caller's own address when `None` or blank)
    /// with every provider that supports `family`.
    ///
    /// Served from the cache when an entry exists. Fresh outcomes with at least
    /// one record are cached.
    pub async fn aggregate(&self, target: Option<&str>, family: Family) -> AggregationOutcome {
        let target = normalize_target(target);
        let key = CacheKey::from_target(target);

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key, family) {
                debug!("Cache hit for {:?} ({})", key, family);
                self.stats.increment_cache_hit();
                return hit;
            }
        }

        let outcome = self.fan_out(target, family).await;
        self.stats.record_lookup(outcome.is_empty());

        if outcome.is_empty() {
            warn!(
                "No provider returned {} data for {}",
                family,
                target.unwrap_or("own address")
            );
        }

        if let Some(cache) = &self.cache {
            cache.insert(key, outcome.clone());
        }

        outcome
    }

    /// Runs an IPv4 and an IPv6 aggregation for the same target concurrently.
    pub async fn aggregate_both(&self, target: Option<&str>) -> DualStackReport {
        let (ipv4, ipv6) = tokio::join!(
            self.aggregate(target, Family::Ipv4),
            self.aggregate(target, Family::Ipv6)
        );
        DualStackReport { ipv4, ipv6 }
    }

    /// Drops any cached outcome for (`target`, `family`) and aggregates again.
    pub async fn refresh(&self, target: Option<&str>, family: Family) -> AggregationOutcome {
        if let Some(cache) = &self.cache {
            cache.invalidate(&CacheKey::from_target(normalize_target(target)), family);
        }
        self.aggregate(target, family).await
    }

    /// Drops both cached families for `target` and runs a fresh dual-stack lookup.
    pub async fn refresh_both(&self, target: Option<&str>) -> DualStackReport {
        if let Some(cache) = &self.cache {
            cache.invalidate_target(&CacheKey::from_target(normalize_target(target)));
        }
        self.aggregate_both(target).await
    }

    async fn fan_out(&self, target: Option<&str>, family: Family) -> AggregationOutcome {
        let invoked: Vec<&Arc<dyn GeoProvider>> = self
            .providers
            .iter()
            .filter(|p| p.supports(family))
            .collect();

        debug!(
            "Querying {} provider(s) for {} ({})",
            invoked.len(),
            target.unwrap_or("own address"),
            family
        );

        let timeout = self.timeout;
        // join_all keeps input order, so results line up with `invoked`
        let results = join_all(invoked.iter().map(|provider| async move {
            tokio::time::timeout(timeout, provider.fetch(target, family, timeout))
                .await
                .unwrap_or(Err(ProviderError::Timeout))
        }))
        .await;

        let mut records = Vec::with_capacity(invoked.len());
        let mut failures = Vec::new();

        for (provider, result) in invoked.iter().zip(results) {
            match result.and_then(|record| check_family(record, family)) {
                Ok(record) => {
                    debug!("{} answered for {} ({})", provider.name(), record.ip(), family);
                    self.stats.increment_success();
                    records.push(record);
                }
                Err(e) => {
                    warn!("{} failed ({}): {}", provider.name(), e.kind(), e);
                    self.stats.increment_failure(e.kind());
                    failures.push(ProviderFailure::new(provider.name(), family, &e));
                }
            }
        }

        AggregationOutcome::new(family, target.map(str::to_string), records, failures)
    }
}

/// Trims the target; blank means "own address".
fn normalize_target(target: Option<&str>) -> Option<&str> {
    target.map(str::trim).filter(|t| !t.is_empty())
}

fn check_family(record: GeoRecord, expected: Family) -> Result<GeoRecord, ProviderError> {
    if record.family() == expected {
        Ok(record)
    } else {
        Err(ProviderError::FamilyMismatch {
            expected,
            actual: record.family(),
            ip: record.ip().to_string(),
        })
    }
}
