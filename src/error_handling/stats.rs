//! Lookup statistics tracking.
//!
//! This module provides thread-safe counters for provider failures, provider
//! successes and aggregation outcomes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::FailureKind;

/// Thread-safe lookup statistics tracker.
///
/// Failure counters are keyed by `FailureKind` and initialized to zero for every
/// kind on creation, so increments never miss. Shared across tasks with `Arc`.
pub struct LookupStats {
    failures: HashMap<FailureKind, AtomicUsize>,
    successes: AtomicUsize,
    lookups: AtomicUsize,
    empty_lookups: AtomicUsize,
    cache_hits: AtomicUsize,
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for kind in FailureKind::iter() {
            failures.insert(kind, AtomicUsize::new(0));
        }

        LookupStats {
            failures,
            successes: AtomicUsize::new(0),
            lookups: AtomicUsize::new(0),
            empty_lookups: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
        }
    }

    /// Increment the counter for one failed provider call.
    pub fn increment_failure(&self, kind: FailureKind) {
        if let Some(counter) = self.failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in LookupStats initialization.",
                kind
            );
        }
    }

    /// Increment the counter for one provider call that produced a record.
    pub fn increment_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a finished aggregation; `empty` means no provider produced a record.
    pub fn record_lookup(&self, empty: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if empty {
            self.empty_lookups.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for a failure kind.
    pub fn get_failure_count(&self, kind: FailureKind) -> usize {
        self.failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total failure count across all kinds.
    pub fn total_failures(&self) -> usize {
        FailureKind::iter()
            .map(|k| self.get_failure_count(k))
            .sum()
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn empty_lookups(&self) -> usize {
        self.empty_lookups.load(Ordering::SeqCst)
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::SeqCst)
    }
}
