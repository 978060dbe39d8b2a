//! In-memory cache of aggregation outcomes.
//!
//! Entries are keyed by target and family. Only outcomes with at least one
//! record are stored, so a transient upstream outage is never pinned. There is
//! no expiry; callers drop entries through [`LookupCache::invalidate`] (the
//! refresh operation) or [`LookupCache::clear`].

use std::collections::HashMap;
use std::sync::RwLock;

use crate::aggregator::AggregationOutcome;
use crate::family::Family;

/// Which address an outcome describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The caller's own public address.
    SelfAddress,
    /// An explicit IP literal.
    Target(String),
}

impl CacheKey {
    pub fn from_target(target: Option<&str>) -> Self {
        match target {
            Some(ip) => CacheKey::Target(ip.to_string()),
            None => CacheKey::SelfAddress,
        }
    }
}

#[derive(Default)]
pub struct LookupCache {
    entries: RwLock<HashMap<(CacheKey, Family), AggregationOutcome>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey, family: Family) -> Option<AggregationOutcome> {
        let entries = self.entries.read().ok()?;
        entries.get(&(key.clone(), family)).cloned()
    }

    /// Stores `outcome` unless it is empty. Returns whether it was stored.
    pub fn insert(&self, key: CacheKey, outcome: AggregationOutcome) -> bool {
        if outcome.is_empty() {
            return false;
        }
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert((key, outcome.family()), outcome);
                true
            }
            Err(e) => {
                log::warn!("Lookup cache lock poisoned, skipping insert: {}", e);
                false
            }
        }
    }

    pub fn invalidate(&self, key: &CacheKey, family: Family) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&(key.clone(), family));
        }
    }

    /// Drops both families for `key`.
    pub fn invalidate_target(&self, key: &CacheKey) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|(k, _), _| k != key);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::GeoRecord;

    fn outcome(family: Family, ips: &[&str]) -> AggregationOutcome {
        let records = ips
            .iter()
            .map(|ip| GeoRecord::builder("test", *ip).build())
            .collect();
        AggregationOutcome::new(family, None, records, Vec::new())
    }

    #[test]
    fn test_cache_key_from_target() {
        assert_eq!(CacheKey::from_target(None), CacheKey::SelfAddress);
        assert_eq!(
            CacheKey::from_target(Some("8.8.8.8")),
            CacheKey::Target("8.8.8.8".to_string())
        );
    }

    #[test]
    fn test_insert_and_get() {
        let cache = LookupCache::new();
        let stored = outcome(Family::Ipv4, &["8.8.8.8"]);

        assert!(cache.insert(CacheKey::SelfAddress, stored.clone()));
        assert_eq!(cache.get(&CacheKey::SelfAddress, Family::Ipv4), Some(stored));
        assert_eq!(cache.get(&CacheKey::SelfAddress, Family::Ipv6), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_empty_outcome_is_not_stored() {
        let cache = LookupCache::new();
        assert!(!cache.insert(CacheKey::SelfAddress, outcome(Family::Ipv6, &[])));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_single_family() {
        let cache = LookupCache::new();
        cache.insert(CacheKey::SelfAddress, outcome(Family::Ipv4, &["1.1.1.1"]));
        cache.insert(CacheKey::SelfAddress, outcome(Family::Ipv6, &["2001:db8::1"]));

        cache.invalidate(&CacheKey::SelfAddress, Family::Ipv4);

        assert!(cache.get(&CacheKey::SelfAddress, Family::Ipv4).is_none());
        assert!(cache.get(&CacheKey::SelfAddress, Family::Ipv6).is_some());
    }

    #[test]
    fn test_invalidate_target_keeps_other_targets() {
        let cache = LookupCache::new();
        let target = CacheKey::Target("9.9.9.9".to_string());
        cache.insert(target.clone(), outcome(Family::Ipv4, &["9.9.9.9"]));
        cache.insert(CacheKey::SelfAddress, outcome(Family::Ipv4, &["1.1.1.1"]));

        cache.invalidate_target(&target);

        assert!(cache.get(&target, Family::Ipv4).is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
