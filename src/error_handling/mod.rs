//! Error handling and lookup statistics.
//!
//! This module provides:
//! - The provider error taxonomy (`ProviderError`) and its reporting form
//!   (`ProviderFailure`, `FailureKind`)
//! - Categorization of `reqwest` errors into that taxonomy
//! - Thread-safe lookup statistics
//!
//! Provider errors are always local to one adapter call. The aggregator turns
//! them into failure descriptors instead of propagating them.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::LookupStats;
pub use types::{FailureKind, InitializationError, ProviderError, ProviderFailure};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Family;
    use strum::IntoEnumIterator;

    #[test]
    fn test_lookup_stats_initialization() {
        let stats = LookupStats::new();
        for kind in FailureKind::iter() {
            assert_eq!(stats.get_failure_count(kind), 0);
        }
        assert_eq!(stats.successes(), 0);
        assert_eq!(stats.lookups(), 0);
        assert_eq!(stats.empty_lookups(), 0);
        assert_eq!(stats.cache_hits(), 0);
    }

    #[test]
    fn test_lookup_stats_increment() {
        let stats = LookupStats::new();
        stats.increment_failure(FailureKind::Timeout);
        stats.increment_failure(FailureKind::Timeout);
        stats.increment_failure(FailureKind::Unsupported);
        stats.increment_success();

        assert_eq!(stats.get_failure_count(FailureKind::Timeout), 2);
        assert_eq!(stats.get_failure_count(FailureKind::Unsupported), 1);
        assert_eq!(stats.total_failures(), 3);
        assert_eq!(stats.successes(), 1);
    }

    #[test]
    fn test_lookup_stats_record_lookup() {
        let stats = LookupStats::new();
        stats.record_lookup(false);
        stats.record_lookup(true);
        stats.record_lookup(true);

        assert_eq!(stats.lookups(), 3);
        assert_eq!(stats.empty_lookups(), 2);
    }

    #[test]
    fn test_provider_error_kinds() {
        let cases = [
            (ProviderError::Timeout, FailureKind::Timeout),
            (
                ProviderError::Transport("refused".into()),
                FailureKind::TransportError,
            ),
            (
                ProviderError::Upstream {
                    status: "HTTP 503".into(),
                },
                FailureKind::UpstreamError,
            ),
            (
                ProviderError::Parse("missing field".into()),
                FailureKind::ParseError,
            ),
            (
                ProviderError::Unsupported("lookup by IP".into()),
                FailureKind::Unsupported,
            ),
            (
                ProviderError::FamilyMismatch {
                    expected: Family::Ipv6,
                    actual: Family::Ipv4,
                    ip: "8.8.8.8".into(),
                },
                FailureKind::FamilyMismatch,
            ),
        ];

        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{} should map to {:?}", error, kind);
        }
    }

    #[test]
    fn test_upstream_error_carries_raw_status() {
        let error = ProviderError::Upstream {
            status: "fail: private range".into(),
        };
        assert_eq!(error.to_string(), "upstream error: fail: private range");
    }

    #[test]
    fn test_provider_failure_descriptor() {
        let error = ProviderError::FamilyMismatch {
            expected: Family::Ipv6,
            actual: Family::Ipv4,
            ip: "1.2.3.4".into(),
        };
        let failure = ProviderFailure::new("ipinfo.io", Family::Ipv6, &error);

        assert_eq!(failure.provider, "ipinfo.io");
        assert_eq!(failure.family, Family::Ipv6);
        assert_eq!(failure.kind, FailureKind::FamilyMismatch);
        assert!(failure.message.contains("1.2.3.4"));
    }

    #[test]
    fn test_failure_kind_serializes_by_name() {
        let json = serde_json::to_string(&FailureKind::UpstreamError).unwrap();
        assert_eq!(json, "\"UpstreamError\"");
        assert_eq!(FailureKind::TransportError.to_string(), "Transport error");
    }
}
