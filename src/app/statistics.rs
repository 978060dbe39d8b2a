//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{FailureKind, LookupStats};

/// Logs lookup and provider failure counters.
///
/// Failure kinds with a zero count are skipped.
pub fn print_lookup_statistics(stats: &LookupStats) {
    info!(
        "Lookups: {} ({} without data), provider answers: {}, cache hits: {}",
        stats.lookups(),
        stats.empty_lookups(),
        stats.successes(),
        stats.cache_hits()
    );

    let total_failures = stats.total_failures();
    if total_failures > 0 {
        info!("Provider failures ({} total):", total_failures);
        for kind in FailureKind::iter() {
            let count = stats.get_failure_count(kind);
            if count > 0 {
                info!("   {}: {}", kind.as_str(), count);
            }
        }
    }
}
