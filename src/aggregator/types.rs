//! Aggregation result types.

use serde::Serialize;

use crate::error_handling::ProviderFailure;
use crate::family::Family;
use crate::record::GeoRecord;

/// Records for one family, in provider registration order.
pub type AggregationResult = Vec<GeoRecord>;

/// Result of one fan-out for one family.
///
/// `records` holds every provider that produced a record of the requested
/// family, in registration order. `failures` describes the rest. An empty
/// `records` list is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationOutcome {
    family: Family,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    records: AggregationResult,
    failures: Vec<ProviderFailure>,
}

impl AggregationOutcome {
    pub fn new(
        family: Family,
        target: Option<String>,
        records: AggregationResult,
        failures: Vec<ProviderFailure>,
    ) -> Self {
        Self {
            family,
            target,
            records,
            failures,
        }
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// The IP that was looked up, `None` for a self-lookup.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    pub fn failures(&self) -> &[ProviderFailure] {
        &self.failures
    }

    /// True when no provider produced a record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> AggregationResult {
        self.records
    }
}

/// IPv4 and IPv6 outcomes for the same target, gathered concurrently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualStackReport {
    pub ipv4: AggregationOutcome,
    pub ipv6: AggregationOutcome,
}

impl DualStackReport {
    pub fn get(&self, family: Family) -> &AggregationOutcome {
        match family {
            Family::Ipv4 => &self.ipv4,
            Family::Ipv6 => &self.ipv6,
        }
    }

    /// True when neither family produced a record.
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }
}
