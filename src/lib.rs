//! ipgeo library: multi-provider IP geolocation
//!
//! Asks several independent geolocation services about one IP address (or the
//! caller's own public address), normalizes their answers into one
//! [`GeoRecord`] shape and reports every provider's record side by side,
//! partitioned by address family.
//!
//! # Example
//!
//! ```no_run
//! use ipgeo::{run_lookup, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     ip: Some("8.8.8.8".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_lookup(&config).await?;
//! for record in report.records() {
//!     println!("{}: {:?}", record.source(), record.city());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod aggregator;
mod app;
pub mod cache;
pub mod config;
pub mod country;
pub mod error_handling;
pub mod export;
pub mod family;
pub mod initialization;
pub mod provider;
pub mod record;
pub mod server;

// Re-export public API
pub use aggregator::{AggregationOutcome, AggregationResult, Aggregator, DualStackReport};
pub use app::{print_lookup_statistics, render_json, render_table};
pub use config::{Config, FamilySelector, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{FailureKind, ProviderError, ProviderFailure};
pub use family::{classify, Family};
pub use record::{GeoRecord, GeoRecordBuilder};
pub use run::{run_lookup, run_lookup_with, serve, LookupReport};

// Internal run module (one-shot lookups and the API server entry point)
mod run {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use futures::future::join_all;
    use log::{info, warn};
    use serde::Serialize;

    use crate::aggregator::AggregationOutcome;
    use crate::app::print_lookup_statistics;
    use crate::cache::LookupCache;
    use crate::config::{Config, DEFAULT_SERVER_PORT};
    use crate::export::{export_record_csv, select_record};
    use crate::initialization::init_aggregator;
    use crate::provider::ProviderEndpoints;
    use crate::record::GeoRecord;
    use crate::server::{start_server, ServerState};

    /// Result of a one-shot lookup.
    #[derive(Debug, Clone, Serialize)]
    pub struct LookupReport {
        /// The IP that was looked up, `None` for the caller's own address
        pub target: Option<String>,
        /// One outcome per requested family, IPv4 first
        pub outcomes: Vec<AggregationOutcome>,
        /// CSV file written for `--export-csv`
        #[serde(skip_serializing_if = "Option::is_none")]
        pub exported: Option<PathBuf>,
    }

    impl LookupReport {
        /// True when no requested family produced a record.
        pub fn is_empty(&self) -> bool {
            self.outcomes.iter().all(|o| o.is_empty())
        }

        /// Every record across families, in report order.
        pub fn records(&self) -> impl Iterator<Item = &GeoRecord> {
            self.outcomes.iter().flat_map(|o| o.records())
        }
    }

    /// Looks up `config.ip` (or the own address) against the public providers.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built or the CSV export cannot
    /// be written. Provider failures are reported inside the outcomes.
    pub async fn run_lookup(config: &Config) -> Result<LookupReport> {
        run_lookup_with(config, &ProviderEndpoints::default()).await
    }

    /// [`run_lookup`] against explicit provider endpoints.
    pub async fn run_lookup_with(
        config: &Config,
        endpoints: &ProviderEndpoints,
    ) -> Result<LookupReport> {
        let aggregator = init_aggregator(config, endpoints, None)
            .context("Failed to initialize HTTP client")?;

        let target = config
            .ip
            .as_deref()
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        info!(
            "Looking up {} ({:?})",
            target.unwrap_or("own address"),
            config.family
        );

        let outcomes = join_all(
            config
                .family
                .families()
                .iter()
                .map(|family| aggregator.aggregate(target, *family)),
        )
        .await;

        print_lookup_statistics(aggregator.stats());

        let mut report = LookupReport {
            target: target.map(str::to_string),
            outcomes,
            exported: None,
        };

        if let Some(path) = &config.export_csv {
            report.exported = Some(export_selected(&report, config, path)?);
        }

        Ok(report)
    }

    fn export_selected(report: &LookupReport, config: &Config, path: &Path) -> Result<PathBuf> {
        let source = config.export_source.as_deref();
        let record = report
            .outcomes
            .iter()
            .find_map(|o| select_record(o.records(), source))
            .with_context(|| match source {
                Some(source) => format!("No record from {} to export", source),
                None => "No record to export".to_string(),
            })?;

        export_record_csv(record, path)
            .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
        Ok(path.to_path_buf())
    }

    /// Runs the HTTP API until the process exits.
    ///
    /// Lookups are cached for the lifetime of the server; `/api/refresh`
    /// drops entries on demand.
    pub async fn serve(config: &Config) -> Result<()> {
        if config.ip.is_some() {
            warn!("IP argument is ignored in server mode; use ?ip= instead");
        }
        let aggregator = init_aggregator(
            config,
            &ProviderEndpoints::default(),
            Some(Arc::new(LookupCache::new())),
        )
        .context("Failed to initialize HTTP client")?;

        let port = config.serve.unwrap_or(DEFAULT_SERVER_PORT);
        start_server(&config.bind, port, ServerState::new(Arc::new(aggregator)))
            .await
            .context("API server stopped")
    }
}
