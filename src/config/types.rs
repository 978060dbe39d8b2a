//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_PROVIDER_TIMEOUT_SECS, DEFAULT_SERVER_PORT, DEFAULT_USER_AGENT,
};
use crate::family::Family;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which address families a lookup covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FamilySelector {
    /// IPv4 providers only
    Ipv4,
    /// IPv6 providers only
    Ipv6,
    /// One IPv4 and one IPv6 aggregation, reported separately
    Both,
}

impl FamilySelector {
    /// Families to aggregate, in reporting order.
    pub fn families(&self) -> &'static [Family] {
        match self {
            FamilySelector::Ipv4 => &[Family::Ipv4],
            FamilySelector::Ipv6 => &[Family::Ipv6],
            FamilySelector::Both => &[Family::Ipv4, Family::Ipv6],
        }
    }
}

/// How lookup results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// One field per line, one block per provider
    Table,
}

/// Application configuration.
///
/// Parsed from the command line by the binary, or built with `Default` and
/// struct update syntax by library callers.
///
/// # Examples
///
/// ```no_run
/// use ipgeo::Config;
///
/// let config = Config {
///     ip: Some("8.8.8.8".to_string()),
///     timeout_seconds: 3,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ipgeo",
    version,
    about = "Ask several geolocation providers about an IP address and compare their answers"
)]
pub struct Config {
    /// IP address to look up (omit to look up this machine's public address)
    pub ip: Option<String>,

    /// Address families to query
    #[arg(long, value_enum, default_value_t = FamilySelector::Both)]
    pub family: FamilySelector,

    /// Per-provider timeout in seconds (at least 1)
    #[arg(
        long,
        default_value_t = DEFAULT_PROVIDER_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Write one record to this CSV file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Provider whose record is exported (defaults to the first record)
    #[arg(long, requires = "export_csv")]
    pub export_source: Option<String>,

    /// Run the HTTP API on this port instead of a one-shot lookup (5000 when no port is given)
    #[arg(long, num_args = 0..=1, default_missing_value = "5000")]
    pub serve: Option<u16>,

    /// Address the HTTP API binds to
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ip: None,
            family: FamilySelector::Both,
            timeout_seconds: DEFAULT_PROVIDER_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            format: OutputFormat::Json,
            export_csv: None,
            export_source: None,
            serve: None,
            bind: DEFAULT_BIND_ADDRESS.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
