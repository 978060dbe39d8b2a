//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: timeouts,
//! provider endpoints and presentation placeholders.

// Network operation timeouts
/// Per-provider deadline in seconds.
/// Every adapter call is cut off after this long; one slow provider never holds
/// up the others beyond it.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 5;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Default User-Agent string for provider requests.
pub const DEFAULT_USER_AGENT: &str = concat!("ipgeo/", env!("CARGO_PKG_VERSION"));

// Provider endpoints
/// ipify endpoint that answers with the caller's IPv4 address
pub const IPIFY_V4_URL: &str = "https://api.ipify.org";
/// ipify endpoint that answers with the caller's preferred address (IPv6 when available)
pub const IPIFY_V6_URL: &str = "https://api64.ipify.org";
/// ipapi.co base URL
pub const IPAPI_CO_URL: &str = "https://ipapi.co";
/// ipinfo.io base URL
pub const IPINFO_IO_URL: &str = "https://ipinfo.io";
/// ip-api.com base URL (the free tier is plain HTTP only)
pub const IP_API_COM_URL: &str = "http://ip-api.com";

// HTTP API
/// Default port for `--serve`
pub const DEFAULT_SERVER_PORT: u16 = 5000;
/// Default bind address for `--serve`
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Reverse-proxy header carrying the original client address
pub const HEADER_X_FORWARDED_FOR: &str = "x-forwarded-for";

// Presentation
/// Placeholder shown for fields a provider did not report.
/// Only the presentation layer substitutes it; records keep absent fields absent.
pub const NOT_AVAILABLE: &str = "N/A";
