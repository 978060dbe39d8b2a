//! Geolocation provider adapters.
//!
//! Each upstream service gets one [`GeoProvider`] implementation that knows its
//! URL shape, success signalling and response schema. Provider-specific parsing
//! stays inside the implementation; the aggregator only sees the trait.
//!
//! Registration order (see [`default_providers`]) is part of the output
//! contract: aggregated records are reported in that order.

mod ip_api_com;
mod ipapi_co;
mod ipinfo_io;


use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{IPAPI_CO_URL, IPIFY_V4_URL, IPIFY_V6_URL, IPINFO_IO_URL, IP_API_COM_URL};
use crate::error_handling::{categorize_reqwest_error, ProviderError};
use crate::family::{classify, Family};
use crate::record::GeoRecord;

pub use ip_api_com::IpApiCom;
pub use ipapi_co::IpapiCo;
pub use ipinfo_io::{parse_location, IpinfoIo};

/// One upstream geolocation service.
pub trait GeoProvider: Send + Sync {
    /// Stable identifier, used as the record's `source`.
    fn name(&self) -> &'static str;

    /// Families this provider can answer for.
    fn families(&self) -> &'static [Family];

    fn supports(&self, family: Family) -> bool {
        self.families().contains(&family)
    }

    /// Fetches one record.
    ///
    /// `target` of `None` queries the provider's "own address" endpoint. The
    /// call must finish within `timeout` or fail with [`ProviderError::Timeout`].
    fn fetch<'a>(
        &'a self,
        target: Option<&'a str>,
        family: Family,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<GeoRecord, ProviderError>>;
}

/// Base URLs for every provider.
///
/// Defaults point at the public services; tests point them at a mock server.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub ipify_v4: String,
    pub ipify_v6: String,
    pub ipapi_co: String,
    pub ipinfo_io: String,
    pub ip_api_com: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            ipify_v4: IPIFY_V4_URL.to_string(),
            ipify_v6: IPIFY_V6_URL.to_string(),
            ipapi_co: IPAPI_CO_URL.to_string(),
            ipinfo_io: IPINFO_IO_URL.to_string(),
            ip_api_com: IP_API_COM_URL.to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Routes every provider to a path under one base URL.
    ///
    /// `http://127.0.0.1:9000` yields `http://127.0.0.1:9000/ipapi`,
    /// `http://127.0.0.1:9000/ipinfo` and so on.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            ipify_v4: format!("{}/ipify4", base),
            ipify_v6: format!("{}/ipify6", base),
            ipapi_co: format!("{}/ipapi", base),
            ipinfo_io: format!("{}/ipinfo", base),
            ip_api_com: format!("{}/ip-api", base),
        }
    }
}

/// Builds the standard provider set in registration order.
pub fn default_providers(
    client: Arc<Client>,
    endpoints: &ProviderEndpoints,
) -> Vec<Arc<dyn GeoProvider>> {
    vec![
        Arc::new(IpapiCo::new(Arc::clone(&client), endpoints)),
        Arc::new(IpinfoIo::new(Arc::clone(&client), endpoints)),
        Arc::new(IpApiCom::new(client, endpoints)),
    ]
}

/// Runs a provider lookup under a hard deadline.
pub(crate) async fn with_deadline<F>(
    timeout: Duration,
    lookup: F,
) -> Result<GeoRecord, ProviderError>
where
    F: Future<Output = Result<GeoRecord, ProviderError>>,
{
    tokio::time::timeout(timeout, lookup)
        .await
        .unwrap_or(Err(ProviderError::Timeout))
}

/// GETs `url` and decodes a JSON body.
///
/// Anything but HTTP 200 is an upstream error carrying the raw status; the body
/// is not parsed in that case.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
) -> Result<T, ProviderError> {
    log::debug!("GET {}", url);

    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| categorize_reqwest_error(&e))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ProviderError::Upstream {
            status: format!("HTTP {}", status.as_u16()),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| categorize_reqwest_error(&e))?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))
}

/// Fails with `FamilyMismatch` unless `ip` belongs to `expected`.
pub(crate) fn ensure_family(ip: &str, expected: Family) -> Result<(), ProviderError> {
    let actual = classify(ip);
    if actual == expected {
        Ok(())
    } else {
        Err(ProviderError::FamilyMismatch {
            expected,
            actual,
            ip: ip.to_string(),
        })
    }
}

/// Renders a JSON scalar as a string; providers disagree on whether ASNs are
/// numbers or strings.
pub(crate) fn json_scalar(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Appends `segments` to the path of `base`.
///
/// Each segment is percent-encoded as a single path segment, so a target such
/// as `1.1.1.1/../9.9.9.9` or `9.9.9.9?fields=status` can never change which
/// resource is fetched. An empty last segment yields a trailing slash.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base)
        .map_err(|e| ProviderError::Transport(format!("invalid base URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::Transport(format!("base URL {} cannot take a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
