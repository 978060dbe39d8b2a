//! ipinfo.io adapter.
//!
//! Only the "own address" endpoint is used; lookups for an explicit IP are
//! reported as unsupported. Coordinates arrive as one `"lat,lon"` string.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;

use super::{endpoint_url, ensure_family, get_json, with_deadline, GeoProvider, ProviderEndpoints};
use crate::error_handling::ProviderError;
use crate::family::Family;
use crate::record::GeoRecord;

const NAME: &str = "ipinfo.io";

#[derive(Debug, Deserialize)]
struct IpinfoResponse {
    ip: String,
    hostname: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    loc: Option<String>,
    org: Option<String>,
    postal: Option<String>,
    timezone: Option<String>,
}

/// Splits a `"lat,lon"` string into coordinates.
///
/// Components that are missing or not numbers come back as `None`; this never
/// fails.
///
/// ```
/// use ipgeo::provider::parse_location;
///
/// assert_eq!(parse_location("37.751,-97.822"), (Some(37.751), Some(-97.822)));
/// assert_eq!(parse_location("37.751"), (Some(37.751), None));
/// ```
pub fn parse_location(loc: &str) -> (Option<f64>, Option<f64>) {
    let mut parts = loc.split(',');
    let latitude = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    let longitude = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    (latitude, longitude)
}

pub struct IpinfoIo {
    client: Arc<Client>,
    base: String,
}

impl IpinfoIo {
    pub fn new(client: Arc<Client>, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client,
            base: endpoints.ipinfo_io.clone(),
        }
    }

    async fn lookup(&self, target: Option<&str>, family: Family) -> Result<GeoRecord, ProviderError> {
        if let Some(ip) = target {
            return Err(ProviderError::Unsupported(format!(
                "{} only reports the caller's own address, cannot look up {}",
                NAME, ip
            )));
        }

        let url = endpoint_url(&self.base, &["json"])?;
        let data: IpinfoResponse = get_json(&self.client, url).await?;
        ensure_family(&data.ip, family)?;

        let (latitude, longitude) = data
            .loc
            .as_deref()
            .map(parse_location)
            .unwrap_or((None, None));

        Ok(GeoRecord::builder(NAME, data.ip)
            .city(data.city)
            .region(data.region)
            .country_code(data.country)
            .postal(data.postal)
            .location(latitude, longitude)
            .timezone(data.timezone)
            .isp(data.org)
            .extra("hostname", data.hostname)
            .build())
    }
}

impl GeoProvider for IpinfoIo {
    fn name(&self) -> &'static str {
        NAME
    }

    fn families(&self) -> &'static [Family] {
        &[Family::Ipv4, Family::Ipv6]
    }

    fn fetch<'a>(
        &'a self,
        target: Option<&'a str>,
        family: Family,
        timeout: Duration,
    ) -> BoxFuture<'a, Result<GeoRecord, ProviderError>> {
        Box::pin(with_deadline(timeout, self.lookup(target, family)))
    }
}
