//! ipapi.co adapter.
//!
//! ipapi.co only answers lookups by IP. For "own address" queries the address is
//! first discovered through ipify (`api.ipify.org` for IPv4, `api64.ipify.org`
//! for IPv6) and then looked up.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;

use super::{
    endpoint_url, ensure_family, get_json, json_scalar, with_deadline, GeoProvider,
    ProviderEndpoints,
};
use crate::error_handling::ProviderError;
use crate::family::Family;
use crate::record::GeoRecord;

const NAME: &str = "ipapi.co";

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

#[derive(Debug, Deserialize)]
struct IpapiResponse {
    ip: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country_code: Option<String>,
    postal: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
    org: Option<String>,
    asn: Option<serde_json::Value>,
    continent_code: Option<String>,
}

pub struct IpapiCo {
    client: Arc<Client>,
    ipify_v4: String,
    ipify_v6: String,
    base: String,
}

impl IpapiCo {
    pub fn new(client: Arc<Client>, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client,
            ipify_v4: endpoints.ipify_v4.clone(),
            ipify_v6: endpoints.ipify_v6.clone(),
            base: endpoints.ipapi_co.clone(),
        }
    }

    async fn discover_own_ip(&self, family: Family) -> Result<String, ProviderError> {
        let endpoint = match family {
            Family::Ipv4 => &self.ipify_v4,
            Family::Ipv6 => &self.ipify_v6,
        };
        let mut url = endpoint_url(endpoint, &[])?;
        url.query_pairs_mut().append_pair("format", "json");
        let discovered: IpifyResponse = get_json(&self.client, url).await?;
        Ok(discovered.ip.trim().to_string())
    }

    async fn lookup(&self, target: Option<&str>, family: Family) -> Result<GeoRecord, ProviderError> {
        let ip = match target {
            Some(ip) => ip.to_string(),
            None => self.discover_own_ip(family).await?,
        };
        // ipify on a v4-only network answers api64 with an IPv4 address
        ensure_family(&ip, family)?;

        let url = endpoint_url(&self.base, &[ip.as_str(), "json", ""])?;
        let data: IpapiResponse = get_json(&self.client, url).await?;

        if data.error {
            return Err(ProviderError::Upstream {
                status: format!(
                    "error: {}",
                    data.reason.as_deref().unwrap_or("unspecified")
                ),
            });
        }

        let reported_ip = data.ip.unwrap_or(ip);
        ensure_family(&reported_ip, family)?;

        Ok(GeoRecord::builder(NAME, reported_ip)
            .city(data.city)
            .region(data.region)
            .country_code(data.country_code)
            .postal(data.postal)
            .location(data.latitude, data.longitude)
            .timezone(data.timezone)
            .isp(data.org)
            .asn(json_scalar(data.asn))
            .extra("continent", data.continent_code)
            .build())
    }
}

impl GeoProvider for IpapiCo {
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
