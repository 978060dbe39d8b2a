//! ip-api.com adapter.
//!
//! Besides the HTTP status, every body carries `"status": "success" | "fail"`;
//! both must signal success.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;

use super::{endpoint_url, ensure_family, get_json, with_deadline, GeoProvider, ProviderEndpoints};
use crate::error_handling::ProviderError;
use crate::family::Family;
use crate::record::GeoRecord;

const NAME: &str = "ip-api.com";
const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    query: Option<String>,
    city: Option<String>,
    region_name: Option<String>,
    country_code: Option<String>,
    zip: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    timezone: Option<String>,
    isp: Option<String>,
    #[serde(rename = "as")]
    as_number: Option<String>,
}

pub struct IpApiCom {
    client: Arc<Client>,
    base: String,
}

impl IpApiCom {
    pub fn new(client: Arc<Client>, endpoints: &ProviderEndpoints) -> Self {
        Self {
            client,
            base: endpoints.ip_api_com.clone(),
        }
    }

    async fn lookup(&self, target: Option<&str>, family: Family) -> Result<GeoRecord, ProviderError> {
        if let Some(ip) = target {
            ensure_family(ip, family)?;
        }

        let url = match target {
            Some(ip) => endpoint_url(&self.base, &["json", ip])?,
            None => endpoint_url(&self.base, &["json", ""])?,
        };
        let data: IpApiResponse = get_json(&self.client, url).await?;

        if data.status != STATUS_SUCCESS {
            let status = match data.message {
                Some(message) => format!("{}: {}", data.status, message),
                None => data.status,
            };
            return Err(ProviderError::Upstream { status });
        }

        let ip = data
            .query
            .ok_or_else(|| ProviderError::Parse("missing field `query`".to_string()))?;
        ensure_family(&ip, family)?;

        Ok(GeoRecord::builder(NAME, ip)
            .city(data.city)
            .region(data.region_name)
            .country_code(data.country_code)
            .postal(data.zip)
            .location(data.lat, data.lon)
            .timezone(data.timezone)
            .isp(data.isp)
            .asn(data.as_number)
            .build())
    }
}

impl GeoProvider for IpApiCom {
    fn name(&self) -> &'static str {
        NAME
    }

    fn families(&self) -> &'static [Family] {
        &[Family::Ipv4]
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
