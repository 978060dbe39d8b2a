//! Canonical geolocation record.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::country::resolve_country_name;
use crate::family::{classify, Family};

/// Provider-agnostic geolocation record.
///
/// Every adapter produces this shape. Records are built once through
/// [`GeoRecordBuilder`] and are read-only afterwards. Fields the provider did not
/// report are `None`; no placeholder text is ever stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRecord {
    source: String,
    ip: String,
    family: Family,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
    country_code: Option<String>,
    postal: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
    isp: Option<String>,
    asn: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<String, String>,
}

impl GeoRecord {
    pub fn builder(source: impl Into<String>, ip: impl Into<String>) -> GeoRecordBuilder {
        GeoRecordBuilder::new(source, ip)
    }

    /// Adapter identifier, e.g. `"ipapi.co"`.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// IP literal as returned by the provider.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Family derived from [`GeoRecord::ip`], never taken from the provider.
    pub fn family(&self) -> Family {
        self.family
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn country_name(&self) -> Option<&str> {
        self.country_name.as_deref()
    }

    /// ISO 3166-1 alpha-2 code, upper-cased.
    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn postal(&self) -> Option<&str> {
        self.postal.as_deref()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    pub fn isp(&self) -> Option<&str> {
        self.isp.as_deref()
    }

    pub fn asn(&self) -> Option<&str> {
        self.asn.as_deref()
    }

    /// Fields only one provider exposes (hostname, continent).
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

/// Builder for [`GeoRecord`].
///
/// Setters take `Option`s so adapters can pass provider fields straight
/// through. Strings are trimmed and empty strings count as absent.
#[derive(Debug, Clone)]
pub struct GeoRecordBuilder {
    source: String,
    ip: String,
    city: Option<String>,
    region: Option<String>,
    country_code: Option<String>,
    postal: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    timezone: Option<String>,
    isp: Option<String>,
    asn: Option<String>,
    extra: BTreeMap<String, String>,
}

impl GeoRecordBuilder {
    pub fn new(source: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ip: ip.into().trim().to_string(),
            city: None,
            region: None,
            country_code: None,
            postal: None,
            latitude: None,
            longitude: None,
            timezone: None,
            isp: None,
            asn: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn city(mut self, city: Option<String>) -> Self {
        self.city = non_empty(city);
        self
    }

    pub fn region(mut self, region: Option<String>) -> Self {
        self.region = non_empty(region);
        self
    }

    /// Sets the country code; the display name is resolved from it at build time.
    pub fn country_code(mut self, code: Option<String>) -> Self {
        self.country_code = non_empty(code).map(|c| c.to_ascii_uppercase());
        self
    }

    pub fn postal(mut self, postal: Option<String>) -> Self {
        self.postal = non_empty(postal);
        self
    }

    pub fn location(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.latitude = latitude.filter(|v| v.is_finite());
        self.longitude = longitude.filter(|v| v.is_finite());
        self
    }

    pub fn timezone(mut self, timezone: Option<String>) -> Self {
        self.timezone = non_empty(timezone);
        self
    }

    pub fn isp(mut self, isp: Option<String>) -> Self {
        self.isp = non_empty(isp);
        self
    }

    pub fn asn(mut self, asn: Option<String>) -> Self {
        self.asn = non_empty(asn);
        self
    }

    /// Adds a provider-specific field; absent or empty values are skipped.
    pub fn extra(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(value) = non_empty(value) {
            self.extra.insert(key.to_string(), value);
        }
        self
    }

    pub fn build(self) -> GeoRecord {
        let family = classify(&self.ip);
        let country_name = self.country_code.as_deref().map(resolve_country_name);

        GeoRecord {
            source: self.source,
            ip: self.ip,
            family,
            city: self.city,
            region: self.region,
            country_name,
            country_code: self.country_code,
            postal: self.postal,
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone,
            isp: self.isp,
            asn: self.asn,
            extra: self.extra,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
