// Shared helpers for mounting provider responses on a mock server.
//
// Paths follow `ProviderEndpoints::with_base`: /ipify4, /ipify6, /ipapi,
// /ipinfo and /ip-api under the mock server's URI.

use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ipgeo::provider::ProviderEndpoints;
use ipgeo::Config;

#[allow(dead_code)]
pub fn endpoints(server: &MockServer) -> ProviderEndpoints {
    ProviderEndpoints::with_base(&server.uri())
}

#[allow(dead_code)]
pub fn config_for(ip: Option<&str>) -> Config {
    Config {
        ip: ip.map(str::to_string),
        timeout_seconds: 1,
        ..Default::default()
    }
}

pub async fn mount(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_delayed(server: &MockServer, route: &str, body: Value, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_ipify(server: &MockServer, v4: &str, v6: &str) {
    mount(server, "/ipify4", json!({ "ip": v4 })).await;
    mount(server, "/ipify6", json!({ "ip": v6 })).await;
}

#[allow(dead_code)]
pub async fn mount_ipapi(server: &MockServer, ip: &str, city: &str) {
    mount(
        server,
        &format!("/ipapi/{}/json/", ip),
        json!({ "ip": ip, "city": city, "country_code": "US", "asn": "AS64500" }),
    )
    .await;
}

#[allow(dead_code)]
pub async fn mount_ipinfo(server: &MockServer, ip: &str, city: &str) {
    mount(
        server,
        "/ipinfo/json",
        json!({ "ip": ip, "city": city, "country": "US", "loc": "40.7128,-74.0060" }),
    )
    .await;
}

#[allow(dead_code)]
pub fn ip_api_body(ip: &str, city: &str) -> Value {
    json!({ "status": "success", "query": ip, "city": city, "countryCode": "US", "lat": 40.71, "lon": -74.0 })
}

#[allow(dead_code)]
pub async fn mount_ip_api(server: &MockServer, target: Option<&str>, ip: &str, city: &str) {
    let route = match target {
        Some(target) => format!("/ip-api/json/{}", target),
        None => "/ip-api/json/".to_string(),
    };
    mount(server, &route, ip_api_body(ip, city)).await;
}
