//! End-to-end lookups through the standard providers against a mock server.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use wiremock::MockServer;

use helpers::*;
use ipgeo::cache::LookupCache;
use ipgeo::initialization::init_aggregator;
use ipgeo::{run_lookup_with, FailureKind, Family, FamilySelector};

const OWN_V4: &str = "198.51.100.7";

fn sources(outcome: &ipgeo::AggregationOutcome) -> Vec<&str> {
    outcome.records().iter().map(|r| r.source()).collect()
}

#[tokio::test]
async fn test_self_lookup_collects_all_providers_in_order() {
    let server = MockServer::start().await;
    mount_ipify(&server, OWN_V4, OWN_V4).await;
    mount_ipapi(&server, OWN_V4, "Newark").await;
    mount_ipinfo(&server, OWN_V4, "New York").await;
    mount_ip_api(&server, None, OWN_V4, "Secaucus").await;

    let aggregator = init_aggregator(&config_for(None), &endpoints(&server), None).unwrap();
    let outcome = aggregator.aggregate(None, Family::Ipv4).await;

    assert_eq!(sources(&outcome), vec!["ipapi.co", "ipinfo.io", "ip-api.com"]);
    let cities: Vec<_> = outcome.records().iter().map(|r| r.city()).collect();
    assert_eq!(cities, vec![Some("Newark"), Some("New York"), Some("Secaucus")]);
    assert!(outcome.records().iter().all(|r| r.ip() == OWN_V4));
    assert!(outcome
        .records()
        .iter()
        .all(|r| r.country_name() == Some("United States")));
    assert!(outcome.failures().is_empty());
}

#[tokio::test]
async fn test_explicit_ip_skips_self_only_provider() {
    let server = MockServer::start().await;
    mount_ipapi(&server, "8.8.8.8", "Mountain View").await;
    mount_ip_api(&server, Some("8.8.8.8"), "8.8.8.8", "Ashburn").await;

    let aggregator = init_aggregator(&config_for(None), &endpoints(&server), None).unwrap();
    let outcome = aggregator.aggregate(Some("8.8.8.8"), Family::Ipv4).await;

    assert_eq!(sources(&outcome), vec!["ipapi.co", "ip-api.com"]);
    assert_eq!(outcome.failures().len(), 1);
    assert_eq!(outcome.failures()[0].provider, "ipinfo.io");
    assert_eq!(outcome.failures()[0].kind, FailureKind::Unsupported);
}

#[tokio::test]
async fn test_ipv6_lookup_on_ipv4_only_network_is_empty() {
    let server = MockServer::start().await;
    // api64.ipify.org answers with an IPv4 address when there is no IPv6 route
    mount_ipify(&server, OWN_V4, OWN_V4).await;
    mount_ipinfo(&server, OWN_V4, "New York").await;

    let aggregator = init_aggregator(&config_for(None), &endpoints(&server), None).unwrap();
    let outcome = aggregator.aggregate(None, Family::Ipv6).await;

    assert!(outcome.is_empty());
    // ip-api.com has no IPv6 support and is not invoked at all
    assert_eq!(outcome.failures().len(), 2);
    assert!(outcome
        .failures()
        .iter()
        .all(|f| f.kind == FailureKind::FamilyMismatch));
}

#[tokio::test]
async fn test_all_providers_failing() {
    // nothing mounted: every request gets a 404
    let server = MockServer::start().await;

    let aggregator = init_aggregator(&config_for(None), &endpoints(&server), None).unwrap();
    let outcome = aggregator.aggregate(Some("8.8.8.8"), Family::Ipv4).await;

    assert!(outcome.is_empty());
    assert_eq!(outcome.failures().len(), 3);
    let kinds: Vec<_> = outcome.failures().iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FailureKind::UpstreamError,
            FailureKind::Unsupported,
            FailureKind::UpstreamError
        ]
    );
}

#[tokio::test]
async fn test_one_slow_provider_times_out() {
    let server = MockServer::start().await;
    mount_ipify(&server, OWN_V4, OWN_V4).await;
    mount_ipapi(&server, OWN_V4, "Newark").await;
    mount_delayed(
        &server,
        "/ipinfo/json",
        serde_json::json!({ "ip": OWN_V4 }),
        Duration::from_secs(4),
    )
    .await;
    mount_ip_api(&server, None, OWN_V4, "Secaucus").await;

    let aggregator = init_aggregator(&config_for(None), &endpoints(&server), None).unwrap();
    let outcome = aggregator.aggregate(None, Family::Ipv4).await;

    assert_eq!(sources(&outcome), vec!["ipapi.co", "ip-api.com"]);
    assert_eq!(outcome.failures().len(), 1);
    assert_eq!(outcome.failures()[0].provider, "ipinfo.io");
    assert_eq!(outcome.failures()[0].kind, FailureKind::Timeout);
}

#[tokio::test]
async fn test_run_lookup_is_idempotent() {
    let server = MockServer::start().await;
    mount_ipapi(&server, "9.9.9.9", "Berkeley").await;
    mount_ip_api(&server, Some("9.9.9.9"), "9.9.9.9", "Zurich").await;

    let config = ipgeo::Config {
        family: FamilySelector::Both,
        ..config_for(Some("9.9.9.9"))
    };
    let first = run_lookup_with(&config, &endpoints(&server)).await.unwrap();
    let second = run_lookup_with(&config, &endpoints(&server)).await.unwrap();

    assert_eq!(first.outcomes, second.outcomes);
    assert_eq!(first.outcomes.len(), 2);
    assert_eq!(first.outcomes[0].family(), Family::Ipv4);
    assert_eq!(first.outcomes[1].family(), Family::Ipv6);
    // an IPv4 literal never yields IPv6 records
    assert!(first.outcomes[1].is_empty());
    assert!(!first.is_empty());
    assert_eq!(first.target.as_deref(), Some("9.9.9.9"));
}

#[tokio::test]
async fn test_run_lookup_single_family() {
    let server = MockServer::start().await;
    mount_ipapi(&server, "9.9.9.9", "Berkeley").await;

    let config = ipgeo::Config {
        family: FamilySelector::Ipv4,
        ..config_for(Some("9.9.9.9"))
    };
    let report = run_lookup_with(&config, &endpoints(&server)).await.unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.records().count(), 1);
    assert!(report.exported.is_none());
}

#[tokio::test]
async fn test_run_lookup_empty_report() {
    let server = MockServer::start().await;

    let report = run_lookup_with(&config_for(Some("9.9.9.9")), &endpoints(&server))
        .await
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.records().count(), 0);
}

#[tokio::test]
async fn test_target_with_path_segments_reaches_no_other_address() {
    let server = MockServer::start().await;
    mount_ipapi(&server, "9.9.9.9", "Berkeley").await;
    mount_ip_api(&server, Some("9.9.9.9"), "9.9.9.9", "Zurich").await;

    let cache = Arc::new(LookupCache::new());
    let aggregator =
        init_aggregator(&config_for(None), &endpoints(&server), Some(Arc::clone(&cache))).unwrap();
    let outcome = aggregator
        .aggregate(Some("1.1.1.1/../9.9.9.9"), Family::Ipv4)
        .await;

    assert!(outcome.is_empty());
    assert_eq!(outcome.target(), Some("1.1.1.1/../9.9.9.9"));
    assert!(cache.is_empty());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| !r.url.path().contains("/9.9.9.9/")));
}
