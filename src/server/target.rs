//! Lookup target resolution for API requests.

use axum::http::HeaderMap;

use crate::config::HEADER_X_FORWARDED_FOR;

/// Picks the address a request asks about.
///
/// An explicit `?ip=` wins. Otherwise the first `X-Forwarded-For` entry (the
/// original client behind a proxy) is used. `None` means the server's own
/// public address.
pub fn resolve_target(query_ip: Option<&str>, headers: &HeaderMap) -> Option<String> {
    if let Some(ip) = query_ip.map(str::trim).filter(|ip| !ip.is_empty()) {
        return Some(ip.to_string());
    }
    first_forwarded_for(headers)
}

/// First non-empty entry of `X-Forwarded-For`, if any.
pub fn first_forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get(HEADER_X_FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|entry| !entry.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn forwarded(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_X_FORWARDED_FOR, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_query_parameter_wins() {
        let headers = forwarded("203.0.113.5");
        assert_eq!(
            resolve_target(Some("8.8.8.8"), &headers),
            Some("8.8.8.8".to_string())
        );
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let headers = forwarded("203.0.113.5, 10.0.0.1, 10.0.0.2");
        assert_eq!(resolve_target(None, &headers), Some("203.0.113.5".to_string()));
    }

    #[test]
    fn test_blank_query_falls_back_to_header() {
        let headers = forwarded(" , 2001:db8::5");
        assert_eq!(
            resolve_target(Some("  "), &headers),
            Some("2001:db8::5".to_string())
        );
    }

    #[test]
    fn test_nothing_means_self() {
        assert_eq!(resolve_target(None, &HeaderMap::new()), None);
        assert_eq!(resolve_target(None, &forwarded("")), None);
    }
}
