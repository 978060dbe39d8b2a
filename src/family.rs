//! IP address family classification.
//!
//! Classification is purely syntactic: a literal containing a colon is IPv6,
//! anything else is IPv4. No parsing or validation is attempted, so the
//! function is total over arbitrary input.

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter as EnumIterMacro;

/// Address family of an IP literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIterMacro)]
pub enum Family {
    #[serde(rename = "IPv4")]
    Ipv4,
    #[serde(rename = "IPv6")]
    Ipv6,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Ipv4 => "IPv4",
            Family::Ipv6 => "IPv6",
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an IP literal by syntax alone.
///
/// Malformed input is not rejected: `"not an ip"` is IPv4, `"::"` is IPv6.
pub fn classify(ip: &str) -> Family {
    if ip.contains(':') {
        Family::Ipv6
    } else {
        Family::Ipv4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classify_ipv4_literals() {
        for ip in ["8.8.8.8", "192.168.1.1", "0.0.0.0", "255.255.255.255"] {
            assert_eq!(classify(ip), Family::Ipv4, "{} should be IPv4", ip);
        }
    }

    #[test]
    fn test_classify_ipv6_literals() {
        for ip in [
            "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
            "2001:db8::1",
            "::1",
            "::ffff:192.168.1.1",
            "fe80::1%eth0",
        ] {
            assert_eq!(classify(ip), Family::Ipv6, "{} should be IPv6", ip);
        }
    }

    #[test]
    fn test_classify_is_total_on_malformed_input() {
        assert_eq!(classify(""), Family::Ipv4);
        assert_eq!(classify("   "), Family::Ipv4);
        assert_eq!(classify("not.an.ip"), Family::Ipv4);
        assert_eq!(classify("999.999.999.999"), Family::Ipv4);
        assert_eq!(classify(":"), Family::Ipv6);
        assert_eq!(classify("garbage:with:colons"), Family::Ipv6);
        assert_eq!(classify(&"A".repeat(10_000)), Family::Ipv4);
    }

    #[test]
    fn test_family_display_and_serde() {
        assert_eq!(Family::Ipv4.to_string(), "IPv4");
        assert_eq!(Family::Ipv6.to_string(), "IPv6");
        assert_eq!(serde_json::to_string(&Family::Ipv6).unwrap(), "\"IPv6\"");
        let parsed: Family = serde_json::from_str("\"IPv4\"").unwrap();
        assert_eq!(parsed, Family::Ipv4);
    }

    #[test]
    fn test_family_iter_order() {
        let families: Vec<Family> = Family::iter().collect();
        assert_eq!(families, vec![Family::Ipv4, Family::Ipv6]);
    }
}
