//! Error categorization.
//!
//! Maps transport-level `reqwest` failures onto the provider error taxonomy.

use super::types::ProviderError;

/// Categorizes a `reqwest::Error` into a `ProviderError`.
///
/// Status errors keep the raw HTTP status so diagnostics show exactly what the
/// provider answered. Timeouts are checked before connect errors because a
/// connect timeout reports both.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ProviderError {
    if let Some(status) = error.status() {
        return ProviderError::Upstream {
            status: format!("HTTP {}", status.as_u16()),
        };
    }

    if error.is_timeout() {
        ProviderError::Timeout
    } else if error.is_decode() {
        ProviderError::Parse(error.to_string())
    } else if error.is_builder() {
        ProviderError::Transport(format!("invalid request: {}", error))
    } else {
        // connect, request, redirect and body errors all mean the exchange broke
        ProviderError::Transport(error.to_string())
    }
}
