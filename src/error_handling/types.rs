//! Error type definitions.
//!
//! This module defines the adapter-local provider errors, the failure kinds used
//! for reporting and statistics, and initialization errors.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::family::Family;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Why a single provider contributed nothing to an aggregation.
///
/// Every variant is local to one adapter call. None of them fail the
/// aggregation as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No response within the adapter's deadline.
    #[error("provider did not respond before the deadline")]
    Timeout,

    /// Connection-level failure (DNS, TLS, refused connection).
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered but signaled failure, either through the HTTP
    /// status or an in-body flag. `status` carries the raw value.
    #[error("upstream error: {status}")]
    Upstream { status: String },

    /// The body did not match the provider's schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider does not offer the requested operation.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// The provider answered with an address of the other family.
    #[error("family mismatch: expected {expected}, provider returned {actual} address {ip}")]
    FamilyMismatch {
        expected: Family,
        actual: Family,
        ip: String,
    },
}

impl ProviderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::Timeout => FailureKind::Timeout,
            ProviderError::Transport(_) => FailureKind::TransportError,
            ProviderError::Upstream { .. } => FailureKind::UpstreamError,
            ProviderError::Parse(_) => FailureKind::ParseError,
            ProviderError::Unsupported(_) => FailureKind::Unsupported,
            ProviderError::FamilyMismatch { .. } => FailureKind::FamilyMismatch,
        }
    }
}

/// Category of a provider failure, used in failure descriptors and statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIterMacro)]
pub enum FailureKind {
    Timeout,
    TransportError,
    UpstreamError,
    ParseError,
    Unsupported,
    FamilyMismatch,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "Timeout",
            FailureKind::TransportError => "Transport error",
            FailureKind::UpstreamError => "Upstream error",
            FailureKind::ParseError => "Parse error",
            FailureKind::Unsupported => "Unsupported",
            FailureKind::FamilyMismatch => "Family mismatch",
        }
    }
}

/// Failure descriptor returned alongside an aggregation's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderFailure {
    pub provider: String,
    pub family: Family,
    pub kind: FailureKind,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(provider: &str, family: Family, error: &ProviderError) -> Self {
        Self {
            provider: provider.to_string(),
            family,
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
