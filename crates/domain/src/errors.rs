//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed underlying cause carried by [`MarketError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of failure categories a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Transport-level failure after the retry budget was spent
    Network,
    /// Reserved for distinct timeout signaling; timeouts currently end as `Network`
    Timeout,
    /// Non-2xx HTTP status, never retried
    Http,
    /// The API answered with `success: false`
    Api,
    /// Request or response failed its contract
    Validation,
    /// Reserved for identifier-specific validation
    InvalidId,
    /// Required client setup is missing
    Configuration,
}

impl ErrorKind {
    /// Wire/code name (`NETWORK`, `HTTP`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "NETWORK",
            Self::Timeout => "TIMEOUT",
            Self::Http => "HTTP",
            Self::Api => "API",
            Self::Validation => "VALIDATION",
            Self::InvalidId => "INVALID_ID",
            Self::Configuration => "CONFIGURATION",
        }
    }

    /// Whether retrying the whole call later may succeed
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for market operations
#[derive(Debug, Error)]
#[error("{message}")]
pub struct MarketError {
    kind: ErrorKind,
    message: String,
    source: Option<BoxError>,
}

impl MarketError {
    /// Create an error without an underlying cause
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), source: None }
    }

    /// Create an error wrapping an underlying cause
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self { kind, message: message.into(), source: Some(source.into()) }
    }

    pub fn network(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::with_source(ErrorKind::Network, message, source)
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Http, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    pub fn validation(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::with_source(ErrorKind::Validation, message, source)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Failure category
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message naming the affected path or URL
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this error is of the given kind
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

/// Result type alias for market operations
pub type Result<T> = std::result::Result<T, MarketError>;
