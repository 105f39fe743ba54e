//! Client configuration
//!
//! [`ClientConfig`] is plain data: the loader in `nlmarket-infra` fills it from
//! the environment or a JSON/TOML file, and the client calls
//! [`ClientConfig::validate`] before using it.
//!
//! File form (TOML):
//!
//! ```toml
//! user_id = "demo"
//! secret = "supersecret"
//! integration_id = 7        # optional, reseller endpoints only
//! base_url = "https://user-api.neverlose.cc/api/market"
//! timeout_ms = 10000
//! max_retries = 1
//! ```

use std::time::Duration;

use nlmarket_common::{duration_millis, SecretString};
use serde::Deserialize;
use url::Url;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS};
use crate::errors::{MarketError, Result};

/// Identity used to build and sign every request.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub user_id: String,
    pub secret: SecretString,
    #[serde(default)]
    integration_id: Option<u64>,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, secret: impl Into<SecretString>) -> Self {
        Self { user_id: user_id.into(), secret: secret.into(), integration_id: None }
    }

    pub fn with_integration_id(mut self, integration_id: u64) -> Self {
        self.integration_id = Some(integration_id);
        self
    }

    /// Reseller integration id; `0` counts as unset
    pub fn integration_id(&self) -> Option<u64> {
        self.integration_id.filter(|id| *id != 0)
    }
}

/// Everything a client instance needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(flatten)]
    pub credentials: Credentials,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout
    #[serde(rename = "timeout_ms", with = "duration_millis", default = "default_timeout")]
    pub timeout: Duration,

    /// Extra attempts after the first one
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_millis(DEFAULT_TIMEOUT_MS)
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: default_base_url(),
            timeout: default_timeout(),
            max_retries: default_max_retries(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Base URL without a trailing slash, ready to prefix endpoint paths
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Check the invariants the client relies on.
    ///
    /// # Errors
    /// `Configuration` if the user id or secret is empty, or the base URL is
    /// not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.user_id.trim().is_empty() {
            return Err(MarketError::configuration("user_id must not be empty"));
        }
        if self.credentials.secret.is_empty() {
            return Err(MarketError::configuration("secret must not be empty"));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            MarketError::configuration(format!("Invalid base_url {}: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MarketError::configuration(format!(
                "Unsupported base_url scheme: {}",
                url.scheme()
            )));
        }

        Ok(())
    }
}
