//! HTTP transport

mod client;

use async_trait::async_trait;
use nlmarket_domain::Result;
use serde_json::Value;

pub use client::{HttpClient, HttpClientBuilder};

/// One-shot JSON POST exchange used by the market client.
///
/// Implementations own timeout/retry policy and report failures as
/// `Http` (non-2xx, never retried) or `Network` (retry budget spent).
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` and return the decoded body: JSON when the
    /// response declares a JSON content type, otherwise the raw text as
    /// `Value::String`.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value>;
}
