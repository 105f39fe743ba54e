use std::io;
use std::time::Duration;

use async_trait::async_trait;
use nlmarket_domain::constants::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_MS};
use nlmarket_domain::{BoxError, ClientConfig, MarketError, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::Transport;
use crate::errors::InfraError;

const DEFAULT_USER_AGENT: &str = concat!("nlmarket/", env!("CARGO_PKG_VERSION"));

/// HTTP client with a per-attempt timeout and a bounded retry budget.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
    max_retries: u32,
}

enum AttemptError {
    Status(StatusCode),
    Transport(reqwest::Error),
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Client using the timeout and retry budget of `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::builder().timeout(config.timeout).max_retries(config.max_retries).build()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// POST `body` as JSON with up to `max_retries + 1` attempts.
    ///
    /// # Errors
    /// - `Http` on the first non-2xx status; never retried
    /// - `Network` once every attempt timed out or failed in transport; the
    ///   last cause is kept as `source()` (an `io::ErrorKind::TimedOut` error
    ///   for timeouts)
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        let attempts = self.max_retries.saturating_add(1);
        let mut last_cause: Option<BoxError> = None;

        for attempt in 1..=attempts {
            debug!(attempt, method = "POST", %url, "sending HTTP request");

            match tokio::time::timeout(self.timeout, self.attempt(attempt, url, body)).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(AttemptError::Status(status))) => {
                    return Err(InfraError::status(status, url).into());
                }
                Ok(Err(AttemptError::Transport(err))) => {
                    debug!(attempt, method = "POST", %url, error = %err, "HTTP request failed");
                    last_cause = Some(Box::new(err));
                }
                Err(_) => {
                    debug!(
                        attempt,
                        method = "POST",
                        %url,
                        timeout = ?self.timeout,
                        "HTTP request timed out"
                    );
                    last_cause = Some(Box::new(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("request timed out after {}ms", self.timeout.as_millis()),
                    )));
                }
            }
        }

        Err(InfraError::network(url, last_cause).into())
    }

    async fn attempt(
        &self,
        attempt: u32,
        url: &str,
        body: &Value,
    ) -> std::result::Result<Value, AttemptError> {
        let response =
            self.client.post(url).json(body).send().await.map_err(AttemptError::Transport)?;

        let status = response.status();
        debug!(attempt, method = "POST", %url, %status, "received HTTP response");
        if !status.is_success() {
            return Err(AttemptError::Status(status));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("json"));

        if is_json {
            response.json::<Value>().await.map_err(AttemptError::Transport)
        } else {
            response.text().await.map(Value::String).map_err(AttemptError::Transport)
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        HttpClient::post_json(self, url, body).await
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_retries: u32,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: None,
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    /// Upper bound for a single attempt.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attempts after the first one.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let agent = self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let mut builder = ReqwestClient::builder().user_agent(agent).no_proxy();

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| MarketError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, timeout: self.timeout, max_retries: self.max_retries })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use nlmarket_domain::ErrorKind;
    use reqwest::header::HeaderValue;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(timeout_ms: u64, max_retries: u32) -> HttpClient {
        HttpClient::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .max_retries(max_retries)
            .build()
            .expect("http client")
    }

    #[tokio::test]
    async fn decodes_json_body_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get-balance"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "user_id": "demo" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "balance": 42 })))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/get-balance", server.uri());
        let value = client(1_000, 1).post_json(&url, &json!({ "user_id": "demo" })).await;

        assert_eq!(value.expect("json body"), json!({ "balance": 42 }));
    }

    #[tokio::test]
    async fn returns_text_for_non_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let value = client(1_000, 0).post_json(&server.uri(), &json!({})).await;
        assert_eq!(value.expect("text body"), Value::String("maintenance".into()));
    }

    #[tokio::test]
    async fn does_not_retry_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/transfer-money", server.uri());
        let err = client(1_000, 3).post_json(&url, &json!({})).await.expect_err("500");

        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.message(), format!("HTTP 500 on {url}"));
        assert_eq!(server.received_requests().await.expect("recording").len(), 1);
    }

    #[tokio::test]
    async fn retries_after_timeout_then_succeeds() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("POST"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                let current = attempts_clone.fetch_add(1, Ordering::SeqCst);
                let response = ResponseTemplate::new(200).set_body_json(json!({ "ok": true }));
                if current == 0 {
                    response.set_delay(Duration::from_millis(500))
                } else {
                    response
                }
            })
            .mount(&server)
            .await;

        let value = client(100, 1).post_json(&server.uri(), &json!({})).await;

        assert_eq!(value.expect("second attempt"), json!({ "ok": true }));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn exhausted_timeouts_surface_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let err = client(50, 1).post_json(&server.uri(), &json!({})).await.expect_err("timeout");

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), format!("Network error on {}", server.uri()));
        let cause = err
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .expect("io cause");
        assert_eq!(cause.kind(), io::ErrorKind::TimedOut);
        assert_eq!(server.received_requests().await.expect("recording").len(), 2);
    }

    #[tokio::test]
    async fn connection_refused_surfaces_as_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = format!("http://{}", addr);

        let err = client(1_000, 1).post_json(&url, &json!({})).await.expect_err("refused");

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), format!("Network error on {url}"));
        assert!(err.source().is_some_and(|source| source.is::<reqwest::Error>()));
    }

    #[tokio::test]
    async fn sends_default_headers_and_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("x-reseller", "demo"))
            .and(header("user-agent", "nlmarket-tests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("x-reseller", HeaderValue::from_static("demo"));
        let client = HttpClient::builder()
            .user_agent("nlmarket-tests")
            .default_headers(headers)
            .build()
            .expect("http client");

        assert!(client.post_json(&server.uri(), &json!({})).await.is_ok());
    }

    #[test]
    fn from_config_copies_timeout_and_retries() {
        use nlmarket_domain::Credentials;

        let config = ClientConfig::new(Credentials::new("demo", "secret"))
            .with_timeout(Duration::from_millis(2_500))
            .with_max_retries(4);
        let client = HttpClient::from_config(&config).expect("http client");

        assert_eq!(client.timeout(), Duration::from_millis(2_500));
        assert_eq!(client.max_retries(), 4);
    }
}
