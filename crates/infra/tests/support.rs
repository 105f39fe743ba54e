#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use nlmarket_domain::{ClientConfig, Credentials};
use nlmarket_infra::{MarketClient, SequentialRequestIds};
use serde_json::{Map, Value};
use wiremock::MockServer;

pub const USER_ID: &str = "demo";
pub const SECRET: &str = "supersecret";

static TRACING: Once = Once::new();

/// Route client logs to the test harness output (`RUST_LOG=debug` to see them).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Config pointed at `server` with a short timeout.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(Credentials::new(USER_ID, SECRET))
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(500))
}

/// Client against `server` using the default HTTP transport.
pub fn client_for(server: &MockServer) -> MarketClient {
    init_tracing();
    client_with(config_for(server))
}

pub fn client_with(config: ClientConfig) -> MarketClient {
    MarketClient::builder()
        .config(config)
        .request_ids(Arc::new(SequentialRequestIds::with_prefix("test-")))
        .build()
        .expect("client should build")
}

/// JSON body of the `index`-th request the server received.
pub async fn received_body(server: &MockServer, index: usize) -> Map<String, Value> {
    let requests = server.received_requests().await.expect("request recording enabled");
    let request = requests.get(index).expect("request was sent");
    serde_json::from_slice::<Value>(&request.body)
        .expect("request body is JSON")
        .as_object()
        .cloned()
        .expect("request body is an object")
}
