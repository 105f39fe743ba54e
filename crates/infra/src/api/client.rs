//! Market API client
//!
//! Every call runs the same pipeline:
//! validate request → augment envelope (`id`, `user_id`, `integration_id`)
//! → sign → POST → decode the typed response.

use std::fmt;
use std::sync::Arc;

use nlmarket_common::{Signer, SIGNATURE_FIELD};
use nlmarket_domain::constants::{FIELD_ID, FIELD_INTEGRATION_ID, FIELD_USER_ID};
use nlmarket_domain::endpoints::{
    Balance, GetBalance, GetBalanceRequest, GetPrices, GetPricesRequest, GiftProduct,
    GiftProductRequest, IntegrationVisibility, IntegrationVisibilityRequest, Invitation,
    IsUserExists, IsUserExistsRequest, IsUserInvited, IsUserInvitedRequest, PriceList,
    SetResellerPrices, SetResellerPricesRequest, TransferMoney, TransferMoneyRequest, UserExists,
};
use nlmarket_domain::{
    Acknowledged, ApiResponse, ClientConfig, Endpoint, EndpointFlag, ErrorKind, MarketError,
    MarketRequest, Operation, Result,
};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use super::request_id::{RequestIdGenerator, UuidRequestIds};
use crate::http::{HttpClient, Transport};

/// Client for the Neverlose Market reseller API.
///
/// Cheap to clone; clones share the transport, signer and id generator.
#[derive(Clone)]
pub struct MarketClient {
    config: Arc<ClientConfig>,
    signer: Arc<Signer>,
    transport: Arc<dyn Transport>,
    request_ids: Arc<dyn RequestIdGenerator>,
}

impl fmt::Debug for MarketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarketClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl MarketClient {
    /// Client with the default HTTP transport and UUID request ids.
    ///
    /// # Errors
    /// `Configuration` if `config` fails [`ClientConfig::validate`] or the
    /// HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> MarketClientBuilder {
        MarketClientBuilder::default()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Move money to another user.
    pub async fn transfer_money(
        &self,
        request: &TransferMoneyRequest,
    ) -> Result<ApiResponse<Acknowledged>> {
        self.call::<TransferMoney>(request).await
    }

    /// Gift a product subscription to another user.
    pub async fn gift_product(
        &self,
        request: &GiftProductRequest,
    ) -> Result<ApiResponse<Acknowledged>> {
        self.call::<GiftProduct>(request).await
    }

    /// Current account balance.
    pub async fn get_balance(&self, request: &GetBalanceRequest) -> Result<ApiResponse<Balance>> {
        self.call::<GetBalance>(request).await
    }

    /// Price table of a product.
    pub async fn get_prices(&self, request: &GetPricesRequest) -> Result<ApiResponse<PriceList>> {
        self.call::<GetPrices>(request).await
    }

    pub async fn is_user_exists(
        &self,
        request: &IsUserExistsRequest,
    ) -> Result<ApiResponse<UserExists>> {
        self.call::<IsUserExists>(request).await
    }

    pub async fn is_user_invited(
        &self,
        request: &IsUserInvitedRequest,
    ) -> Result<ApiResponse<Invitation>> {
        self.call::<IsUserInvited>(request).await
    }

    /// Make the reseller integration public or private. Needs `integration_id`.
    pub async fn integration_visibility(
        &self,
        request: &IntegrationVisibilityRequest,
    ) -> Result<ApiResponse<Acknowledged>> {
        self.call::<IntegrationVisibility>(request).await
    }

    /// Publish reseller prices. Needs `integration_id`.
    pub async fn set_reseller_prices(
        &self,
        request: &SetResellerPricesRequest,
    ) -> Result<ApiResponse<Acknowledged>> {
        self.call::<SetResellerPrices>(request).await
    }

    /// Run one endpoint through the full request pipeline.
    ///
    /// # Errors
    /// - `Validation` if the request breaks its contract or the response does
    ///   not match the endpoint's shape
    /// - `Configuration` if the endpoint needs an `integration_id` and none is
    ///   configured; nothing is sent in that case
    /// - `Http` / `Network` from the transport, unchanged
    #[instrument(skip(self, request), fields(path = Op::ENDPOINT.path()))]
    pub async fn call<Op: Operation>(
        &self,
        request: &Op::Request,
    ) -> Result<ApiResponse<Op::Response>> {
        let path = Op::ENDPOINT.path();

        if let Err(errors) = request.validate() {
            warn!(errors = errors.error_count(), "request rejected before sending");
            return Err(MarketError::validation(
                format!("Invalid request payload for {path}"),
                errors,
            ));
        }

        let mut envelope = self.augment(Op::ENDPOINT, request)?;
        let signature = self.signer.sign(&envelope);
        envelope.insert(SIGNATURE_FIELD.to_string(), Value::String(signature));
        debug!(fields = envelope.len(), "request signed");

        let url = self.config.endpoint_url(path);
        let raw = self
            .transport
            .post_json(&url, &Value::Object(envelope))
            .await
            .inspect_err(|err| warn!(kind = %err.kind(), error = %err, "request failed"))?;

        let response = serde_json::from_value::<ApiResponse<Op::Response>>(raw).map_err(|err| {
            warn!(error = %err, "response did not match the endpoint contract");
            MarketError::validation(format!("Unexpected response format for {path}"), err)
        })?;

        if let ApiResponse::Failure(failure) = &response {
            debug!(error = %failure, "API reported failure");
        } else {
            debug!("request succeeded");
        }
        Ok(response)
    }

    fn augment<R: MarketRequest>(
        &self,
        endpoint: Endpoint,
        request: &R,
    ) -> Result<Map<String, Value>> {
        let path = endpoint.path();
        let credentials = &self.config.credentials;

        let integration_id = if endpoint.flags().contains(EndpointFlag::Integration) {
            let id = credentials.integration_id().ok_or_else(|| {
                warn!("integration_id missing for integration endpoint");
                MarketError::configuration(format!("Missing integration_id for {path}"))
            })?;
            Some(id)
        } else {
            None
        };

        let mut envelope = match serde_json::to_value(request) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(MarketError::new(
                    ErrorKind::Validation,
                    format!("Invalid request payload for {path}: expected an object, got {other}"),
                ));
            }
            Err(err) => {
                return Err(MarketError::validation(
                    format!("Invalid request payload for {path}"),
                    err,
                ));
            }
        };

        let id = request.request_id().cloned().unwrap_or_else(|| self.request_ids.next_id());
        envelope.insert(FIELD_ID.to_string(), Value::from(id));
        envelope.insert(FIELD_USER_ID.to_string(), Value::String(credentials.user_id.clone()));
        if let Some(integration_id) = integration_id {
            envelope.insert(FIELD_INTEGRATION_ID.to_string(), Value::from(integration_id));
        }

        Ok(envelope)
    }
}

/// Builder for [`MarketClient`].
#[derive(Default)]
pub struct MarketClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    request_ids: Option<Arc<dyn RequestIdGenerator>>,
}

impl MarketClientBuilder {
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default [`HttpClient`] transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the default UUID v4 request ids.
    pub fn request_ids(mut self, generator: Arc<dyn RequestIdGenerator>) -> Self {
        self.request_ids = Some(generator);
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// `Configuration` if no config was set, it fails validation, or the
    /// default transport cannot be built.
    pub fn build(self) -> Result<MarketClient> {
        let config =
            self.config.ok_or_else(|| MarketError::configuration("Client config not set"))?;
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpClient::from_config(&config)?),
        };
        let request_ids = self.request_ids.unwrap_or_else(|| Arc::new(UuidRequestIds));
        let signer = Signer::new(config.credentials.secret.clone());

        Ok(MarketClient {
            config: Arc::new(config),
            signer: Arc::new(signer),
            transport,
            request_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use nlmarket_domain::Credentials;
    use serde_json::json;

    use super::*;
    use crate::api::SequentialRequestIds;

    /// Transport double that records bodies and replays a canned response.
    struct RecordingTransport {
        response: Value,
        sent: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingTransport {
        fn replying(response: Value) -> Arc<Self> {
            Arc::new(Self { response, sent: Mutex::new(Vec::new()) })
        }

        fn sent(&self) -> Vec<(String, Value)> {
            self.sent.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
            self.sent.lock().expect("lock").push((url.to_string(), body.clone()));
            Ok(self.response.clone())
        }
    }

    fn client(credentials: Credentials, transport: Arc<RecordingTransport>) -> MarketClient {
        let config = ClientConfig::new(credentials).with_base_url("http://market.test/api");
        MarketClient::builder()
            .config(config)
            .transport(transport)
            .request_ids(Arc::new(SequentialRequestIds::new()))
            .build()
            .expect("client")
    }

    #[tokio::test]
    async fn envelope_carries_identity_and_signature() {
        let transport = RecordingTransport::replying(json!({ "success": true, "succ": true }));
        let client = client(Credentials::new("demo", "supersecret"), transport.clone());

        let response = client
            .transfer_money(&TransferMoneyRequest::new("someUser", 100))
            .await
            .expect("call");
        assert!(response.is_success());

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        let (url, body) = &sent[0];
        assert_eq!(url, "http://market.test/api/transfer-money");

        let fields = body.as_object().expect("object body");
        assert_eq!(fields["id"], json!(1));
        assert_eq!(fields["user_id"], json!("demo"));
        assert_eq!(fields["username"], json!("someUser"));
        assert_eq!(fields["amount"], json!(100));
        assert!(!fields.contains_key("integration_id"));
        assert!(!fields.contains_key("requestId"));
        assert!(Signer::new("supersecret").verify(fields));
    }

    #[tokio::test]
    async fn caller_request_id_wins_over_generator() {
        let transport =
            RecordingTransport::replying(json!({ "success": true, "succ": true, "balance": 3 }));
        let client = client(Credentials::new("demo", "s"), transport.clone());

        client
            .get_balance(&GetBalanceRequest::default().with_request_id("order-7"))
            .await
            .expect("call");

        assert_eq!(transport.sent()[0].1["id"], json!("order-7"));
    }

    #[tokio::test]
    async fn integration_endpoints_need_integration_id() {
        let transport = RecordingTransport::replying(json!({ "success": true, "succ": true }));
        let client = client(Credentials::new("demo", "s"), transport.clone());

        let err = client
            .integration_visibility(&IntegrationVisibilityRequest::new(true))
            .await
            .expect_err("missing integration id");

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.message().contains("/integration-visibility"));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn integration_id_is_injected_and_signed() {
        let transport = RecordingTransport::replying(json!({ "success": true, "succ": true }));
        let credentials = Credentials::new("demo", "s").with_integration_id(7);
        let client = client(credentials, transport.clone());

        client
            .integration_visibility(&IntegrationVisibilityRequest::new(false))
            .await
            .expect("call");

        let body = &transport.sent()[0].1;
        assert_eq!(body["integration_id"], json!(7));
        assert_eq!(body["public"], json!(false));
        assert!(Signer::new("s").verify(body.as_object().expect("object body")));
    }

    #[tokio::test]
    async fn invalid_request_is_rejected_before_sending() {
        let transport = RecordingTransport::replying(json!({ "success": true, "succ": true }));
        let client = client(Credentials::new("demo", "s"), transport.clone());

        let err = client
            .transfer_money(&TransferMoneyRequest::new("ab", 10))
            .await
            .expect_err("short username");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Invalid request payload for /transfer-money");
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn non_json_body_is_a_validation_error() {
        let transport = RecordingTransport::replying(Value::String("<html>".into()));
        let client = client(Credentials::new("demo", "s"), transport);

        let err = client.get_balance(&GetBalanceRequest::default()).await.expect_err("html");

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Unexpected response format for /get-balance");
    }

    #[test]
    fn build_requires_valid_config() {
        let missing = MarketClient::builder().build().expect_err("no config");
        assert_eq!(missing.kind(), ErrorKind::Configuration);

        let empty_secret = ClientConfig::new(Credentials::new("demo", ""));
        let err = MarketClient::new(empty_secret).expect_err("empty secret");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
