//! `/integration-visibility`: make the reseller integration public or private

use serde::{Deserialize, Serialize};

use super::{Endpoint, MarketRequest, Operation};
use crate::types::{Acknowledged, RequestId};

/// Configures whether the reseller integration is public.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationVisibility;

impl Operation for IntegrationVisibility {
    const ENDPOINT: Endpoint = Endpoint::IntegrationVisibility;
    type Request = IntegrationVisibilityRequest;
    type Response = Acknowledged;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrationVisibilityRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
    /// `true` for public, `false` for private
    pub public: bool,
}

impl IntegrationVisibilityRequest {
    pub fn new(public: bool) -> Self {
        Self { request_id: None, public }
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for IntegrationVisibilityRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}
