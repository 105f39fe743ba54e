//! `/get-balance`: current balance of the authenticated user

use serde::{Deserialize, Serialize};

use super::{Endpoint, MarketRequest, Operation};
use crate::types::RequestId;

/// Retrieves the current balance of the authenticated user.
#[derive(Debug, Clone, Copy)]
pub struct GetBalance;

impl Operation for GetBalance {
    const ENDPOINT: Endpoint = Endpoint::GetBalance;
    type Request = GetBalanceRequest;
    type Response = Balance;
}

/// No fields besides the optional request id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetBalanceRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
}

impl GetBalanceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for GetBalanceRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Balance in NLE units
    pub balance: f64,
}
