//! `/transfer-money`: send balance to another user

use nlmarket_common::validation::Validator;
use serde::{Deserialize, Serialize};

use super::{validate_username, Endpoint, MarketRequest, Operation};
use crate::types::{Acknowledged, RequestId};

/// Transfers money to another market user.
#[derive(Debug, Clone, Copy)]
pub struct TransferMoney;

impl Operation for TransferMoney {
    const ENDPOINT: Endpoint = Endpoint::TransferMoney;
    type Request = TransferMoneyRequest;
    type Response = Acknowledged;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransferMoneyRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
    /// Recipient, at least 3 characters
    pub username: String,
    /// Positive amount
    pub amount: u64,
}

impl TransferMoneyRequest {
    pub fn new(username: impl Into<String>, amount: u64) -> Self {
        Self { request_id: None, username: username.into(), amount }
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for TransferMoneyRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    fn validate_fields(&self, validator: &mut Validator) {
        validate_username(validator, &self.username);
        validator.validate_min("amount", self.amount, 1);
    }
}
