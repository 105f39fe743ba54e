//! `/is-user-invited`: invitation status of a user for a product

use nlmarket_common::validation::Validator;
use serde::{Deserialize, Serialize};

use super::{validate_username, Endpoint, MarketRequest, Operation};
use crate::types::{Product, RequestId};

/// Checks whether a user was invited to a product.
#[derive(Debug, Clone, Copy)]
pub struct IsUserInvited;

impl Operation for IsUserInvited {
    const ENDPOINT: Endpoint = Endpoint::IsUserInvited;
    type Request = IsUserInvitedRequest;
    type Response = Invitation;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsUserInvitedRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
    pub username: String,
    pub product: Product,
}

impl IsUserInvitedRequest {
    pub fn new(username: impl Into<String>, product: Product) -> Self {
        Self { request_id: None, username: username.into(), product }
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for IsUserInvitedRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    fn validate_fields(&self, validator: &mut Validator) {
        validate_username(validator, &self.username);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Whether the product is publicly available
    pub cheat_public: bool,
    pub user_invited: bool,
}
