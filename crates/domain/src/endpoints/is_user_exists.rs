//! `/is-user-exists`

use nlmarket_common::validation::Validator;
use serde::{Deserialize, Serialize};

use super::{validate_username, Endpoint, MarketRequest, Operation};
use crate::types::RequestId;

/// Checks whether a user exists.
#[derive(Debug, Clone, Copy)]
pub struct IsUserExists;

impl Operation for IsUserExists {
    const ENDPOINT: Endpoint = Endpoint::IsUserExists;
    type Request = IsUserExistsRequest;
    type Response = UserExists;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IsUserExistsRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
    pub username: String,
}

impl IsUserExistsRequest {
    pub fn new(username: impl Into<String>) -> Self {
        Self { request_id: None, username: username.into() }
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for IsUserExistsRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    fn validate_fields(&self, validator: &mut Validator) {
        validate_username(validator, &self.username);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserExists {
    pub user_exists: bool,
}
