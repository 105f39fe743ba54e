//! `/gift-product`: gift a product subscription to another user

use nlmarket_common::validation::Validator;
use serde::{Deserialize, Serialize};

use super::{validate_username, Endpoint, MarketRequest, Operation};
use crate::constants::MAX_GIFT_COUNT;
use crate::types::{Acknowledged, Product, RequestId};

/// Gifts a product to another market user.
#[derive(Debug, Clone, Copy)]
pub struct GiftProduct;

impl Operation for GiftProduct {
    const ENDPOINT: Endpoint = Endpoint::GiftProduct;
    type Request = GiftProductRequest;
    type Response = Acknowledged;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GiftProductRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
    pub username: String,
    pub product: Product,
    /// Number of items, 0 to 3
    pub cnt: u8,
}

impl GiftProductRequest {
    pub fn new(username: impl Into<String>, product: Product, cnt: u8) -> Self {
        Self { request_id: None, username: username.into(), product, cnt }
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for GiftProductRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    fn validate_fields(&self, validator: &mut Validator) {
        validate_username(validator, &self.username);
        validator.validate_range("cnt", self.cnt, 0, MAX_GIFT_COUNT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_zero_through_three_are_allowed() {
        for cnt in 0..=3 {
            assert!(GiftProductRequest::new("friend", Product::Cs2, cnt).validate().is_ok());
        }
    }

    #[test]
    fn count_above_three_is_rejected() {
        let err = GiftProductRequest::new("friend", Product::Csgo, 4)
            .validate()
            .expect_err("cnt out of range");
        assert_eq!(err.field_errors("cnt")[0].message, "must be between 0 and 3");
    }

    #[test]
    fn invalid_request_id_is_reported() {
        let err = GiftProductRequest::new("friend", Product::Cs2, 1)
            .with_request_id("no spaces allowed")
            .validate()
            .expect_err("bad request id");
        assert_eq!(err.field_errors("requestId").len(), 1);
    }
}
