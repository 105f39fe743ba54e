//! `/get-prices`: product prices per subscription duration

use nlmarket_common::utils::integral;
use serde::{Deserialize, Serialize};

use super::{Endpoint, MarketRequest, Operation};
use crate::types::{Product, RequestId};

/// Retrieves current prices for a product.
#[derive(Debug, Clone, Copy)]
pub struct GetPrices;

impl Operation for GetPrices {
    const ENDPOINT: Endpoint = Endpoint::GetPrices;
    type Request = GetPricesRequest;
    type Response = PriceList;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetPricesRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
    pub product: Product,
}

impl GetPricesRequest {
    pub fn new(product: Product) -> Self {
        Self { request_id: None, product }
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for GetPricesRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }
}

/// Price of one duration bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Number of items included
    #[serde(deserialize_with = "integral::deserialize")]
    pub cnt: i64,
    pub eur: f64,
    pub rub: f64,
}

/// Prices keyed by subscription length in days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceMap {
    #[serde(rename = "30")]
    pub days_30: PriceEntry,
    #[serde(rename = "90")]
    pub days_90: PriceEntry,
    #[serde(rename = "180")]
    pub days_180: PriceEntry,
    #[serde(rename = "365")]
    pub days_365: PriceEntry,
}

impl PriceMap {
    /// Supported durations, in days.
    pub const DURATIONS: [u16; 4] = [30, 90, 180, 365];

    /// Entry for a duration in days, if the API prices it
    pub fn get(&self, days: u16) -> Option<&PriceEntry> {
        match days {
            30 => Some(&self.days_30),
            90 => Some(&self.days_90),
            180 => Some(&self.days_180),
            365 => Some(&self.days_365),
            _ => None,
        }
    }

    /// `(days, entry)` pairs in ascending duration order
    pub fn iter(&self) -> impl Iterator<Item = (u16, &PriceEntry)> + '_ {
        Self::DURATIONS.into_iter().filter_map(move |days| self.get(days).map(|e| (days, e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceList {
    pub prices: PriceMap,
}
