//! `/set-reseller-prices`: publish reseller prices shown on the market
//!
//! Prices are grouped in slots (`cs2-30`, ..., `marketplace`). Each slot maps
//! up to three currency codes to either a fixed decimal string (`"14.10"`) or
//! an ascending `["10.00", "20.00"]` range.

use std::collections::BTreeMap;

use nlmarket_common::validation::{PatternValidator, Validator};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Endpoint, MarketRequest, Operation};
use crate::constants::MAX_CURRENCIES_PER_SLOT;
use crate::types::{Acknowledged, RequestId};

static DECIMAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+$").expect("DECIMAL_PATTERN should compile - this is a bug")
});

static CURRENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{3}$").expect("CURRENCY_PATTERN should compile - this is a bug")
});

/// Sets the reseller prices displayed on the market.
#[derive(Debug, Clone, Copy)]
pub struct SetResellerPrices;

impl Operation for SetResellerPrices {
    const ENDPOINT: Endpoint = Endpoint::SetResellerPrices;
    type Request = SetResellerPricesRequest;
    type Response = Acknowledged;
}

/// Fixed price or an ascending `[low, high]` range, as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Fixed(String),
    Range(String, String),
}

impl PriceValue {
    pub fn fixed(price: impl Into<String>) -> Self {
        Self::Fixed(price.into())
    }

    pub fn range(low: impl Into<String>, high: impl Into<String>) -> Self {
        Self::Range(low.into(), high.into())
    }

    fn validate_into(&self, validator: &mut Validator, field: &str) {
        match self {
            Self::Fixed(price) => {
                let rule = PatternValidator::new(
                    DECIMAL_PATTERN.clone(),
                    "Must be a decimal string, e.g. '14.10'",
                );
                validator.validate_field(field, price.as_str(), &rule);
            }
            Self::Range(low, high) => {
                let low_ok = DECIMAL_PATTERN.is_match(low);
                let high_ok = DECIMAL_PATTERN.is_match(high);
                if !low_ok {
                    validator.add_error(field, "First element of range must be decimal string");
                }
                if !high_ok {
                    validator.add_error(field, "Second element of range must be decimal string");
                }
                if low_ok && high_ok && !is_ascending(low, high) {
                    validator.add_error(field, "Range must be in ascending order");
                }
            }
        }
    }
}

fn is_ascending(low: &str, high: &str) -> bool {
    match (low.parse::<f64>(), high.parse::<f64>()) {
        (Ok(low), Ok(high)) => low < high,
        _ => false,
    }
}

/// Currency code (`EUR`, `USD`, ...) to price.
pub type CurrencyMap = BTreeMap<String, PriceValue>;

/// Price slots; absent slots are left untouched by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResellerPrices {
    #[serde(rename = "cs2-30", default, skip_serializing_if = "Option::is_none")]
    pub cs2_30: Option<CurrencyMap>,
    #[serde(rename = "cs2-90", default, skip_serializing_if = "Option::is_none")]
    pub cs2_90: Option<CurrencyMap>,
    #[serde(rename = "cs2-180", default, skip_serializing_if = "Option::is_none")]
    pub cs2_180: Option<CurrencyMap>,
    #[serde(rename = "cs2-365", default, skip_serializing_if = "Option::is_none")]
    pub cs2_365: Option<CurrencyMap>,
    #[serde(rename = "csgo-30", default, skip_serializing_if = "Option::is_none")]
    pub csgo_30: Option<CurrencyMap>,
    #[serde(rename = "csgo-90", default, skip_serializing_if = "Option::is_none")]
    pub csgo_90: Option<CurrencyMap>,
    #[serde(rename = "csgo-180", default, skip_serializing_if = "Option::is_none")]
    pub csgo_180: Option<CurrencyMap>,
    #[serde(rename = "csgo-365", default, skip_serializing_if = "Option::is_none")]
    pub csgo_365: Option<CurrencyMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace: Option<CurrencyMap>,
}

impl ResellerPrices {
    /// `(wire name, slot)` for every slot, set or not
    pub fn slots(&self) -> [(&'static str, Option<&CurrencyMap>); 9] {
        [
            ("cs2-30", self.cs2_30.as_ref()),
            ("cs2-90", self.cs2_90.as_ref()),
            ("cs2-180", self.cs2_180.as_ref()),
            ("cs2-365", self.cs2_365.as_ref()),
            ("csgo-30", self.csgo_30.as_ref()),
            ("csgo-90", self.csgo_90.as_ref()),
            ("csgo-180", self.csgo_180.as_ref()),
            ("csgo-365", self.csgo_365.as_ref()),
            ("marketplace", self.marketplace.as_ref()),
        ]
    }

    fn validate_into(&self, validator: &mut Validator) {
        for (slot, currencies) in self.slots() {
            let Some(currencies) = currencies else {
                continue;
            };

            validator.validate_nested(slot, |validator| {
                if currencies.len() > MAX_CURRENCIES_PER_SLOT {
                    validator.add_error("currencies", "At most three currencies per product");
                }

                let code_rule = PatternValidator::new(
                    CURRENCY_PATTERN.clone(),
                    "Currency code must be exactly 3 uppercase letters",
                );
                for (code, price) in currencies {
                    validator.validate_field(code, code.as_str(), &code_rule);
                    price.validate_into(validator, code);
                }
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetResellerPricesRequest {
    #[serde(rename = "requestId", default, skip_serializing)]
    pub request_id: Option<RequestId>,
    pub prices: ResellerPrices,
}

impl SetResellerPricesRequest {
    pub fn new(prices: ResellerPrices) -> Self {
        Self { request_id: None, prices }
    }

    pub fn with_request_id(mut self, id: impl Into<RequestId>) -> Self {
        self.request_id = Some(id.into());
        self
    }
}

impl MarketRequest for SetResellerPricesRequest {
    fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    fn validate_fields(&self, validator: &mut Validator) {
        validator.validate_nested("prices", |validator| self.prices.validate_into(validator));
    }
}
