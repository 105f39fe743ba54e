//! Endpoint catalogue
//!
//! Every remote operation is one variant of [`Endpoint`] (path + capability
//! flags) and one marker type implementing [`Operation`], which ties the
//! endpoint to its strongly-typed request and success payload.
//!
//! | Operation | Path | Flags |
//! |-----------|------|-------|
//! | [`TransferMoney`] | `/transfer-money` | – |
//! | [`GiftProduct`] | `/gift-product` | – |
//! | [`GetBalance`] | `/get-balance` | – |
//! | [`GetPrices`] | `/get-prices` | – |
//! | [`IsUserExists`] | `/is-user-exists` | – |
//! | [`IsUserInvited`] | `/is-user-invited` | – |
//! | [`IntegrationVisibility`] | `/integration-visibility` | `Integration` |
//! | [`SetResellerPrices`] | `/set-reseller-prices` | `Integration` |

pub mod get_balance;
pub mod get_prices;
pub mod gift_product;
pub mod integration_visibility;
pub mod is_user_exists;
pub mod is_user_invited;
pub mod set_reseller_prices;
pub mod transfer_money;

use std::fmt;

use nlmarket_common::validation::{StringValidator, ValidationResult, Validator};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use get_balance::{Balance, GetBalance, GetBalanceRequest};
pub use get_prices::{GetPrices, GetPricesRequest, PriceEntry, PriceList, PriceMap};
pub use gift_product::{GiftProduct, GiftProductRequest};
pub use integration_visibility::{IntegrationVisibility, IntegrationVisibilityRequest};
pub use is_user_exists::{IsUserExists, IsUserExistsRequest, UserExists};
pub use is_user_invited::{Invitation, IsUserInvited, IsUserInvitedRequest};
pub use set_reseller_prices::{
    CurrencyMap, PriceValue, ResellerPrices, SetResellerPrices, SetResellerPricesRequest,
};
pub use transfer_money::{TransferMoney, TransferMoneyRequest};

use crate::constants::MIN_USERNAME_LENGTH;
use crate::flags::{EndpointFlag, FlagSet};
use crate::types::RequestId;

const NO_FLAGS: FlagSet = FlagSet::new();
const INTEGRATION: FlagSet = FlagSet::from_flags(&[EndpointFlag::Integration]);

/// Every remote operation the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    TransferMoney,
    GiftProduct,
    GetBalance,
    GetPrices,
    IsUserExists,
    IsUserInvited,
    IntegrationVisibility,
    SetResellerPrices,
}

/// Immutable routing metadata for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointDescriptor {
    pub path: &'static str,
    pub flags: FlagSet,
}

impl EndpointDescriptor {
    /// Whether the endpoint declares `flag`
    pub const fn requires(&self, flag: EndpointFlag) -> bool {
        self.flags.contains(flag)
    }
}

impl Endpoint {
    /// All endpoints, in catalogue order.
    pub const ALL: [Endpoint; 8] = [
        Endpoint::TransferMoney,
        Endpoint::GiftProduct,
        Endpoint::GetBalance,
        Endpoint::GetPrices,
        Endpoint::IsUserExists,
        Endpoint::IsUserInvited,
        Endpoint::IntegrationVisibility,
        Endpoint::SetResellerPrices,
    ];

    pub const fn descriptor(self) -> EndpointDescriptor {
        let (path, flags) = match self {
            Self::TransferMoney => ("/transfer-money", NO_FLAGS),
            Self::GiftProduct => ("/gift-product", NO_FLAGS),
            Self::GetBalance => ("/get-balance", NO_FLAGS),
            Self::GetPrices => ("/get-prices", NO_FLAGS),
            Self::IsUserExists => ("/is-user-exists", NO_FLAGS),
            Self::IsUserInvited => ("/is-user-invited", NO_FLAGS),
            Self::IntegrationVisibility => ("/integration-visibility", INTEGRATION),
            Self::SetResellerPrices => ("/set-reseller-prices", INTEGRATION),
        };
        EndpointDescriptor { path, flags }
    }

    /// Path relative to the API base URL
    pub const fn path(self) -> &'static str {
        self.descriptor().path
    }

    pub const fn flags(self) -> FlagSet {
        self.descriptor().flags
    }

    /// Look up an endpoint by its path
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|endpoint| endpoint.path() == path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outbound payload of one endpoint.
///
/// Serialization yields the endpoint-specific fields only; the request id is
/// carried separately and placed in the envelope as `id`.
pub trait MarketRequest: Serialize + Send + Sync {
    /// Caller-supplied correlation value, if any
    fn request_id(&self) -> Option<&RequestId>;

    /// Endpoint-specific field checks
    fn validate_fields(&self, _validator: &mut Validator) {}

    /// Full request contract: request id rules plus field checks
    fn validate(&self) -> ValidationResult<()> {
        let mut validator = Validator::new();
        if let Some(id) = self.request_id() {
            id.validate_into(&mut validator, "requestId");
        }
        self.validate_fields(&mut validator);
        validator.finalize()
    }
}

/// Typed contract of one endpoint.
pub trait Operation {
    /// Routing metadata
    const ENDPOINT: Endpoint;

    /// Caller input
    type Request: MarketRequest;

    /// Fields of a successful response, besides `success`/`succ`
    type Response: DeserializeOwned + Send;
}

pub(crate) fn validate_username(validator: &mut Validator, username: &str) {
    let rule = StringValidator::new().min_length(MIN_USERNAME_LENGTH);
    validator.validate_field("username", username, &rule);
}
