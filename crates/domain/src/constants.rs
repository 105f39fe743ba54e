//! Domain constants
//!
//! Defaults and limits shared by the client, the endpoint contracts and the
//! configuration loader.

// Client defaults
pub const DEFAULT_BASE_URL: &str = "https://user-api.neverlose.cc/api/market";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_RETRIES: u32 = 1;

// Envelope field names
pub const FIELD_ID: &str = "id";
pub const FIELD_USER_ID: &str = "user_id";
pub const FIELD_INTEGRATION_ID: &str = "integration_id";

// Request contract limits
pub const REQUEST_ID_MAX_LENGTH: usize = 80;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_GIFT_COUNT: u8 = 3;
pub const MAX_CURRENCIES_PER_SLOT: usize = 3;
