//! Shared value types for request and response contracts

pub mod request_id;
pub mod response;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use request_id::RequestId;
pub use response::{Acknowledged, ApiFailure, ApiResponse, Literal};

/// Product line a request refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    Csgo,
    Cs2,
}

impl Product {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csgo => "csgo",
            Self::Cs2 => "cs2",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Product::Cs2).expect("serializable"), "\"cs2\"");
        assert_eq!(
            serde_json::from_str::<Product>("\"csgo\"").expect("known product"),
            Product::Csgo
        );
        assert!(serde_json::from_str::<Product>("\"dota\"").is_err());
    }
}
