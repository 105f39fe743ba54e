//! Caller-supplied request correlation value

use std::fmt;

use nlmarket_common::validation::{PatternValidator, Validator};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::REQUEST_ID_MAX_LENGTH;

static REQUEST_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[A-Za-z0-9._-]{{1,{REQUEST_ID_MAX_LENGTH}}}$"))
        .expect("REQUEST_ID_PATTERN should compile - this is a bug")
});

/// Correlation id sent as `id` in the envelope.
///
/// Either a string or an integer; its string form must be 1–80 characters
/// from `A–Z`, `a–z`, `0–9`, `.`, `-`, `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    Text(String),
}

impl RequestId {
    /// Record a field error if the id breaks the charset/length rule
    pub fn validate_into(&self, validator: &mut Validator, field: &str) {
        let rule = PatternValidator::new(
            REQUEST_ID_PATTERN.clone(),
            "requestId must be 1-80 chars: A-Z, a-z, 0-9, '.', '-' or '_'",
        );
        validator.validate_field(field, self.to_string().as_str(), &rule);
    }

    /// Whether the id satisfies the charset/length rule
    pub fn is_valid(&self) -> bool {
        REQUEST_ID_PATTERN.is_match(&self.to_string())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for RequestId {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<RequestId> for serde_json::Value {
    fn from(id: RequestId) -> Self {
        match id {
            RequestId::Number(n) => Self::from(n),
            RequestId::Text(s) => Self::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_charset_and_integers() {
        assert!(RequestId::from("order_42.retry-1").is_valid());
        assert!(RequestId::from(42_i64).is_valid());
        assert!(RequestId::from("a".repeat(80)).is_valid());
    }

    #[test]
    fn rejects_empty_long_or_foreign_characters() {
        assert!(!RequestId::from("").is_valid());
        assert!(!RequestId::from("a".repeat(81)).is_valid());
        assert!(!RequestId::from("has space").is_valid());
        assert!(!RequestId::from("slash/id").is_valid());
    }

    #[test]
    fn serializes_as_bare_value() {
        assert_eq!(serde_json::to_string(&RequestId::from(7_i64)).expect("json"), "7");
        assert_eq!(serde_json::to_string(&RequestId::from("r-1")).expect("json"), "\"r-1\"");
        assert_eq!(
            serde_json::from_str::<RequestId>("12").expect("integer id"),
            RequestId::Number(12)
        );
    }

    #[test]
    fn validate_into_reports_field() {
        let mut validator = Validator::new();
        RequestId::from("bad id").validate_into(&mut validator, "requestId");
        assert_eq!(validator.errors().field_errors("requestId").len(), 1);
    }
}
