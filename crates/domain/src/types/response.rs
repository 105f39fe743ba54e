//! Response envelope shared by every endpoint
//!
//! The API answers with either
//! `{ "success": true, "succ": true, ...fields }` or
//! `{ "success": false, "succ": false, "error": "..." }`.
//! Both flags must carry the literal value for the body to match a variant;
//! unknown extra fields are ignored.

use std::fmt;

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::MarketError;

/// Boolean that only deserializes from the literal `B`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Literal<const B: bool>;

impl<const B: bool> Serialize for Literal<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(B)
    }
}

impl<'de, const B: bool> Deserialize<'de> for Literal<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = bool::deserialize(deserializer)?;
        if value == B {
            Ok(Literal)
        } else {
            let expected = if B { "the literal true" } else { "the literal false" };
            Err(D::Error::invalid_value(Unexpected::Bool(value), &expected))
        }
    }
}

/// Success payload for endpoints that return no extra fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledged {}

/// Body of an API-level failure (`success: false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub error: String,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

/// Decoded response of one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    /// `success`/`succ` were both `true`
    Success(T),
    /// `success`/`succ` were both `false`
    Failure(ApiFailure),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Success payload, if any
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Turn an API-level failure into an `Api`-kind [`MarketError`]
    pub fn into_result(self) -> Result<T, MarketError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(failure) => Err(MarketError::api(failure.error)),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireResponse<T> {
    Success {
        #[allow(dead_code)]
        success: Literal<true>,
        #[allow(dead_code)]
        succ: Literal<true>,
        #[serde(flatten)]
        data: T,
    },
    Failure {
        #[allow(dead_code)]
        success: Literal<false>,
        #[allow(dead_code)]
        succ: Literal<false>,
        error: String,
    },
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireResponseRef<'a, T> {
    Success {
        success: Literal<true>,
        succ: Literal<true>,
        #[serde(flatten)]
        data: &'a T,
    },
    Failure {
        success: Literal<false>,
        succ: Literal<false>,
        error: &'a str,
    },
}

impl<'de, T> Deserialize<'de> for ApiResponse<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireResponse::<T>::deserialize(deserializer).map(|wire| match wire {
            WireResponse::Success { data, .. } => Self::Success(data),
            WireResponse::Failure { error, .. } => Self::Failure(ApiFailure { error }),
        })
    }
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Success(data) => WireResponseRef::Success { success: Literal, succ: Literal, data },
            Self::Failure(failure) => WireResponseRef::Failure {
                success: Literal,
                succ: Literal,
                error: failure.error.as_str(),
            },
        };
        wire.serialize(serializer)
    }
}
