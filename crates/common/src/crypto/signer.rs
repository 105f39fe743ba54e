//! Request signing for the market API.
//!
//! The remote service authenticates a request by recomputing a SHA-256 digest
//! over the request fields and the shared secret:
//!
//! 1. Keys are sorted lexicographically (byte order).
//! 2. Each pair contributes `key` immediately followed by the value's string
//!    form; pairs are concatenated with no separator.
//! 3. The secret is appended and the digest is hex-encoded (lowercase).
//!
//! Value string forms follow what the service expects on the wire: strings are
//! used raw, numbers in their shortest decimal form, arrays are the
//! comma-joined forms of their elements, and every object collapses to the
//! literal `[object Object]`. Nested structures are therefore NOT
//! recursively canonicalized; two requests that differ only inside a nested
//! object share a signature.
//!
//! ```rust
//! use nlmarket_common::crypto::Signer;
//! use serde_json::json;
//!
//! let signer = Signer::new("secret");
//! let fields = json!({ "z": 2, "a": 1 });
//! let fields = fields.as_object().cloned().unwrap_or_default();
//!
//! let mut signed = fields.clone();
//! signed.insert("signature".into(), signer.sign(&fields).into());
//! assert!(signer.verify(&signed));
//! ```

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::security::SecretString;

/// Name of the envelope field that carries the signature.
pub const SIGNATURE_FIELD: &str = "signature";

/// Placeholder the service uses for any object value.
const OBJECT_PLACEHOLDER: &str = "[object Object]";

/// Generates and validates SHA-256 signatures for request envelopes.
#[derive(Clone)]
pub struct Signer {
    secret: SecretString,
}

impl Signer {
    /// Create a signer for the given shared secret.
    pub fn new(secret: impl Into<SecretString>) -> Self {
        Self { secret: secret.into() }
    }

    /// Hex-encoded SHA-256 signature over `fields` and the secret.
    ///
    /// The result does not depend on the insertion order of `fields`.
    pub fn sign(&self, fields: &Map<String, Value>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(canonical_string(fields).as_bytes());
        hasher.update(self.secret.expose().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check the `signature` field of `payload` against the remaining fields.
    ///
    /// Returns `false` when the signature is missing, not a string, not valid
    /// hex, of the wrong length, or simply different.
    pub fn verify(&self, payload: &Map<String, Value>) -> bool {
        let Some(Value::String(provided)) = payload.get(SIGNATURE_FIELD) else {
            return false;
        };

        let mut unsigned = payload.clone();
        unsigned.remove(SIGNATURE_FIELD);
        let expected = self.sign(&unsigned);

        let (Ok(provided), Ok(expected)) = (hex::decode(provided), hex::decode(expected)) else {
            return false;
        };

        if provided.len() != expected.len() {
            return false;
        }

        provided.ct_eq(&expected).into()
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("secret", &self.secret).finish()
    }
}

/// Sorted `key` + `value` concatenation that is hashed by [`Signer::sign`].
///
/// The secret is not part of the returned string.
pub fn canonical_string(fields: &Map<String, Value>) -> String {
    let mut pairs: Vec<(&String, &Value)> = fields.iter().collect();
    pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(key);
        out.push_str(&value_string(value));
    }
    out
}

/// String form of a single field value.
pub fn value_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(number) => Cow::Owned(number_string(number)),
        Value::String(text) => Cow::Borrowed(text.as_str()),
        Value::Array(items) => {
            let parts: Vec<Cow<'_, str>> = items
                .iter()
                .map(|item| match item {
                    Value::Null => Cow::Borrowed(""),
                    other => value_string(other),
                })
                .collect();
            Cow::Owned(parts.join(","))
        }
        Value::Object(_) => Cow::Borrowed(OBJECT_PLACEHOLDER),
    }
}

/// Integers beyond this lose precision once the service parses them.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

fn number_string(number: &serde_json::Number) -> String {
    let exact = number
        .as_u64()
        .map(|n| n <= MAX_SAFE_INTEGER)
        .or_else(|| number.as_i64().map(|n| n.unsigned_abs() <= MAX_SAFE_INTEGER));

    match (exact, number.as_f64()) {
        (Some(true), _) | (_, None) => number.to_string(),
        (_, Some(float)) => float_string(float),
    }
}

// Number-to-string conversion of the service's runtime: shortest round-trip
// digits, plain decimal for 1e-7 <= |x| < 1e21, exponent form outside.
fn float_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_sign_negative() {
        return format!("-{}", float_string(-value));
    }

    // `{:e}` yields the shortest round-trip digits as `d.ddddeN`.
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n > 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        format!("{first}{fraction}e{sign}{}", (n - 1).abs())
    }
}
