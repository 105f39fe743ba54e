//! Serde helpers shared by configuration and response types

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// `Duration` as whole milliseconds (`u64`) on the wire.
///
/// ```rust
/// use std::time::Duration;
///
/// use nlmarket_common::duration_millis;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     #[serde(with = "duration_millis")]
///     timeout_ms: Duration,
/// }
///
/// let settings: Settings = serde_json::from_str(r#"{"timeout_ms":2500}"#).unwrap();
/// assert_eq!(settings.timeout_ms, Duration::from_millis(2500));
/// ```
pub mod duration_millis {
    use super::*;

    /// Deserialize milliseconds into a Duration
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Integer that may arrive as a JSON float with no fractional part (`10.0`).
pub mod integral {
    use super::*;

    /// Deserialize an `i64`, rejecting fractional or out-of-range numbers
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = Number::deserialize(deserializer)?;
        if let Some(value) = number.as_i64() {
            return Ok(value);
        }

        // 2^63; the upper bound is exclusive
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;

        match number.as_f64() {
            Some(value) if value.fract() == 0.0 && (-LIMIT..LIMIT).contains(&value) => {
                Ok(value as i64)
            }
            _ => Err(serde::de::Error::custom(format!("expected an integer, got {number}"))),
        }
    }
}
