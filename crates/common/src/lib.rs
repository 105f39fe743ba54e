//! Shared building blocks for the nlmarket crates.
//!
//! - [`crypto`]: request signing (SHA-256 over canonicalized fields)
//! - [`security`]: secret handling with zeroize-on-drop
//! - [`validation`]: field-level validation with dotted error paths
//! - [`utils`]: serde helpers

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod crypto;
pub mod security;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crypto::{Signer, SIGNATURE_FIELD};
pub use security::SecretString;
pub use utils::serde::duration_millis;
pub use validation::{FieldError, FieldValidator, ValidationError, ValidationResult, Validator};
