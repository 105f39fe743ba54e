//! Request signing primitives.

pub mod signer;

pub use signer::{canonical_string, value_string, Signer, SIGNATURE_FIELD};
