//! Common utility functions

pub mod serde;

pub use self::serde::{duration_millis, integral};
