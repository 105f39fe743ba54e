//! Market API client
//!
//! [`MarketClient`] exposes one method per endpoint and drives each call
//! through validation, envelope augmentation, signing, transport and response
//! decoding. Request ids come from a pluggable [`RequestIdGenerator`].

pub mod client;
pub mod request_id;

pub use client::{MarketClient, MarketClientBuilder};
pub use request_id::{RequestIdGenerator, SequentialRequestIds, UuidRequestIds};
