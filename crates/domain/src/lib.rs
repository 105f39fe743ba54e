//! # nlmarket Domain
//!
//! Typed contracts for the Neverlose Market reseller API.
//!
//! This crate contains:
//! - The endpoint catalogue ([`Endpoint`], [`Operation`]) with one typed
//!   request/response pair per remote operation
//! - The response envelope ([`ApiResponse`]) and request ids
//! - Per-endpoint capability flags ([`FlagSet`])
//! - [`MarketError`] and its closed set of [`ErrorKind`]s
//! - Client configuration ([`ClientConfig`], [`Credentials`])
//!
//! ## Architecture
//! - Depends only on `nlmarket-common`
//! - No I/O: transport and orchestration live in `nlmarket-infra`

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod constants;
pub mod endpoints;
pub mod errors;
pub mod flags;
pub mod types;

// Re-export commonly used items
pub use config::{ClientConfig, Credentials};
pub use endpoints::{Endpoint, EndpointDescriptor, MarketRequest, Operation};
pub use errors::{BoxError, ErrorKind, MarketError, Result};
pub use flags::{EndpointFlag, FlagSet};
pub use types::{Acknowledged, ApiFailure, ApiResponse, Product, RequestId};
