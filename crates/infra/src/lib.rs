//! # nlmarket Infrastructure
//!
//! I/O side of the Neverlose Market client.
//!
//! This crate contains:
//! - [`HttpClient`]: JSON POST transport with per-attempt timeout and bounded
//!   retries, behind the [`Transport`] trait
//! - [`MarketClient`]: validate → augment → sign → send → decode pipeline with
//!   one method per endpoint
//! - Request id generators
//! - The configuration loader (environment and JSON/TOML files)
//!
//! ## Example
//!
//! ```no_run
//! use nlmarket_domain::endpoints::TransferMoneyRequest;
//! use nlmarket_domain::{ClientConfig, Credentials};
//! use nlmarket_infra::MarketClient;
//!
//! # async fn run() -> nlmarket_domain::Result<()> {
//! let client = MarketClient::new(ClientConfig::new(Credentials::new("demo", "supersecret")))?;
//! let response = client.transfer_money(&TransferMoneyRequest::new("someUser", 100)).await?;
//! response.into_result()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{
    MarketClient, MarketClientBuilder, RequestIdGenerator, SequentialRequestIds, UuidRequestIds,
};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, Transport};
