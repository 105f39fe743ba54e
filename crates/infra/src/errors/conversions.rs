//! Conversions from external infrastructure errors into `MarketError`.

use nlmarket_domain::{BoxError, ErrorKind, MarketError};
use reqwest::{Error as HttpError, StatusCode};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MarketError);

impl From<InfraError> for MarketError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MarketError> for InfraError {
    fn from(value: MarketError) -> Self {
        InfraError(value)
    }
}

impl InfraError {
    /// Non-2xx answer from `url`.
    pub(crate) fn status(status: StatusCode, url: &str) -> Self {
        InfraError(MarketError::http(format!("HTTP {} on {}", status.as_u16(), url)))
    }

    /// Transport failure on `url`, keeping `cause` as the source when known.
    pub(crate) fn network(url: &str, cause: Option<BoxError>) -> Self {
        let message = format!("Network error on {url}");
        InfraError(match cause {
            Some(cause) => MarketError::network(message, cause),
            None => MarketError::new(ErrorKind::Network, message),
        })
    }
}

trait IntoMarketError {
    fn into_market(self) -> MarketError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MarketError */
/* -------------------------------------------------------------------------- */

impl IntoMarketError for HttpError {
    fn into_market(self) -> MarketError {
        if self.is_builder() {
            return MarketError::with_source(
                ErrorKind::Configuration,
                "Failed to build HTTP client",
                self,
            );
        }

        let url = self.url().map_or_else(|| "unknown URL".to_string(), ToString::to_string);
        match self.status() {
            Some(status) => InfraError::status(status, &url).0,
            None => {
                let cause: BoxError = Box::new(self);
                InfraError::network(&url, Some(cause)).0
            }
        }
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_market())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
