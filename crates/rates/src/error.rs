//! Live feed error types.

use purse_shared::types::Currency;
use thiserror::Error;

/// Errors raised while refreshing quotes from a live feed.
#[derive(Debug, Error)]
pub enum LiveRatesError {
    /// Transport or HTTP status failure.
    #[error("LiveRatesError - Http: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not the expected JSON.
    #[error("LiveRatesError - Decode: {0}")]
    Decode(#[from] serde_json::Error),

    /// The feed does not quote this currency.
    #[error("LiveRatesError - UnsupportedCurrency: {0}")]
    UnsupportedCurrency(Currency),

    /// Response parsed but does not answer the request.
    #[error("LiveRatesError - UnexpectedResponse: {0}")]
    UnexpectedResponse(String),
}
