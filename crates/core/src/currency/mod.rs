//! Exchange rates and currency conversion.

pub mod exchange;
pub mod fixed;
pub mod provider;

#[cfg(test)]
mod props;

pub use exchange::{ExchangeRate, RateLookupMethod};
pub use fixed::{FixedRates, FixedRatesError};
pub use provider::{RateError, RateProvider, change, validate_rate};
