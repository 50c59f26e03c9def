//! Exchange rate provider contract.
//!
//! A provider answers "how many units of `to` is one unit of `from` worth".
//! Conversion never looks rates up on its own: callers pass a provider in.

use std::sync::Arc;

use purse_shared::{Money, MoneyError, types::Currency};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

/// Errors returned by rate providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    /// The provider has no rate for this pair.
    #[error("No exchange rate for {from} to {to}")]
    UnknownPair {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
    },

    /// The provider produced a zero or negative rate.
    #[error("Exchange rate for {from} to {to} must be positive, got {rate}")]
    NonPositiveRate {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
        /// Offending rate.
        rate: Decimal,
    },

    /// The last known rate is too old to be used.
    #[error("Exchange rate for {from} to {to} is {age_secs}s old")]
    Stale {
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
        /// Age of the quote in seconds.
        age_secs: i64,
    },

    /// The provider could not be reached or answered garbage.
    #[error("Exchange rate provider unavailable: {0}")]
    Unavailable(String),

    /// Applying the rate failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Source of exchange rates.
pub trait RateProvider {
    /// Returns the strictly positive rate converting `from` into `to`.
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, RateError>;
}

impl<T: RateProvider + ?Sized> RateProvider for &T {
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, RateError> {
        (**self).rate(from, to)
    }
}

impl<T: RateProvider + ?Sized> RateProvider for Box<T> {
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, RateError> {
        (**self).rate(from, to)
    }
}

impl<T: RateProvider + ?Sized> RateProvider for Arc<T> {
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, RateError> {
        (**self).rate(from, to)
    }
}

/// Rejects zero and negative rates.
pub fn validate_rate(from: Currency, to: Currency, rate: Decimal) -> Result<Decimal, RateError> {
    if rate > Decimal::ZERO {
        Ok(rate)
    } else {
        Err(RateError::NonPositiveRate { from, to, rate })
    }
}

/// Converts `money` into `target` with a rate from `provider`.
///
/// Provider errors are returned unchanged.
pub fn change<P>(money: &Money, target: Currency, provider: &P) -> Result<Money, RateError>
where
    P: RateProvider + ?Sized,
{
    let converted = money.change(target, |from, to| provider.rate(from, to))?;
    debug!(from = %money, to = %converted, "Converted money");
    Ok(converted)
}
