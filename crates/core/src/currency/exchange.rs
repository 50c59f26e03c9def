//! Exchange rate types.

use purse_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::provider::{RateError, validate_rate};

/// Exchange rate between two currencies. The rate is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRate")]
pub struct ExchangeRate {
    from: Currency,
    to: Currency,
    rate: Decimal,
}

#[derive(Deserialize)]
struct UncheckedRate {
    from: Currency,
    to: Currency,
    rate: Decimal,
}

impl TryFrom<UncheckedRate> for ExchangeRate {
    type Error = RateError;

    fn try_from(value: UncheckedRate) -> Result<Self, Self::Error> {
        Self::new(value.from, value.to, value.rate)
    }
}

impl ExchangeRate {
    /// Creates a new exchange rate, rejecting non-positive rates.
    pub fn new(from: Currency, to: Currency, rate: Decimal) -> Result<Self, RateError> {
        let rate = validate_rate(from, to, rate)?;
        Ok(Self { from, to, rate })
    }

    /// Source currency.
    #[must_use]
    pub const fn from(&self) -> Currency {
        self.from
    }

    /// Target currency.
    #[must_use]
    pub const fn to(&self) -> Currency {
        self.to
    }

    /// Units of `to` per unit of `from`.
    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Returns the inverse rate.
    ///
    /// Fails when the reciprocal is too small to represent.
    pub fn inverse(&self) -> Result<Self, RateError> {
        let rate = Decimal::ONE.checked_div(self.rate).unwrap_or_default();
        Self::new(self.to, self.from, rate)
    }
}

impl std::fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1 {} = {} {}", self.from, self.rate.normalize(), self.to)
    }
}

/// How a rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLookupMethod {
    /// Same currency on both sides, rate is one.
    Identity,
    /// Rate stored for the requested pair.
    Direct,
    /// Reciprocal of the rate stored for the reversed pair.
    Inverse,
    /// Product of two rates through a pivot currency.
    Triangulated,
}

impl std::fmt::Display for RateLookupMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Identity => "identity",
            Self::Direct => "direct",
            Self::Inverse => "inverse",
            Self::Triangulated => "triangulated",
        };
        f.write_str(name)
    }
}
