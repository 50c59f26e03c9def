//! Fixed-table exchange rate provider.
//!
//! Tables are written as entries of the form `<amount> <FROM> = <amount> <TO>`,
//! separated by newlines or `;`. Text after `#` is ignored.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use purse_core::currency::{FixedRates, change};
//! use purse_shared::types::Currency;
//!
//! let rates: FixedRates = "1 EUR = 1.19 USD".parse().unwrap();
//! let usd = change(&Currency::Eur.amount_of(10), Currency::Usd, &rates).unwrap();
//! assert_eq!(usd, Currency::Usd.amount_of(dec!(11.9)));
//! ```

use std::collections::BTreeMap;

use purse_shared::{MoneyError, types::Currency};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::exchange::{ExchangeRate, RateLookupMethod};
use super::provider::{RateError, RateProvider, validate_rate};

/// Errors raised while parsing a fixed rate table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedRatesError {
    /// Entry is not of the form `<amount> <FROM> = <amount> <TO>`.
    #[error("Entry {entry}: expected '<amount> <FROM> = <amount> <TO>', got '{text}'")]
    Malformed {
        /// 1-based entry number.
        entry: usize,
        /// Offending text.
        text: String,
    },

    /// Entry names an unsupported currency.
    #[error("Entry {entry}: {source}")]
    Currency {
        /// 1-based entry number.
        entry: usize,
        /// Underlying parse error.
        source: MoneyError,
    },

    /// Amount is not a decimal number.
    #[error("Entry {entry}: invalid amount '{text}'")]
    InvalidNumber {
        /// 1-based entry number.
        entry: usize,
        /// Offending text.
        text: String,
    },

    /// Amount is zero or negative.
    #[error("Entry {entry}: amounts must be positive, got '{text}'")]
    NonPositive {
        /// 1-based entry number.
        entry: usize,
        /// Offending text.
        text: String,
    },

    /// Both sides use the same currency.
    #[error("Entry {entry}: {currency} cannot be exchanged with itself")]
    SameCurrency {
        /// 1-based entry number.
        entry: usize,
        /// Repeated currency.
        currency: Currency,
    },

    /// A pair is given twice with different rates.
    #[error("Entry {entry}: conflicting rates for {from} to {to}: {existing} and {new}")]
    Conflict {
        /// 1-based entry number.
        entry: usize,
        /// Source currency.
        from: Currency,
        /// Target currency.
        to: Currency,
        /// Rate seen first.
        existing: Decimal,
        /// Rate seen later.
        new: Decimal,
    },
}

/// Deterministic rate table keyed by currency pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedRates {
    rates: BTreeMap<(Currency, Currency), Decimal>,
    pivot: Option<Currency>,
}

impl FixedRates {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from already validated rates. Later rates win.
    pub fn from_rates<I>(rates: I) -> Self
    where
        I: IntoIterator<Item = ExchangeRate>,
    {
        rates.into_iter().fold(Self::new(), Self::with_rate)
    }

    /// Adds or replaces the rate for `rate.from()` to `rate.to()`.
    #[must_use]
    pub fn with_rate(mut self, rate: ExchangeRate) -> Self {
        self.rates.insert((rate.from(), rate.to()), rate.rate());
        self
    }

    /// Routes pairs missing from the table through `pivot`.
    #[must_use]
    pub fn with_pivot(mut self, pivot: Currency) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Parses a table from text.
    pub fn parse(text: &str) -> Result<Self, FixedRatesError> {
        let mut table = Self::new();
        let entries = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default())
            .flat_map(|line| line.split(';'))
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .enumerate();

        for (index, body) in entries {
            let entry = index + 1;
            let rate = parse_entry(entry, body)?;
            let pair = (rate.from(), rate.to());
            if let Some(existing) = table.rates.get(&pair)
                && *existing != rate.rate()
            {
                return Err(FixedRatesError::Conflict {
                    entry,
                    from: pair.0,
                    to: pair.1,
                    existing: *existing,
                    new: rate.rate(),
                });
            }
            table.rates.insert(pair, rate.rate());
        }

        debug!(rates = table.rates.len(), "Parsed fixed rate table");
        Ok(table)
    }

    /// Parses every entry in `entries` as part of one table.
    pub fn parse_entries<I, S>(entries: I) -> Result<Self, FixedRatesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = entries
            .into_iter()
            .map(|entry| entry.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Self::parse(&text)
    }

    /// Number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no pair is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// The pivot currency, if any.
    #[must_use]
    pub const fn pivot(&self) -> Option<Currency> {
        self.pivot
    }

    /// Stored rates ordered by pair.
    pub fn rates(&self) -> impl Iterator<Item = ExchangeRate> + '_ {
        self.rates
            .iter()
            .filter_map(|(&(from, to), &rate)| ExchangeRate::new(from, to, rate).ok())
    }

    /// Finds a rate and reports how it was obtained.
    ///
    /// Order: identity, direct, inverse, then triangulation through the pivot.
    #[must_use]
    pub fn lookup(&self, from: Currency, to: Currency) -> Option<(Decimal, RateLookupMethod)> {
        if from == to {
            return Some((Decimal::ONE, RateLookupMethod::Identity));
        }

        if let Some(rate) = self.rates.get(&(from, to)) {
            return Some((*rate, RateLookupMethod::Direct));
        }

        if let Some(rate) = self.inverse(from, to) {
            return Some((rate, RateLookupMethod::Inverse));
        }

        let pivot = self.pivot.filter(|p| *p != from && *p != to)?;
        let first = self.leg(from, pivot)?;
        let second = self.leg(pivot, to)?;
        first
            .checked_mul(second)
            .map(|rate| (rate, RateLookupMethod::Triangulated))
    }

    fn inverse(&self, from: Currency, to: Currency) -> Option<Decimal> {
        self.rates
            .get(&(to, from))
            .and_then(|rate| Decimal::ONE.checked_div(*rate))
    }

    fn leg(&self, from: Currency, to: Currency) -> Option<Decimal> {
        self.rates
            .get(&(from, to))
            .copied()
            .or_else(|| self.inverse(from, to))
    }
}

impl RateProvider for FixedRates {
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, RateError> {
        let (rate, method) = self
            .lookup(from, to)
            .ok_or(RateError::UnknownPair { from, to })?;
        debug!(%from, %to, %rate, %method, "Fixed rate lookup");
        validate_rate(from, to, rate)
    }
}

impl std::str::FromStr for FixedRates {
    type Err = FixedRatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for FixedRates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, rate) in self.rates().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{rate}")?;
        }
        Ok(())
    }
}

/// Parses `<amount> <FROM> = <amount> <TO>`.
fn parse_entry(entry: usize, body: &str) -> Result<ExchangeRate, FixedRatesError> {
    let malformed = || FixedRatesError::Malformed {
        entry,
        text: body.to_string(),
    };

    let (left, right) = body.split_once('=').ok_or_else(malformed)?;
    let (from_amount, from) = parse_side(entry, left).ok_or_else(malformed)??;
    let (to_amount, to) = parse_side(entry, right).ok_or_else(malformed)??;

    if from == to {
        return Err(FixedRatesError::SameCurrency {
            entry,
            currency: from,
        });
    }

    let rate = to_amount
        .checked_div(from_amount)
        .ok_or_else(|| FixedRatesError::InvalidNumber {
            entry,
            text: body.to_string(),
        })?;

    // Quotients below the smallest representable decimal come back as zero
    ExchangeRate::new(from, to, rate).map_err(|_| FixedRatesError::NonPositive {
        entry,
        text: body.to_string(),
    })
}

/// Parses `<amount> <CODE>`; `None` when the shape is wrong.
fn parse_side(entry: usize, side: &str) -> Option<Result<(Decimal, Currency), FixedRatesError>> {
    let mut parts = side.split_whitespace();
    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    Some(parse_amount(entry, amount).and_then(|amount| {
        let currency = code
            .parse::<Currency>()
            .map_err(|source| FixedRatesError::Currency { entry, source })?;
        Ok((amount, currency))
    }))
}

fn parse_amount(entry: usize, text: &str) -> Result<Decimal, FixedRatesError> {
    let amount = Decimal::from_str_exact(text).map_err(|_| FixedRatesError::InvalidNumber {
        entry,
        text: text.to_string(),
    })?;
    if amount <= Decimal::ZERO {
        return Err(FixedRatesError::NonPositive {
            entry,
            text: text.to_string(),
        });
    }
    Ok(amount)
}
