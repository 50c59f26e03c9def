//! Money type with currency-specific precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MoneyError, MoneyResult};
use crate::types::Currency;

/// Represents a monetary amount with currency.
///
/// The amount is always rounded to the currency's precision (half-up).
/// Every constructor re-applies the rounding, so a `Money` never holds
/// more digits than its currency allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "UncheckedMoney")]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

/// Wire form of `Money` before rounding is applied.
#[derive(Deserialize)]
struct UncheckedMoney {
    amount: Decimal,
    currency: Currency,
}

impl From<UncheckedMoney> for Money {
    fn from(raw: UncheckedMoney) -> Self {
        Self::new(raw.amount, raw.currency)
    }
}

impl Money {
    /// Creates a new Money instance, rounding `amount` to the currency precision.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        let mut amount = currency.round(amount);
        if amount.is_zero() {
            amount.set_sign_positive(true);
        }
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// The rounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency this amount is expressed in.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative()
    }

    /// Adds two amounts of the same currency.
    ///
    /// Fails with [`MoneyError::CurrencyMismatch`] when currencies differ.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use purse_shared::types::Currency;
    ///
    /// let sum = Currency::Eur.amount_of(2).checked_add(&Currency::Eur.amount_of(3)).unwrap();
    /// assert_eq!(sum, Currency::Eur.amount_of(dec!(5)));
    ///
    /// let err = Currency::Eur.amount_of(2).checked_add(&Currency::Usd.amount_of(3)).unwrap_err();
    /// assert_eq!(err.to_string(), "Mismatch currency, expected EUR got USD");
    /// ```
    pub fn checked_add(&self, other: &Self) -> MoneyResult<Self> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch {
                expected: self.currency,
                actual: other.currency,
            });
        }
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(sum, self.currency))
    }

    /// Sums amounts of `currency`, starting from zero.
    pub fn sum<'a, I>(currency: Currency, items: I) -> MoneyResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        items
            .into_iter()
            .try_fold(Self::zero(currency), |acc, item| acc.checked_add(item))
    }

    /// Converts into `target` using the rate returned by `rate`.
    ///
    /// `rate(from, to)` gives how many units of `to` one unit of `from` is
    /// worth. The product is rounded to the target precision, half-up.
    /// Errors from `rate` are returned as they are.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use rust_decimal_macros::dec;
    /// use purse_shared::{MoneyError, types::Currency};
    ///
    /// let usd = Currency::Eur
    ///     .amount_of(10)
    ///     .change(Currency::Usd, |_, _| Ok::<Decimal, MoneyError>(dec!(1.19)))
    ///     .unwrap();
    /// assert_eq!(usd, Currency::Usd.amount_of(dec!(11.9)));
    /// ```
    pub fn change<F, E>(&self, target: Currency, rate: F) -> Result<Self, E>
    where
        F: FnOnce(Currency, Currency) -> Result<Decimal, E>,
        E: From<MoneyError>,
    {
        let rate = rate(self.currency, target)?;
        let raw = self
            .amount
            .checked_mul(rate)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(raw, target))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut amount = self.amount;
        amount.rescale(self.currency.precision());
        write!(f, "{amount} {}", self.currency)
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyError;

    /// Parses `"<amount> <CODE>"`, e.g. `"10.50 EUR"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(MoneyError::InvalidAmount(s.to_string()));
        };
        let amount = Decimal::from_str_exact(amount)
            .or_else(|_| Decimal::from_scientific(amount))
            .map_err(|_| MoneyError::InvalidAmount(amount.to_string()))?;
        let currency = code.parse::<Currency>()?;
        Ok(Self::new(amount, currency))
    }
}
