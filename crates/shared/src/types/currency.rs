//! Supported currencies and their precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::MoneyError;
use crate::types::Money;

/// Currency codes supported by the system.
///
/// Each currency carries a fixed precision: the number of decimal digits
/// its amounts are rounded to. USD uses 3 digits in this domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro
    Eur,
    /// US Dollar
    Usd,
    /// Bitcoin
    Xbt,
    /// Pound Sterling
    Gbp,
    /// Japanese Yen
    Jpy,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Self; 5] = [Self::Eur, Self::Usd, Self::Xbt, Self::Gbp, Self::Jpy];

    /// Returns the symbolic code (e.g. "EUR").
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Xbt => "XBT",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
        }
    }

    /// Returns the number of decimal digits amounts are rounded to.
    #[must_use]
    pub const fn precision(self) -> u32 {
        match self {
            Self::Eur | Self::Gbp => 2,
            Self::Usd => 3,
            Self::Xbt => 8,
            Self::Jpy => 0,
        }
    }

    /// Rounds `raw` to this currency's precision, half-up.
    #[must_use]
    pub fn round(self, raw: Decimal) -> Decimal {
        raw.round_dp_with_strategy(self.precision(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Builds a `Money` of this currency, rounding `raw` to its precision.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use purse_shared::types::Currency;
    ///
    /// assert_eq!(Currency::Eur.amount_of(dec!(1.235)).amount(), dec!(1.24));
    /// ```
    #[must_use]
    pub fn amount_of(self, raw: impl Into<Decimal>) -> Money {
        Money::new(raw.into(), self)
    }

    /// The neutral element for addition in this currency.
    #[must_use]
    pub fn zero(self) -> Money {
        Money::zero(self)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            "XBT" | "BTC" => Ok(Self::Xbt),
            "GBP" => Ok(Self::Gbp),
            "JPY" => Ok(Self::Jpy),
            _ => Err(MoneyError::UnknownCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[rstest]
    #[case(Currency::Eur, 2)]
    #[case(Currency::Usd, 3)]
    #[case(Currency::Xbt, 8)]
    #[case(Currency::Gbp, 2)]
    #[case(Currency::Jpy, 0)]
    fn test_precision(#[case] currency: Currency, #[case] precision: u32) {
        assert_eq!(currency.precision(), precision);
    }

    #[rstest]
    #[case(dec!(1.234), dec!(1.23))]
    #[case(dec!(1.235), dec!(1.24))]
    #[case(dec!(1.236), dec!(1.24))]
    #[case(dec!(-1.235), dec!(-1.24))]
    #[case(dec!(0.005), dec!(0.01))]
    fn test_round_half_up(#[case] raw: Decimal, #[case] expected: Decimal) {
        assert_eq!(Currency::Eur.round(raw), expected);
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Xbt.to_string(), "XBT");
        assert_eq!(Currency::Gbp.to_string(), "GBP");
        assert_eq!(Currency::Jpy.to_string(), "JPY");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_str("XBT").unwrap(), Currency::Xbt);
        assert_eq!(Currency::from_str("btc").unwrap(), Currency::Xbt);

        assert_eq!(
            Currency::from_str("XXX").unwrap_err(),
            MoneyError::UnknownCurrency("XXX".into())
        );
        assert!(Currency::from_str("").is_err());
    }

    #[test]
    fn test_all_codes_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_str(currency.code()).unwrap(), currency);
        }
    }

    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Currency::Xbt).unwrap();
        assert_eq!(json, "\"XBT\"");
        let parsed: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, Currency::Eur);
    }
}
