//! Property-based tests for rate lookup and conversion.

use proptest::prelude::*;
use purse_shared::types::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

use super::exchange::{ExchangeRate, RateLookupMethod};
use super::fixed::FixedRates;
use super::provider::{RateProvider, change};

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Two different currencies.
fn distinct_pair() -> impl Strategy<Value = (Currency, Currency)> {
    (
        prop::sample::select(Currency::ALL.to_vec()),
        prop::sample::select(Currency::ALL.to_vec()),
    )
        .prop_filter("currencies must differ", |(a, b)| a != b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting with a fixed table equals rounding amount * rate half-up.
    #[test]
    fn prop_change_rounds_product(
        (from, to) in distinct_pair(),
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let rates = FixedRates::new().with_rate(ExchangeRate::new(from, to, rate).unwrap());
        let money = from.amount_of(amount);
        let converted = change(&money, to, &rates).unwrap();

        let expected = (money.amount() * rate)
            .round_dp_with_strategy(to.precision(), RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(converted.currency(), to);
        prop_assert_eq!(converted.amount(), expected);
    }

    /// Rendering a table and parsing it back yields the same rates.
    #[test]
    fn prop_table_text_is_stable((from, to) in distinct_pair(), rate in positive_rate()) {
        let rates = FixedRates::new().with_rate(ExchangeRate::new(from, to, rate).unwrap());
        let parsed = FixedRates::parse(&rates.to_string()).unwrap();
        prop_assert_eq!(parsed.rate(from, to).unwrap(), rate);
    }

    /// Direct rates win over inverse ones whatever their values.
    #[test]
    fn prop_direct_rate_priority(
        (from, to) in distinct_pair(),
        direct in positive_rate(),
        inverse in positive_rate(),
    ) {
        let rates = FixedRates::from_rates([
            ExchangeRate::new(from, to, direct).unwrap(),
            ExchangeRate::new(to, from, inverse).unwrap(),
        ]);
        prop_assert_eq!(rates.lookup(from, to), Some((direct, RateLookupMethod::Direct)));
    }

    /// A lone rate is always answered in both directions and every rate is positive.
    #[test]
    fn prop_inverse_is_positive((from, to) in distinct_pair(), rate in positive_rate()) {
        let rates = FixedRates::new().with_rate(ExchangeRate::new(from, to, rate).unwrap());
        let (inverse, method) = rates.lookup(to, from).unwrap();
        prop_assert_eq!(method, RateLookupMethod::Inverse);
        prop_assert!(inverse > Decimal::ZERO);
    }
}
