//! Property-based tests for money arithmetic.
//!
//! - Rounding is idempotent and bounded by half a unit
//! - Addition is a commutative monoid per currency
//! - Mismatched currencies never add
//! - Conversion is faithful to the supplied rate

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::{Currency, Money};
use crate::error::MoneyError;

/// Strategy to generate any supported currency.
fn currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Strategy to generate raw amounts with up to 10 decimal places.
fn raw_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64, 0u32..=10)
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy to generate positive amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Two different currencies.
fn distinct_pair() -> impl Strategy<Value = (Currency, Currency)> {
    (currency(), currency()).prop_filter("currencies must differ", |(a, b)| a != b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_rounding_is_idempotent(currency in currency(), raw in raw_amount()) {
        let once = currency.amount_of(raw);
        let twice = currency.amount_of(once.amount());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_rounding_stays_within_half_unit(currency in currency(), raw in raw_amount()) {
        let rounded = currency.amount_of(raw).amount();
        let half_unit = Decimal::new(5, currency.precision() + 1);
        prop_assert!((rounded - raw).abs() <= half_unit);
        prop_assert!(rounded.scale() <= currency.precision());
    }

    #[test]
    fn prop_add_is_commutative(currency in currency(), x in raw_amount(), y in raw_amount()) {
        let x = currency.amount_of(x);
        let y = currency.amount_of(y);
        prop_assert_eq!(x.checked_add(&y).unwrap(), y.checked_add(&x).unwrap());
    }

    #[test]
    fn prop_add_is_associative(
        currency in currency(),
        x in raw_amount(),
        y in raw_amount(),
        z in raw_amount(),
    ) {
        let x = currency.amount_of(x);
        let y = currency.amount_of(y);
        let z = currency.amount_of(z);
        let left = x.checked_add(&y).unwrap().checked_add(&z).unwrap();
        let right = x.checked_add(&y.checked_add(&z).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_zero_is_neutral(currency in currency(), x in raw_amount()) {
        let x = currency.amount_of(x);
        let zero = currency.zero();
        prop_assert_eq!(x.checked_add(&zero).unwrap(), x);
        prop_assert_eq!(zero.checked_add(&x).unwrap(), x);
    }

    #[test]
    fn prop_add_matches_integer_sum(x in -1_000_000i64..1_000_000, y in -1_000_000i64..1_000_000) {
        let sum = Currency::Eur.amount_of(x).checked_add(&Currency::Eur.amount_of(y)).unwrap();
        prop_assert_eq!(sum, Currency::Eur.amount_of(x + y));
    }

    #[test]
    fn prop_mismatch_always_fails(
        (expected, actual) in distinct_pair(),
        x in raw_amount(),
        y in raw_amount(),
    ) {
        let err = expected.amount_of(x).checked_add(&actual.amount_of(y)).unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            format!("Mismatch currency, expected {expected} got {actual}")
        );
    }

    #[test]
    fn prop_equality_is_currency_sensitive((a, b) in distinct_pair(), x in raw_amount()) {
        prop_assert_ne!(a.amount_of(x), b.amount_of(x));
    }

    #[test]
    fn prop_equality_is_reflexive_and_symmetric(currency in currency(), x in raw_amount()) {
        let a = currency.amount_of(x);
        let b = currency.amount_of(x);
        prop_assert_eq!(a, a);
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn prop_change_is_faithful_to_rate(amount in positive_amount(), rate in positive_rate()) {
        let eur = Currency::Eur.amount_of(amount);
        let usd = eur
            .change(Currency::Usd, |_, _| Ok::<_, MoneyError>(rate))
            .unwrap();
        let expected = (eur.amount() * rate)
            .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
        prop_assert_eq!(usd.currency(), Currency::Usd);
        prop_assert_eq!(usd.amount(), expected);
    }

    #[test]
    fn prop_sum_equals_fold(currency in currency(), xs in prop::collection::vec(raw_amount(), 0..20)) {
        let items: Vec<Money> = xs.iter().map(|x| currency.amount_of(*x)).collect();
        let total = Money::sum(currency, &items).unwrap();
        let expected: Decimal = items.iter().map(Money::amount).sum();
        prop_assert_eq!(total.amount(), expected);
    }
}
