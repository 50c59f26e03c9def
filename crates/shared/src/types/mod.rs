//! Money and currency value types.

pub mod currency;
pub mod money;

#[cfg(test)]
mod money_props;

pub use currency::Currency;
pub use money::Money;
