//! Core business logic for Purse.
//!
//! This crate contains pure logic with ZERO network dependencies.
//!
//! # Modules
//!
//! - `currency` - Exchange rate providers and conversion
//! - `wallet` - Multi-currency holdings valued through a provider

pub mod currency;
pub mod wallet;

pub use currency::{ExchangeRate, FixedRates, RateError, RateProvider};
pub use wallet::Wallet;
