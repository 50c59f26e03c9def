//! Live exchange rate providers for Purse.
//!
//! Two public feeds are supported:
//! - `Frankfurter` - ECB reference rates for fiat currencies
//! - `Coinbase` - spot rates including bitcoin
//!
//! Quotes are refreshed over HTTP and cached; lookups never block on the
//! network.

pub mod error;
pub mod feed;
pub mod live;

pub use error::LiveRatesError;
pub use feed::Feed;
pub use live::{LiveRates, Quote};
