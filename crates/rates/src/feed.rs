//! Public rate feeds: request URLs and response bodies.

use std::collections::HashMap;

use purse_shared::{config::RateSourceKind, types::Currency};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::LiveRatesError;

/// A public HTTP feed of exchange rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// ECB reference rates served by the Frankfurter API. Fiat only.
    Frankfurter,
    /// Coinbase spot rates, including bitcoin.
    Coinbase,
}

#[derive(Deserialize)]
struct FrankfurterResponse {
    base: String,
    rates: HashMap<String, Decimal>,
}

#[derive(Deserialize)]
struct CoinbaseResponse {
    data: CoinbaseData,
}

#[derive(Deserialize)]
struct CoinbaseData {
    currency: String,
    rates: HashMap<String, Decimal>,
}

impl Feed {
    /// Maps a configured source to a feed; `None` for the fixed table.
    #[must_use]
    pub const fn from_source(source: RateSourceKind) -> Option<Self> {
        match source {
            RateSourceKind::Fixed => None,
            RateSourceKind::Frankfurter => Some(Self::Frankfurter),
            RateSourceKind::Coinbase => Some(Self::Coinbase),
        }
    }

    /// Public endpoint used when no override is configured.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Frankfurter => "https://api.frankfurter.app",
            Self::Coinbase => "https://api.coinbase.com",
        }
    }

    /// Returns true if the feed quotes `currency`.
    #[must_use]
    pub const fn supports(self, currency: Currency) -> bool {
        match self {
            Self::Frankfurter => !matches!(currency, Currency::Xbt),
            Self::Coinbase => true,
        }
    }

    /// Currencies quoted by this feed.
    pub fn currencies(self) -> impl Iterator<Item = Currency> {
        Currency::ALL.into_iter().filter(move |c| self.supports(*c))
    }

    /// Code the feed uses for `currency`.
    const fn code(self, currency: Currency) -> &'static str {
        match (self, currency) {
            (Self::Coinbase, Currency::Xbt) => "BTC",
            _ => currency.code(),
        }
    }

    /// URL returning every quote for `base`.
    pub fn url(self, base_url: &str, base: Currency) -> Result<String, LiveRatesError> {
        if !self.supports(base) {
            return Err(LiveRatesError::UnsupportedCurrency(base));
        }
        let base_url = base_url.trim_end_matches('/');
        let code = self.code(base);

        let url = match self {
            Self::Frankfurter => {
                let targets = self
                    .currencies()
                    .filter(|c| *c != base)
                    .map(|c| self.code(c))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{base_url}/latest?from={code}&to={targets}")
            }
            Self::Coinbase => format!("{base_url}/v2/exchange-rates?currency={code}"),
        };
        Ok(url)
    }

    /// Extracts `(target, rate)` quotes for `base` from a response body.
    ///
    /// Codes outside the supported set are skipped.
    pub fn parse(self, base: Currency, body: &str) -> Result<Vec<(Currency, Decimal)>, LiveRatesError> {
        let (quoted_base, rates) = match self {
            Self::Frankfurter => {
                let response: FrankfurterResponse = serde_json::from_str(body)?;
                (response.base, response.rates)
            }
            Self::Coinbase => {
                let response: CoinbaseResponse = serde_json::from_str(body)?;
                (response.data.currency, response.data.rates)
            }
        };

        if quoted_base.parse::<Currency>().ok() != Some(base) {
            return Err(LiveRatesError::UnexpectedResponse(format!(
                "asked for {base} quotes, got {quoted_base}"
            )));
        }

        let mut quotes: Vec<(Currency, Decimal)> = rates
            .into_iter()
            .filter_map(|(code, rate)| match code.parse::<Currency>() {
                Ok(currency) if currency != base => Some((currency, rate)),
                Ok(_) => None,
                Err(_) => {
                    debug!(%code, "Skipping unsupported currency");
                    None
                }
            })
            .collect();
        quotes.sort_by_key(|(currency, _)| *currency);
        Ok(quotes)
    }
}

impl std::fmt::Display for Feed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Frankfurter => f.write_str("frankfurter"),
            Self::Coinbase => f.write_str("coinbase"),
        }
    }
}
