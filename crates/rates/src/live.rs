//! Live rate provider with a quote cache.
//!
//! Quotes are fetched asynchronously with [`LiveRates::refresh`] and served
//! synchronously from the cache through [`RateProvider`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use purse_core::{RateError, RateProvider, currency::validate_rate};
use purse_shared::{config::RatesConfig, types::Currency};
use reqwest::Client as ReqwestClient;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::error::LiveRatesError;
use crate::feed::Feed;

/// A cached rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// 1 unit of the source currency in the target currency.
    pub rate: Decimal,
    /// When the feed answered.
    pub fetched_at: DateTime<Utc>,
}

/// Rate provider fed by a public HTTP feed.
#[derive(Debug)]
pub struct LiveRates {
    client: ReqwestClient,
    feed: Feed,
    base_url: String,
    max_age: chrono::Duration,
    quotes: DashMap<(Currency, Currency), Quote>,
}

impl LiveRates {
    /// Creates a provider for `feed` with default settings.
    pub fn new(feed: Feed) -> Result<Self, LiveRatesError> {
        Self::from_config(feed, &RatesConfig::default())
    }

    /// Creates a provider for `feed` using timeout, age and URL settings from `config`.
    pub fn from_config(feed: Feed, config: &RatesConfig) -> Result<Self, LiveRatesError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| feed.default_base_url().to_string());
        let max_age = i64::try_from(config.max_age_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX);

        Ok(Self {
            client,
            feed,
            base_url,
            max_age,
            quotes: DashMap::new(),
        })
    }

    /// The feed quotes come from.
    #[must_use]
    pub const fn feed(&self) -> Feed {
        self.feed
    }

    /// Fetches every quote for `base` and stores it. Returns how many were stored.
    pub async fn refresh(&self, base: Currency) -> Result<usize, LiveRatesError> {
        let url = self.feed.url(&self.base_url, base)?;
        debug!(feed = %self.feed, %url, "Fetching rates");

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let fetched_at = Utc::now();
        let mut stored = 0;
        for (target, rate) in self.feed.parse(base, &body)? {
            match self.insert_quote(base, target, rate, fetched_at) {
                Ok(()) => stored += 1,
                Err(e) => warn!(feed = %self.feed, error = %e, "Discarding quote"),
            }
        }

        info!(feed = %self.feed, %base, stored, "Refreshed rates");
        Ok(stored)
    }

    /// Refreshes every currency the feed supports.
    pub async fn refresh_all(&self) -> Result<usize, LiveRatesError> {
        let mut stored = 0;
        for base in self.feed.currencies() {
            stored += self.refresh(base).await?;
        }
        Ok(stored)
    }

    /// Stores a quote, rejecting non-positive rates.
    pub fn insert_quote(
        &self,
        from: Currency,
        to: Currency,
        rate: Decimal,
        fetched_at: DateTime<Utc>,
    ) -> Result<(), RateError> {
        let rate = validate_rate(from, to, rate)?;
        self.quotes.insert((from, to), Quote { rate, fetched_at });
        Ok(())
    }

    /// The cached quote for exactly this pair.
    #[must_use]
    pub fn quote(&self, from: Currency, to: Currency) -> Option<Quote> {
        self.quotes.get(&(from, to)).map(|entry| *entry.value())
    }

    fn fresh(&self, from: Currency, to: Currency, quote: Quote) -> Result<Quote, RateError> {
        let age = Utc::now() - quote.fetched_at;
        if age > self.max_age {
            return Err(RateError::Stale {
                from,
                to,
                age_secs: age.num_seconds(),
            });
        }
        Ok(quote)
    }
}

impl RateProvider for LiveRates {
    fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, RateError> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        if self.quotes.is_empty() {
            return Err(RateError::Unavailable(format!(
                "no quotes fetched from {}",
                self.feed
            )));
        }

        if let Some(quote) = self.quote(from, to) {
            return Ok(self.fresh(from, to, quote)?.rate);
        }

        if let Some(quote) = self.quote(to, from) {
            let quote = self.fresh(from, to, quote)?;
            let inverse = Decimal::ONE.checked_div(quote.rate).unwrap_or_default();
            return validate_rate(from, to, inverse);
        }

        Err(RateError::UnknownPair { from, to })
    }
}
