//! Multi-currency holdings valued through a rate provider.
//!
//! A wallet keeps at most one holding per currency. Valuing it changes every
//! holding into the target currency (each rounded on its own) and adds the
//! results.

use std::collections::BTreeMap;

use purse_shared::{Money, MoneyResult, types::Currency};
use tracing::debug;

use crate::currency::{RateError, RateProvider, change};

/// Holdings in several currencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    holdings: BTreeMap<Currency, Money>,
}

impl Wallet {
    /// Creates a wallet, merging holdings that share a currency.
    pub fn new<I>(holdings: I) -> MoneyResult<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        let mut wallet = Self::default();
        for money in holdings {
            wallet.deposit(money)?;
        }
        Ok(wallet)
    }

    /// Adds `money` to the holding of its currency.
    pub fn deposit(&mut self, money: Money) -> MoneyResult<()> {
        let currency = money.currency();
        let current = self.holding(currency);
        self.holdings.insert(currency, current.checked_add(&money)?);
        Ok(())
    }

    /// The holding in `currency`, zero when absent.
    #[must_use]
    pub fn holding(&self, currency: Currency) -> Money {
        self.holdings
            .get(&currency)
            .copied()
            .unwrap_or_else(|| currency.zero())
    }

    /// Holdings ordered by currency.
    pub fn holdings(&self) -> impl Iterator<Item = &Money> {
        self.holdings.values()
    }

    /// Returns true if the wallet holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Values the whole wallet in `target`.
    ///
    /// Provider errors are returned unchanged.
    pub fn amount<P>(&self, target: Currency, provider: &P) -> Result<Money, RateError>
    where
        P: RateProvider + ?Sized,
    {
        let mut total = target.zero();
        for holding in self.holdings.values() {
            let converted = change(holding, target, provider)?;
            total = total.checked_add(&converted)?;
        }
        debug!(holdings = self.holdings.len(), %total, "Valued wallet");
        Ok(total)
    }
}
