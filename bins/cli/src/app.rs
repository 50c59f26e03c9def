//! Command-line parsing and command execution.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use purse_core::{FixedRates, RateProvider, Wallet, currency::change};
use purse_rates::{Feed, LiveRates};
use purse_shared::{
    AppConfig, Money,
    config::{RateSourceKind, RatesConfig},
    types::Currency,
};
use rust_decimal::Decimal;
use tracing::info;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about = "Currency-precise money conversion", long_about = None)]
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, env = "PURSE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Adds a fixed rate entry, e.g. "1 EUR = 1.19 USD"
    #[arg(short, long = "rate", value_name = "ENTRY")]
    pub rates: Vec<String>,

    /// Overrides the configured rate source
    #[arg(short, long, value_enum)]
    pub source: Option<Source>,

    #[command(subcommand)]
    pub command: Command,
}

/// Rate source selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Fixed table from config and --rate
    Fixed,
    /// Frankfurter (ECB) reference rates
    Frankfurter,
    /// Coinbase spot rates
    Coinbase,
}

impl From<Source> for RateSourceKind {
    fn from(source: Source) -> Self {
        match source {
            Source::Fixed => Self::Fixed,
            Source::Frankfurter => Self::Frankfurter,
            Source::Coinbase => Self::Coinbase,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Converts an amount into another currency
    Convert {
        /// Amount to convert
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
        /// Currency of the amount
        from: Currency,
        /// Target currency
        to: Currency,
    },
    /// Values several holdings in one currency
    Total {
        /// Currency to value the holdings in
        target: Currency,
        /// Holdings such as "10 EUR"
        #[arg(required = true)]
        holdings: Vec<Money>,
    },
    /// Prints the fixed rate table
    Rates,
}

/// Applies command-line overrides on top of the loaded configuration.
pub fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    config.rates.table.extend(cli.rates.iter().cloned());
    if let Some(source) = cli.source {
        config.rates.source = source.into();
    }
}

/// Runs `command` and returns what should be printed.
pub async fn execute(command: &Command, config: &RatesConfig) -> anyhow::Result<String> {
    match command {
        Command::Convert { amount, from, to } => {
            let provider = provider(config, *from).await?;
            let money = from.amount_of(*amount);
            let converted = change(&money, *to, &provider)
                .with_context(|| format!("Failed to convert {money} to {to}"))?;
            Ok(converted.to_string())
        }
        Command::Total { target, holdings } => {
            let wallet = Wallet::new(holdings.iter().copied())?;
            let provider = provider(config, *target).await?;
            let total = wallet
                .amount(*target, &provider)
                .with_context(|| format!("Failed to value wallet in {target}"))?;
            Ok(total.to_string())
        }
        Command::Rates => {
            let rates = fixed_rates(config)?;
            Ok(match rates.pivot() {
                Some(pivot) => format!("{rates}\nPivot: {pivot}"),
                None => rates.to_string(),
            })
        }
    }
}

fn fixed_rates(config: &RatesConfig) -> anyhow::Result<FixedRates> {
    let rates = FixedRates::parse_entries(&config.table).context("Invalid rate table")?;
    Ok(match config.pivot {
        Some(pivot) => rates.with_pivot(pivot),
        None => rates,
    })
}

/// Builds the configured provider; live feeds are refreshed for `base` first.
async fn provider(config: &RatesConfig, base: Currency) -> anyhow::Result<Box<dyn RateProvider>> {
    let Some(feed) = Feed::from_source(config.source) else {
        let rates = fixed_rates(config)?;
        info!(rates = rates.len(), "Using fixed rate table");
        return Ok(Box::new(rates));
    };

    let live = LiveRates::from_config(feed, config)?;
    let stored = live
        .refresh(base)
        .await
        .with_context(|| format!("Failed to fetch {base} rates from {feed}"))?;
    info!(%feed, stored, "Using live rates");
    Ok(Box::new(live))
}
