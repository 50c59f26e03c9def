//! Application configuration management.

use std::path::Path;

use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Exchange rate configuration.
    #[serde(default)]
    pub rates: RatesConfig,
}

/// Where exchange rates come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSourceKind {
    /// A fixed table of rates written in the configuration.
    #[default]
    Fixed,
    /// ECB reference rates served by the Frankfurter API.
    Frankfurter,
    /// Coinbase spot exchange rates.
    Coinbase,
}

/// Exchange rate configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Provider to use.
    #[serde(default)]
    pub source: RateSourceKind,
    /// Fixed table entries, e.g. `1 EUR = 1.19 USD`.
    #[serde(default)]
    pub table: Vec<String>,
    /// Currency used to triangulate pairs missing from the fixed table.
    #[serde(default)]
    pub pivot: Option<Currency>,
    /// Overrides the live feed base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// HTTP timeout for live feeds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Age after which a live quote is no longer served.
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_age_secs() -> u64 {
    300 // 5 minutes
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            source: RateSourceKind::default(),
            table: Vec::new(),
            pivot: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
            max_age_secs: default_max_age_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, layering `file` (when given) over the default files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// `file`, then `PURSE__*` environment variables. `PURSE__RATES__TABLE`
    /// holds `;`-separated table entries.
    ///
    /// # Errors
    ///
    /// Returns an error if `file` is missing or any source is malformed.
    pub fn load_from(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("PURSE")
                    .separator("__")
                    .list_separator(";")
                    .with_list_parse_key("rates.table")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.rates.source, RateSourceKind::Fixed);
        assert!(config.rates.table.is_empty());
        assert_eq!(config.rates.pivot, None);
        assert_eq!(config.rates.timeout_secs, 10);
        assert_eq!(config.rates.max_age_secs, 300);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "PURSE__RATES__SOURCE",
                "PURSE__RATES__TABLE",
                "PURSE__RATES__PIVOT",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.rates.source, RateSourceKind::Fixed);
                assert_eq!(config.rates.timeout_secs, 10);
            },
        );
    }

    #[test]
    fn test_load_from_env() {
        temp_env::with_vars(
            [
                ("PURSE__RATES__SOURCE", Some("coinbase")),
                ("PURSE__RATES__TABLE", Some("1 EUR = 1.19 USD;1 XBT = 40000 EUR")),
                ("PURSE__RATES__PIVOT", Some("EUR")),
                ("PURSE__RATES__MAX_AGE_SECS", Some("60")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.rates.source, RateSourceKind::Coinbase);
                assert_eq!(
                    config.rates.table,
                    vec!["1 EUR = 1.19 USD".to_string(), "1 XBT = 40000 EUR".to_string()]
                );
                assert_eq!(config.rates.pivot, Some(Currency::Eur));
                assert_eq!(config.rates.max_age_secs, 60);
            },
        );
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = AppConfig::load_from(Some(Path::new("does/not/exist.toml")));
        assert!(result.is_err());
    }
}
