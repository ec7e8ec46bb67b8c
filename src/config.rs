//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Default rates endpoint: daily EUR-based table, no authentication.
pub const DEFAULT_RATES_URL: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/eur.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rates endpoint URL.
    pub rates_url: String,
    /// Maximum result rows per query.
    pub max_results: u32,
    /// Maximum acceptable snapshot age in seconds. Accepted for forward
    /// compatibility with a rate cache; the handler currently fetches fresh
    /// rates for every query that needs them.
    pub max_age: u64,
    pub format: NumberFormat,
}

/// Explicit number-formatting settings, instead of process-wide locale state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimal_separator: String,
    pub group_separator: String,
    pub grouping: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            max_results: 8,
            max_age: 3600,
            format: NumberFormat::default(),
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            grouping: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("valuta")
            .join("config.toml")
    }

    /// Load config from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_path();

        let mut config = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!(error = %e, "failed to parse config, using defaults");
                        Self::default()
                    }
                },
                Err(e) => {
                    warn!(error = %e, "failed to read config, using defaults");
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        self.max_results = self.max_results.clamp(1, 20);

        if self.rates_url.trim().is_empty() {
            self.rates_url = DEFAULT_RATES_URL.to_string();
        }

        // Identical separators would make formatted numbers unreadable.
        if self.format.decimal_separator == self.format.group_separator {
            self.format = NumberFormat::default();
        }
    }
}
