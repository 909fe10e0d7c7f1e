//! Analysis configuration
//!
//! Deserializable from any serde format; the CLI reads it from TOML.

use crate::constants::{DEFAULT_DATE_COLUMN, DEFAULT_DATE_FORMATS, DEFAULT_WINDOW, TRADING_DAYS_PER_YEAR};
use crate::currency::CurrencyConfig;
use crate::error::{FxError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Settings shared by every currency in an analysis run
///
/// Omitted fields take their defaults. A currency listed without its own
/// `window`, and every preset when `currencies` is omitted, takes `window`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct AnalysisConfig {
    /// Name of the date column in the rate table
    pub date_column: String,
    /// Window for every currency that does not set its own
    pub window: usize,
    /// Annualization factor for volatility
    pub periods_per_year: f64,
    /// Date formats tried in order when loading tables
    pub date_formats: Vec<String>,
    /// Currencies to analyze
    pub currencies: Vec<CurrencyConfig>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            window: DEFAULT_WINDOW,
            periods_per_year: TRADING_DAYS_PER_YEAR,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            currencies: CurrencyConfig::presets(),
        }
    }
}

/// On-disk shape of [`AnalysisConfig`], every field optional
#[derive(Debug, Deserialize)]
struct ConfigFile {
    date_column: Option<String>,
    window: Option<usize>,
    periods_per_year: Option<f64>,
    date_formats: Option<Vec<String>>,
    currencies: Option<Vec<CurrencyEntry>>,
}

#[derive(Debug, Deserialize)]
struct CurrencyEntry {
    code: String,
    column_key: String,
    display_name: String,
    window: Option<usize>,
}

impl From<ConfigFile> for AnalysisConfig {
    fn from(file: ConfigFile) -> Self {
        let defaults = AnalysisConfig::default();
        let window = file.window.unwrap_or(defaults.window);
        let currencies = match file.currencies {
            Some(entries) => entries
                .into_iter()
                .map(|e| {
                    CurrencyConfig::new(e.code, e.column_key, e.display_name, e.window.unwrap_or(window))
                })
                .collect(),
            None => defaults
                .currencies
                .into_iter()
                .map(|c| c.with_window(window))
                .collect(),
        };

        Self {
            date_column: file.date_column.unwrap_or(defaults.date_column),
            window,
            periods_per_year: file.periods_per_year.unwrap_or(defaults.periods_per_year),
            date_formats: file.date_formats.unwrap_or(defaults.date_formats),
            currencies,
        }
    }
}

impl AnalysisConfig {
    /// Check the configuration for values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(FxError::InvalidWindow(self.window));
        }
        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(FxError::ConfigError(format!(
                "periods_per_year must be positive, got {}",
                self.periods_per_year
            )));
        }
        if self.date_formats.is_empty() {
            return Err(FxError::ConfigError("No date formats configured".to_string()));
        }
        if self.currencies.is_empty() {
            return Err(FxError::ConfigError("No currencies configured".to_string()));
        }

        let mut seen = HashSet::new();
        for currency in &self.currencies {
            if currency.window == 0 {
                return Err(FxError::InvalidWindow(currency.window));
            }
            if !seen.insert(currency.code.to_uppercase()) {
                return Err(FxError::ConfigError(format!(
                    "Duplicate currency code: {}",
                    currency.code
                )));
            }
        }
        Ok(())
    }

    /// Find a configured currency by code, falling back to the built-in presets
    ///
    /// Presets pick up this config's window.
    pub fn currency(&self, code: &str) -> Result<CurrencyConfig> {
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
            .cloned()
            .or_else(|| CurrencyConfig::find_preset(code).map(|c| c.with_window(self.window)))
            .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))
    }

    /// Override the window of every configured currency
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        for currency in &mut self.currencies {
            currency.window = window;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window, 30);
        assert_eq!(config.currencies.len(), 5);
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = AnalysisConfig::default().with_window(0);
        assert!(matches!(config.validate(), Err(FxError::InvalidWindow(0))));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = AnalysisConfig::default();
        let dup = config.currencies[0].clone();
        config.currencies.push(dup);
        assert!(matches!(config.validate(), Err(FxError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_periods() {
        let config = AnalysisConfig {
            periods_per_year: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_currency_lookup() {
        let config = AnalysisConfig {
            currencies: vec![CurrencyConfig::new("EUR", "Euro (EUR)", "Euro", 15)],
            ..Default::default()
        }
        .with_window(15);

        assert_eq!(config.currency("eur").unwrap().column_key, "Euro (EUR)");
        // Presets remain reachable with the configured window
        assert_eq!(config.currency("INR").unwrap().window, 15);
        assert!(matches!(
            config.currency("XXX"),
            Err(FxError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"window": 20}"#).unwrap();
        assert_eq!(config.window, 20);
        assert_eq!(config.date_column, "Date");
        assert_eq!(config.currencies.len(), 5);
    }

    #[test]
    fn test_deserialized_window_reaches_presets() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"window": 20}"#).unwrap();

        assert_eq!(config.currency("RUB").unwrap().window, 20);
        assert!(config.currencies.iter().all(|c| c.window == 20));
    }

    #[test]
    fn test_deserialized_currency_window() {
        let config: AnalysisConfig = serde_json::from_str(
            r#"{
                "window": 10,
                "currencies": [
                    {"code": "EUR", "column_key": " Euro (EUR) ", "display_name": "Euro"},
                    {"code": "GBP", "column_key": "Pound (GBP)", "display_name": "Pound", "window": 45}
                ]
            }"#,
        )
        .unwrap();

        let eur = config.currency("EUR").unwrap();
        assert_eq!(eur.window, 10);
        assert_eq!(eur.column_key, "Euro (EUR)");
        assert_eq!(config.currency("GBP").unwrap().window, 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = AnalysisConfig::default().with_window(12);
        let json = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window, 12);
        assert_eq!(back.currencies, config.currencies);
    }
}
