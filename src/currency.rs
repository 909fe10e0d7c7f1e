//! Currency definitions and per-currency analysis settings

use crate::constants::DEFAULT_WINDOW;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies with built-in column mappings (ISO 4217 codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// South African Rand
    ZAR,
    /// Russian Ruble
    RUB,
    /// Indian Rupee
    INR,
    /// Brazilian Real
    BRL,
    /// Chinese Yuan
    CNY,
}

impl Currency {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ZAR => "ZAR",
            Currency::RUB => "RUB",
            Currency::INR => "INR",
            Currency::BRL => "BRL",
            Currency::CNY => "CNY",
        }
    }

    /// Column header used for this currency in rate tables
    pub fn column_key(&self) -> &'static str {
        match self {
            Currency::ZAR => "South African rand (ZAR)",
            Currency::RUB => "Russian ruble (RUB)",
            Currency::INR => "Indian rupee (INR)",
            Currency::BRL => "Brazilian real (BRL)",
            Currency::CNY => "Chinese yuan (CNY)",
        }
    }

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::ZAR => "South African Rand (ZAR)",
            Currency::RUB => "Russian Ruble (RUB)",
            Currency::INR => "Indian Rupee (INR)",
            Currency::BRL => "Brazilian Real (BRL)",
            Currency::CNY => "Chinese Yuan (CNY)",
        }
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "ZAR" => Some(Currency::ZAR),
            "RUB" => Some(Currency::RUB),
            "INR" => Some(Currency::INR),
            "BRL" => Some(Currency::BRL),
            "CNY" => Some(Currency::CNY),
            _ => None,
        }
    }

    /// Get all built-in currencies
    pub fn all() -> Vec<Currency> {
        vec![
            Currency::ZAR,
            Currency::RUB,
            Currency::INR,
            Currency::BRL,
            Currency::CNY,
        ]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Settings for analyzing one currency column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Short identifier, usually the ISO code
    pub code: String,
    /// Column header in the rate table (matched after trimming)
    pub column_key: String,
    /// Name used in reports
    pub display_name: String,
    /// Rolling volatility window in observations
    #[serde(default = "default_window")]
    pub window: usize,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

impl CurrencyConfig {
    /// Create a config; the column key is trimmed
    pub fn new(
        code: impl Into<String>,
        column_key: impl AsRef<str>,
        display_name: impl Into<String>,
        window: usize,
    ) -> Self {
        Self {
            code: code.into(),
            column_key: column_key.as_ref().trim().to_string(),
            display_name: display_name.into(),
            window,
        }
    }

    /// Config for a built-in currency with the default window
    pub fn preset(currency: Currency) -> Self {
        Self::new(
            currency.code(),
            currency.column_key(),
            currency.display_name(),
            DEFAULT_WINDOW,
        )
    }

    /// Configs for all built-in currencies
    pub fn presets() -> Vec<Self> {
        Currency::all().into_iter().map(Self::preset).collect()
    }

    /// Look up a built-in config by code (case-insensitive)
    pub fn find_preset(code: &str) -> Option<Self> {
        Currency::from_code(code).map(Self::preset)
    }

    /// Same config with a different window
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }
}

impl fmt::Display for CurrencyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.display_name, self.code)
    }
}
