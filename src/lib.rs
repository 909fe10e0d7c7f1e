//! # fx_volatility
//!
//! Volatility analysis for foreign-exchange rate series.
//!
//! For each currency the pipeline fills missing rates, computes daily returns
//! and an annualized rolling volatility, aggregates monthly average rates with
//! their percent changes, and summarizes the result.
//!
//! ## Example
//!
//! ```rust
//! use fx_volatility::prelude::*;
//!
//! let csv = "Date,Chinese yuan (CNY)   \n2024-01-02,7.10\n2024-01-03,\n2024-01-04,7.15\n";
//! let table = RateTableReader::new().read(csv.as_bytes()).unwrap();
//!
//! let config = CurrencyConfig::preset(Currency::CNY).with_window(1);
//! let analysis = analyze_currency(&table, &config, TRADING_DAYS_PER_YEAR).unwrap();
//!
//! assert_eq!(analysis.daily[1].rate, Some(7.10));
//! assert_eq!(analysis.summary.average_volatility, None);
//! ```

pub mod config;
pub mod constants;
pub mod currency;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::config::AnalysisConfig;
    pub use crate::constants::{DEFAULT_WINDOW, TRADING_DAYS_PER_YEAR};
    pub use crate::currency::{Currency, CurrencyConfig};
    pub use crate::data::{RateTable, RateTableReader};
    pub use crate::error::{FxError, Result};
    pub use crate::pipeline::{
        analyze_config, analyze_currency, analyze_table, CurrencyAnalysis, CurrencyOutcome,
        SummaryStats, VolatilityPipeline,
    };
    pub use crate::types::*;
}
