//! Currency volatility analysis pipeline
//!
//! One pipeline serves every currency. Each run is a pure transform chain:
//!
//! ```text
//! RateSeries -> DataCleaner -> ReturnVolatilityCalculator -> daily records
//!                           -> MonthlyAggregator          -> monthly records
//!                                                         -> SummaryStats
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fx_volatility::currency::CurrencyConfig;
//! use fx_volatility::pipeline::VolatilityPipeline;
//! use fx_volatility::types::RateSeries;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let series = RateSeries::daily(start, &[Some(10.0), None, Some(11.0), Some(9.0)]).unwrap();
//!
//! let config = CurrencyConfig::new("TST", "Test (TST)", "Test", 2);
//! let analysis = VolatilityPipeline::new(config).unwrap().run(&series).unwrap();
//!
//! assert_eq!(analysis.daily.len(), 4);
//! assert_eq!(analysis.daily[1].rate, Some(10.0));
//! assert_eq!(analysis.monthly.len(), 1);
//! ```

pub mod cleaning;
pub mod monthly;
pub mod returns;
pub mod summary;

pub use cleaning::{CleaningReport, DataCleaner};
pub use monthly::{month_end_rates, MonthlyAggregator};
pub use returns::{DailyReturns, ReturnVolatilityCalculator, RollingVolatility};
pub use summary::{SummaryStats, SummaryStatsCalculator};

use crate::config::AnalysisConfig;
use crate::constants::TRADING_DAYS_PER_YEAR;
use crate::currency::CurrencyConfig;
use crate::data::RateTable;
use crate::error::{FxError, Result};
use crate::types::{DailyRecord, MonthlyRecord, RateSeries};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Full output of one currency's analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAnalysis {
    pub currency: String,
    pub display_name: String,
    pub window: usize,
    pub daily: Vec<DailyRecord>,
    pub monthly: Vec<MonthlyRecord>,
    pub summary: SummaryStats,
}

/// Volatility pipeline bound to one currency's settings
#[derive(Debug, Clone)]
pub struct VolatilityPipeline {
    config: CurrencyConfig,
    cleaner: DataCleaner,
    calculator: ReturnVolatilityCalculator,
    aggregator: MonthlyAggregator,
}

impl VolatilityPipeline {
    /// Create a pipeline annualizing over 252 trading days
    pub fn new(config: CurrencyConfig) -> Result<Self> {
        Self::with_periods_per_year(config, TRADING_DAYS_PER_YEAR)
    }

    /// Create a pipeline with a custom annualization factor
    pub fn with_periods_per_year(config: CurrencyConfig, periods_per_year: f64) -> Result<Self> {
        let calculator =
            ReturnVolatilityCalculator::with_periods_per_year(config.window, periods_per_year)?;
        Ok(Self {
            config,
            cleaner: DataCleaner::new(),
            calculator,
            aggregator: MonthlyAggregator::new(),
        })
    }

    pub fn config(&self) -> &CurrencyConfig {
        &self.config
    }

    /// Run the full analysis on a raw (uncleaned) series
    pub fn run(&self, series: &RateSeries) -> Result<CurrencyAnalysis> {
        log::info!(
            "Analyzing {} ({} observations, window {})",
            self.config.code,
            series.len(),
            self.config.window
        );

        let (cleaned, report) = self.cleaner.clean_with_report(series);
        if report.still_missing > 0 {
            log::warn!(
                "{}: no rate values present, analysis will be empty",
                self.config.code
            );
        }

        let daily = self.calculator.compute(&cleaned)?;
        let monthly = self.aggregator.aggregate(&cleaned);
        let summary = SummaryStatsCalculator::new(self.config.window).summarize(&daily, &monthly);

        Ok(CurrencyAnalysis {
            currency: self.config.code.clone(),
            display_name: self.config.display_name.clone(),
            window: self.config.window,
            daily,
            monthly,
            summary,
        })
    }
}

/// Outcome of one currency in a multi-currency run
#[derive(Debug)]
pub struct CurrencyOutcome {
    pub code: String,
    /// Rate table column the currency was read from
    pub column_key: String,
    pub result: Result<CurrencyAnalysis>,
}

/// Analyze one currency column of a rate table
pub fn analyze_currency(
    table: &RateTable,
    currency: &CurrencyConfig,
    periods_per_year: f64,
) -> Result<CurrencyAnalysis> {
    let series = table.series(&currency.column_key)?;
    VolatilityPipeline::with_periods_per_year(currency.clone(), periods_per_year)?.run(&series)
}

/// Analyze several currencies in parallel
///
/// Each currency succeeds or fails independently; outcomes keep input order.
pub fn analyze_table(
    table: &RateTable,
    currencies: &[CurrencyConfig],
    periods_per_year: f64,
) -> Vec<CurrencyOutcome> {
    currencies
        .par_iter()
        .map(|currency| {
            let result = analyze_currency(table, currency, periods_per_year);
            if let Err(e) = &result {
                log::warn!("Analysis failed for {}: {}", currency.code, e);
            }
            CurrencyOutcome {
                code: currency.code.clone(),
                column_key: currency.column_key.clone(),
                result,
            }
        })
        .collect()
}

/// Validate `config` and analyze every currency it lists
pub fn analyze_config(table: &RateTable, config: &AnalysisConfig) -> Result<Vec<CurrencyOutcome>> {
    config.validate()?;
    if table.is_empty() {
        return Err(FxError::InvalidInput("Rate table has no rows".to_string()));
    }
    Ok(analyze_table(table, &config.currencies, config.periods_per_year))
}
