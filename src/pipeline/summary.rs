//! Summary statistics over pipeline outputs

use crate::error::{FxError, Result};
use crate::types::{DailyRecord, MonthlyRecord, Rate};
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one currency
///
/// Every statistic is `None` when there is no data to compute it from; this
/// is reported as insufficient data, never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of daily records summarized
    pub observations: usize,
    /// Rolling window the volatility was computed with
    pub window: usize,
    pub average_rate: Option<Rate>,
    pub max_rate: Option<Rate>,
    pub min_rate: Option<Rate>,
    /// Mean annualized volatility (fraction)
    pub average_volatility: Option<f64>,
    /// Largest monthly change (percent)
    pub max_monthly_change: Option<f64>,
    /// Smallest monthly change (percent)
    pub min_monthly_change: Option<f64>,
}

impl SummaryStats {
    /// Whether enough daily records exist for a volatility estimate
    pub fn has_sufficient_data(&self) -> bool {
        self.average_volatility.is_some()
    }

    /// Average volatility, or `InsufficientData` when it is undefined
    pub fn require_average_volatility(&self) -> Result<f64> {
        self.average_volatility.ok_or(FxError::InsufficientData {
            required: self.window + 1,
            available: self.observations,
        })
    }

    /// Average rate, or `InsufficientData` when no rate is defined
    pub fn require_average_rate(&self) -> Result<Rate> {
        self.average_rate.ok_or(FxError::InsufficientData {
            required: 1,
            available: 0,
        })
    }
}

/// Computes [`SummaryStats`] from daily and monthly records
#[derive(Debug, Clone, Copy)]
pub struct SummaryStatsCalculator {
    window: usize,
}

impl SummaryStatsCalculator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn summarize(&self, daily: &[DailyRecord], monthly: &[MonthlyRecord]) -> SummaryStats {
        let rates = Extremes::from_values(daily.iter().filter_map(|d| d.rate));
        let volatility = Extremes::from_values(daily.iter().filter_map(|d| d.volatility));
        let changes = Extremes::from_values(monthly.iter().filter_map(|m| m.monthly_change));

        if volatility.is_none() {
            log::warn!(
                "Insufficient data for volatility: {} daily records, window {}",
                daily.len(),
                self.window
            );
        }

        SummaryStats {
            observations: daily.len(),
            window: self.window,
            average_rate: rates.map(|e| e.mean),
            max_rate: rates.map(|e| e.max),
            min_rate: rates.map(|e| e.min),
            average_volatility: volatility.map(|e| e.mean),
            max_monthly_change: changes.map(|e| e.max),
            min_monthly_change: changes.map(|e| e.min),
        }
    }
}

/// Mean, max and min of a non-empty set of values
#[derive(Debug, Clone, Copy)]
struct Extremes {
    mean: f64,
    max: f64,
    min: f64,
}

impl Extremes {
    fn from_values(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;

        for v in values {
            count += 1;
            sum += v;
            max = max.max(v);
            min = min.min(v);
        }

        (count > 0).then(|| Self {
            mean: sum / count as f64,
            max,
            min,
        })
    }
}
