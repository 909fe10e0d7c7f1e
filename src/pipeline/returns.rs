//! Daily returns and annualized rolling volatility
//!
//! Returns are simple fractional changes between consecutive observations.
//! Volatility is the sample standard deviation of the trailing `window`
//! returns, scaled by the square root of the periods per year.

use crate::constants::{DEFAULT_WINDOW, TRADING_DAYS_PER_YEAR, ZERO_TOLERANCE};
use crate::error::{FxError, Result};
use crate::types::{DailyRecord, Rate, RateSeries};
use statrs::statistics::{Data, Distribution};
use std::collections::VecDeque;

/// DailyReturns - Single period simple returns
#[derive(Debug, Clone, Default)]
pub struct DailyReturns {
    prev_rate: Option<Rate>,
}

impl DailyReturns {
    /// Create new DailyReturns factor
    pub fn new() -> Self {
        Self { prev_rate: None }
    }

    /// Update with the next rate
    ///
    /// Undefined (missing or zero prior rate, missing current rate, or a
    /// quotient that overflows) yields `None` for this point only.
    pub fn update(&mut self, rate: Option<Rate>) -> Option<f64> {
        let ret = match (self.prev_rate, rate) {
            (Some(prev), Some(curr)) if prev.abs() > ZERO_TOLERANCE => {
                Some((curr - prev) / prev).filter(|r| r.is_finite())
            }
            _ => None,
        };
        self.prev_rate = rate;
        ret
    }

    /// Compute daily returns for a slice of rates
    pub fn compute(rates: &[Option<Rate>]) -> Vec<Option<f64>> {
        let mut returns = Self::new();
        rates.iter().map(|&r| returns.update(r)).collect()
    }
}

/// RollingVolatility - Annualized rolling sample standard deviation of returns
#[derive(Debug, Clone)]
pub struct RollingVolatility {
    window: usize,
    returns: VecDeque<Option<f64>>,
    annualization_factor: f64,
}

impl RollingVolatility {
    /// Create new rolling volatility
    /// periods_per_year: 252 for daily, 52 for weekly, etc.
    pub fn new(window: usize, periods_per_year: f64) -> Result<Self> {
        if window == 0 {
            return Err(FxError::InvalidWindow(window));
        }
        Ok(Self {
            window,
            returns: VecDeque::with_capacity(window),
            annualization_factor: periods_per_year.sqrt(),
        })
    }

    /// Update with the next return (`None` for an undefined return)
    pub fn update(&mut self, ret: Option<f64>) -> Option<f64> {
        self.returns.push_back(ret);
        if self.returns.len() > self.window {
            self.returns.pop_front();
        }

        if self.returns.len() < self.window {
            return None;
        }

        let window_returns: Option<Vec<f64>> = self.returns.iter().copied().collect();
        let data = Data::new(window_returns?);
        data.std_dev()
            .filter(|sd| sd.is_finite())
            .map(|sd| sd * self.annualization_factor)
    }
}

/// Builds the daily record sequence (rate, return, volatility)
#[derive(Debug, Clone, Copy)]
pub struct ReturnVolatilityCalculator {
    window: usize,
    periods_per_year: f64,
}

impl ReturnVolatilityCalculator {
    /// Create a calculator annualizing over 252 trading days
    pub fn new(window: usize) -> Result<Self> {
        Self::with_periods_per_year(window, TRADING_DAYS_PER_YEAR)
    }

    /// Create a calculator with a custom annualization factor
    pub fn with_periods_per_year(window: usize, periods_per_year: f64) -> Result<Self> {
        if window == 0 {
            return Err(FxError::InvalidWindow(window));
        }
        if !(periods_per_year.is_finite() && periods_per_year > 0.0) {
            return Err(FxError::ConfigError(format!(
                "periods_per_year must be positive, got {}",
                periods_per_year
            )));
        }
        Ok(Self {
            window,
            periods_per_year,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Compute daily records for a cleaned series
    pub fn compute(&self, series: &RateSeries) -> Result<Vec<DailyRecord>> {
        let mut returns = DailyReturns::new();
        let mut volatility = RollingVolatility::new(self.window, self.periods_per_year)?;

        Ok(series
            .points()
            .iter()
            .map(|point| {
                let daily_return = returns.update(point.rate);
                DailyRecord {
                    date: point.date,
                    rate: point.rate,
                    daily_return,
                    volatility: volatility.update(daily_return),
                }
            })
            .collect())
    }
}

impl Default for ReturnVolatilityCalculator {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}
