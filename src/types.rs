//! Core series and record types

use crate::error::{FxError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exchange rate (units of currency per unit of base currency)
pub type Rate = f64;

/// A single observation of a rate series; `rate` is `None` when missing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: Option<Rate>,
}

impl RatePoint {
    /// Create a new rate point
    pub fn new(date: NaiveDate, rate: Option<Rate>) -> Self {
        Self { date, rate }
    }
}

/// Date-ordered exchange rate series for one currency
///
/// Dates are strictly ascending. Gaps between dates (weekends, holidays) are
/// allowed, as are missing rate values. NaN rates are stored as missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RateSeries {
    points: Vec<RatePoint>,
}

impl RateSeries {
    /// Build a series, validating ordering and rate values
    pub fn new(points: Vec<RatePoint>) -> Result<Self> {
        let mut validated = Vec::with_capacity(points.len());
        let mut prev: Option<NaiveDate> = None;

        for point in points {
            if let Some(prev_date) = prev {
                if point.date <= prev_date {
                    return Err(FxError::UnsortedSeries { date: point.date });
                }
            }
            prev = Some(point.date);

            let rate = match point.rate {
                Some(r) if r.is_nan() => None,
                Some(r) if r.is_infinite() || r < 0.0 => {
                    return Err(FxError::InvalidInput(format!(
                        "Rate must be finite and non-negative, got {} on {}",
                        r, point.date
                    )));
                }
                other => other,
            };
            validated.push(RatePoint::new(point.date, rate));
        }

        Ok(Self { points: validated })
    }

    /// Build a series of consecutive calendar days starting at `start`
    pub fn daily(start: NaiveDate, rates: &[Option<Rate>]) -> Result<Self> {
        let points = rates
            .iter()
            .enumerate()
            .map(|(i, &rate)| RatePoint::new(start + Duration::days(i as i64), rate))
            .collect();
        Self::new(points)
    }

    /// Wrap points already known to satisfy the series invariants
    pub(crate) fn from_validated(points: Vec<RatePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[RatePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rate values in date order
    pub fn rates(&self) -> Vec<Option<Rate>> {
        self.points.iter().map(|p| p.rate).collect()
    }

    /// Number of missing rate values
    pub fn missing_count(&self) -> usize {
        self.points.iter().filter(|p| p.rate.is_none()).count()
    }

    /// True when no point carries a rate (including the empty series)
    pub fn is_all_missing(&self) -> bool {
        self.points.iter().all(|p| p.rate.is_none())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Calendar month used to group daily observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Create a year-month, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(FxError::InvalidInput(format!("Invalid month: {}", month)));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| FxError::InvalidInput(format!("Invalid year-month: {}", s)))?;
        let year = year
            .parse()
            .map_err(|_| FxError::InvalidInput(format!("Invalid year-month: {}", s)))?;
        let month = month
            .parse()
            .map_err(|_| FxError::InvalidInput(format!("Invalid year-month: {}", s)))?;
        Self::new(year, month)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = FxError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Per-date output of the volatility pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Cleaned rate
    pub rate: Option<Rate>,
    /// Fractional change vs. the previous observation
    pub daily_return: Option<f64>,
    /// Annualized rolling standard deviation of `daily_return`
    pub volatility: Option<f64>,
}

/// Direction of a monthly change, for coloring bar charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSign {
    Positive,
    Negative,
}

impl ChangeSign {
    /// Classify a change; zero counts as positive
    pub fn of(change: f64) -> Self {
        if change < 0.0 {
            ChangeSign::Negative
        } else {
            ChangeSign::Positive
        }
    }
}

impl fmt::Display for ChangeSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeSign::Positive => write!(f, "positive"),
            ChangeSign::Negative => write!(f, "negative"),
        }
    }
}

/// Monthly average rate and its change vs. the previous month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub year_month: YearMonth,
    /// Mean of the cleaned daily rates in the month
    pub average_rate: Option<Rate>,
    /// Percent change of `average_rate` vs. the previous month
    pub monthly_change: Option<f64>,
    /// Number of daily records in the month
    pub observations: usize,
}

impl MonthlyRecord {
    /// Sign of the monthly change, if defined
    pub fn change_sign(&self) -> Option<ChangeSign> {
        self.monthly_change.map(ChangeSign::of)
    }
}
