//! Daily to monthly aggregation

use crate::constants::ZERO_TOLERANCE;
use crate::types::{MonthlyRecord, Rate, RatePoint, RateSeries, YearMonth};

/// Month-level running mean
#[derive(Debug)]
struct MonthAccumulator {
    year_month: YearMonth,
    sum: f64,
    defined: usize,
    observations: usize,
}

impl MonthAccumulator {
    fn new(year_month: YearMonth) -> Self {
        Self {
            year_month,
            sum: 0.0,
            defined: 0,
            observations: 0,
        }
    }

    fn add(&mut self, rate: Option<Rate>) {
        self.observations += 1;
        if let Some(r) = rate {
            self.sum += r;
            self.defined += 1;
        }
    }

    fn average(&self) -> Option<Rate> {
        (self.defined > 0).then(|| self.sum / self.defined as f64)
    }
}

/// Groups a daily series by calendar month
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Group points by month; input is date-ordered so months arrive in order
    fn group_by_month(&self, points: &[RatePoint]) -> Vec<MonthAccumulator> {
        let mut groups: Vec<MonthAccumulator> = Vec::new();

        for point in points {
            let month = YearMonth::of(point.date);
            match groups.last_mut() {
                Some(current) if current.year_month == month => current.add(point.rate),
                _ => {
                    let mut acc = MonthAccumulator::new(month);
                    acc.add(point.rate);
                    groups.push(acc);
                }
            }
        }

        groups
    }

    /// Average rate and percent change for each month present in `series`
    pub fn aggregate(&self, series: &RateSeries) -> Vec<MonthlyRecord> {
        let groups = self.group_by_month(series.points());
        let mut records: Vec<MonthlyRecord> = Vec::with_capacity(groups.len());
        let mut prev_avg: Option<Rate> = None;

        for group in groups {
            let average_rate = group.average();
            let monthly_change = percent_change(prev_avg, average_rate);
            records.push(MonthlyRecord {
                year_month: group.year_month,
                average_rate,
                monthly_change,
                observations: group.observations,
            });
            prev_avg = average_rate;
        }

        log::debug!(
            "Aggregated {} daily points into {} months",
            series.len(),
            records.len()
        );
        records
    }
}

/// Percent change from `prev` to `curr`; undefined for a missing or zero base
fn percent_change(prev: Option<Rate>, curr: Option<Rate>) -> Option<f64> {
    match (prev, curr) {
        (Some(p), Some(c)) if p.abs() > ZERO_TOLERANCE => {
            Some((c - p) / p * 100.0).filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Last defined rate of each month, missing values dropped first
///
/// Months with no defined rate are omitted.
pub fn month_end_rates(series: &RateSeries) -> Vec<(YearMonth, Rate)> {
    let mut out: Vec<(YearMonth, Rate)> = Vec::new();

    for point in series.points() {
        let Some(rate) = point.rate else { continue };
        let month = YearMonth::of(point.date);
        match out.last_mut() {
            Some((m, last)) if *m == month => *last = rate,
            _ => out.push((month, rate)),
        }
    }

    out
}
