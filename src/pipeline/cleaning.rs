//! Missing-value imputation for rate series
//!
//! Gaps are filled with the last known rate (forward-fill); a leading gap is
//! filled with the first known rate (backward-fill). A series with no known
//! rate at all is left untouched.

use crate::types::{RatePoint, RateSeries};

/// Counts of what a cleaning pass changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleaningReport {
    pub forward_filled: usize,
    pub backward_filled: usize,
    pub still_missing: usize,
}

/// Forward-fill then backward-fill cleaner
#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

impl DataCleaner {
    /// Create a new cleaner
    pub fn new() -> Self {
        Self
    }

    /// Clean a series, discarding the report
    pub fn clean(&self, series: &RateSeries) -> RateSeries {
        self.clean_with_report(series).0
    }

    /// Clean a series and report how many values were imputed
    pub fn clean_with_report(&self, series: &RateSeries) -> (RateSeries, CleaningReport) {
        let mut report = CleaningReport::default();
        let mut points: Vec<RatePoint> = series.points().to_vec();

        let mut last_known = None;
        for point in points.iter_mut() {
            match point.rate {
                Some(rate) => last_known = Some(rate),
                None => {
                    if let Some(rate) = last_known {
                        point.rate = Some(rate);
                        report.forward_filled += 1;
                    }
                }
            }
        }

        // Only a leading run can still be missing here
        if let Some(first_known) = points.iter().find_map(|p| p.rate) {
            for point in points.iter_mut().take_while(|p| p.rate.is_none()) {
                point.rate = Some(first_known);
                report.backward_filled += 1;
            }
        } else {
            report.still_missing = points.len();
        }

        log::debug!(
            "Cleaned {} points: {} forward-filled, {} backward-filled, {} still missing",
            points.len(),
            report.forward_filled,
            report.backward_filled,
            report.still_missing
        );

        (RateSeries::from_validated(points), report)
    }
}
