//! Text reports and CSV/JSON export of analysis results
//!
//! Number formatting lives here, not in the pipeline: rates print with four
//! decimals, volatility as a percentage with four decimals and monthly changes
//! as a percentage with two decimals.

use crate::error::Result;
use crate::pipeline::{month_end_rates, CurrencyAnalysis, SummaryStats};
use crate::types::{ChangeSign, RateSeries};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

const UNDEFINED: &str = "insufficient data";

fn fmt_rate(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| format!("{:.4}", v))
}

fn fmt_fraction_pct(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| format!("{:.*}%", decimals, v * 100.0))
}

fn fmt_pct(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| format!("{:.*}%", decimals, v))
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Exchange Rate: {}", fmt_rate(self.average_rate))?;
        writeln!(f, "Maximum Exchange Rate: {}", fmt_rate(self.max_rate))?;
        writeln!(f, "Minimum Exchange Rate: {}", fmt_rate(self.min_rate))?;
        writeln!(
            f,
            "Average Volatility: {}",
            fmt_fraction_pct(self.average_volatility, 4)
        )?;
        writeln!(
            f,
            "Maximum Monthly Change: {}",
            fmt_pct(self.max_monthly_change, 2)
        )?;
        writeln!(
            f,
            "Minimum Monthly Change: {}",
            fmt_pct(self.min_monthly_change, 2)
        )?;
        Ok(())
    }
}

impl fmt::Display for CurrencyAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Summary Statistics:", self.display_name)?;
        write!(f, "{}", self.summary)
    }
}

#[derive(Serialize)]
struct DailyRow {
    date: NaiveDate,
    rate: Option<f64>,
    daily_return: Option<f64>,
    volatility: Option<f64>,
}

#[derive(Serialize)]
struct MonthlyRow {
    year_month: String,
    average_rate: Option<f64>,
    monthly_change: Option<f64>,
    observations: usize,
    sign: Option<ChangeSign>,
}

#[derive(Serialize)]
struct MonthEndRow {
    year_month: String,
    rate: f64,
}

impl CurrencyAnalysis {
    /// Write the daily series (date, rate, return, volatility) as CSV
    pub fn write_daily_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for d in &self.daily {
            wtr.serialize(DailyRow {
                date: d.date,
                rate: d.rate,
                daily_return: d.daily_return,
                volatility: d.volatility,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the monthly series with change signs for bar coloring as CSV
    pub fn write_monthly_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for m in &self.monthly {
            wtr.serialize(MonthlyRow {
                year_month: m.year_month.to_string(),
                average_rate: m.average_rate,
                monthly_change: m.monthly_change,
                observations: m.observations,
                sign: m.change_sign(),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Serialize the whole analysis as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write `<code>_daily.csv` and `<code>_monthly.csv` into `dir`
    pub fn export_csv(&self, dir: &Path) -> Result<()> {
        let code = self.currency.to_lowercase();
        self.write_daily_csv(File::create(dir.join(format!("{}_daily.csv", code)))?)?;
        self.write_monthly_csv(File::create(dir.join(format!("{}_monthly.csv", code)))?)?;
        log::info!("Exported {} CSV files to {}", self.currency, dir.display());
        Ok(())
    }

    /// Write `<code>.json` into `dir`
    pub fn export_json(&self, dir: &Path) -> Result<()> {
        let path = dir.join(format!("{}.json", self.currency.to_lowercase()));
        std::fs::write(&path, self.to_json()?)?;
        log::info!("Exported {} JSON to {}", self.currency, path.display());
        Ok(())
    }
}

/// Write the month-end rate of each month as CSV
pub fn write_month_end_csv<W: io::Write>(series: &RateSeries, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (year_month, rate) in month_end_rates(series) {
        wtr.serialize(MonthEndRow {
            year_month: year_month.to_string(),
            rate,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
