//! CSV loading for wide exchange rate tables
//!
//! A rate table has one date column and one column per currency. Headers are
//! trimmed and matched case-insensitively, so padded headers such as
//! `"Russian ruble (RUB)      "` resolve to `"Russian ruble (RUB)"`.

use crate::config::AnalysisConfig;
use crate::constants::{DEFAULT_DATE_COLUMN, DEFAULT_DATE_FORMATS, MISSING_TOKENS};
use crate::error::{FxError, Result};
use crate::types::{Rate, RatePoint, RateSeries};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io;
use std::path::Path;

/// Normalize a column label for matching
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Date-sorted table of rates, one column per currency
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<Option<Rate>>)>,
}

impl RateTable {
    /// Build a table from in-memory columns; every column must match `dates` in length
    pub fn from_columns(
        dates: Vec<NaiveDate>,
        columns: Vec<(String, Vec<Option<Rate>>)>,
    ) -> Result<Self> {
        if let Some((name, _)) = columns.iter().find(|(_, v)| v.len() != dates.len()) {
            return Err(FxError::InvalidInput(format!(
                "Column '{}' length does not match {} dates",
                name,
                dates.len()
            )));
        }
        let columns = columns
            .into_iter()
            .map(|(name, values)| (name.trim().to_string(), values))
            .collect();
        Ok(Self { dates, columns })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Trimmed column names, excluding the date column
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Whether a column matches `name` after normalization
    pub fn has_column(&self, name: &str) -> bool {
        self.find_column(name).is_some()
    }

    fn find_column(&self, name: &str) -> Option<&[Option<Rate>]> {
        let wanted = normalize_label(name);
        self.columns
            .iter()
            .find(|(col, _)| normalize_label(col) == wanted)
            .map(|(_, values)| values.as_slice())
    }

    /// Extract one currency column as a rate series
    pub fn series(&self, column: &str) -> Result<RateSeries> {
        let values = self
            .find_column(column)
            .ok_or_else(|| FxError::ColumnNotFound(column.trim().to_string()))?;

        let points = self
            .dates
            .iter()
            .zip(values.iter())
            .map(|(&date, &rate)| RatePoint::new(date, rate))
            .collect();
        RateSeries::new(points)
    }
}

/// Reader for wide rate table CSV files
#[derive(Debug, Clone)]
pub struct RateTableReader {
    date_column: String,
    date_formats: Vec<String>,
}

impl RateTableReader {
    /// Reader using the default date column and formats
    pub fn new() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Reader using the date settings of an analysis config
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            date_column: config.date_column.clone(),
            date_formats: config.date_formats.clone(),
        }
    }

    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = column.into();
        self
    }

    pub fn with_date_formats(mut self, formats: Vec<String>) -> Self {
        self.date_formats = formats;
        self
    }

    /// Load a rate table from a CSV file
    pub fn read_path(&self, path: &Path) -> Result<RateTable> {
        log::info!("Loading rate table from {}", path.display());
        let rdr = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
        self.read_records(rdr)
    }

    /// Load a rate table from any reader
    pub fn read<R: io::Read>(&self, reader: R) -> Result<RateTable> {
        let rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        self.read_records(rdr)
    }

    fn read_records<R: io::Read>(&self, mut rdr: csv::Reader<R>) -> Result<RateTable> {
        let headers = rdr.headers()?.clone();
        let date_idx = Self::find_column(&headers, &self.date_column)?;

        let value_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != date_idx && !h.is_empty())
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut rows: Vec<(NaiveDate, Vec<Option<Rate>>)> = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = record.get(date_idx).unwrap_or("");
            let date = self.parse_date(date_str).ok_or_else(|| FxError::InvalidDate {
                value: date_str.to_string(),
                line,
            })?;

            let values = value_columns
                .iter()
                .map(|(idx, _)| parse_rate(record.get(*idx).unwrap_or(""), line))
                .collect::<Result<Vec<_>>>()?;

            rows.push((date, values));
        }

        rows.sort_by_key(|(date, _)| *date);
        if let Some(pair) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(FxError::InvalidInput(format!("Duplicate date: {}", pair[1].0)));
        }

        let dates = rows.iter().map(|(date, _)| *date).collect();
        let columns = value_columns
            .iter()
            .enumerate()
            .map(|(col, (_, name))| (name.clone(), rows.iter().map(|(_, v)| v[col]).collect()))
            .collect();

        let table = RateTable { dates, columns };
        log::debug!(
            "Loaded {} rows across {} currency columns",
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        self.date_formats.iter().find_map(|fmt| {
            NaiveDate::parse_from_str(value, fmt)
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(value, &format!("{} %H:%M:%S", fmt))
                        .ok()
                        .map(|dt| dt.date())
                })
        })
    }

    /// Find column index by trimmed, case-insensitive name
    fn find_column(headers: &StringRecord, name: &str) -> Result<usize> {
        let wanted = normalize_label(name);
        headers
            .iter()
            .position(|h| normalize_label(h) == wanted)
            .ok_or_else(|| FxError::ColumnNotFound(name.to_string()))
    }
}

impl Default for RateTableReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one rate cell; recognized missing tokens yield `None`
fn parse_rate(value: &str, line: u64) -> Result<Option<Rate>> {
    let value = value.trim();
    if MISSING_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(value)) {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FxError::InvalidRate {
            value: value.to_string(),
            line,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,South African rand (ZAR)     ,Russian ruble (RUB)
2024-01-03,18.70,
2024-01-02,18.60,89.5
2024-01-04,NA,90.1
";

    #[test]
    fn test_read_sorts_and_trims() {
        let table = RateTableReader::new().read(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column_names(),
            vec!["South African rand (ZAR)", "Russian ruble (RUB)"]
        );
        assert_eq!(table.dates()[0], NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        let zar = table.series("South African rand (ZAR)").unwrap();
        assert_eq!(zar.rates(), vec![Some(18.60), Some(18.70), None]);

        let rub = table.series("russian ruble (rub)   ").unwrap();
        assert_eq!(rub.rates(), vec![Some(89.5), None, Some(90.1)]);
    }

    #[test]
    fn test_missing_column() {
        let table = RateTableReader::new().read(SAMPLE.as_bytes()).unwrap();
        assert!(matches!(
            table.series("Indian rupee (INR)"),
            Err(FxError::ColumnNotFound(_))
        ));
        assert!(table.has_column("SOUTH AFRICAN RAND (ZAR)"));
    }

    #[test]
    fn test_invalid_rate() {
        let csv = "Date,X\n2024-01-01,abc\n";
        match RateTableReader::new().read(csv.as_bytes()) {
            Err(FxError::InvalidRate { value, line }) => {
                assert_eq!(value, "abc");
                assert_eq!(line, 2);
            }
            other => panic!("expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_date() {
        let csv = "Date,X\nnot-a-date,1.0\n";
        assert!(matches!(
            RateTableReader::new().read(csv.as_bytes()),
            Err(FxError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_duplicate_dates() {
        let csv = "Date,X\n2024-01-01,1.0\n2024-01-01,1.1\n";
        assert!(matches!(
            RateTableReader::new().read(csv.as_bytes()),
            Err(FxError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_date_formats() {
        let reader = RateTableReader::new();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(reader.parse_date("2024-03-05"), Some(expected));
        assert_eq!(reader.parse_date("05-03-2024"), Some(expected));
        assert_eq!(reader.parse_date("03/05/2024"), Some(expected));
        assert_eq!(reader.parse_date("05-Mar-2024"), Some(expected));
        assert_eq!(reader.parse_date("2024-03-05 00:00:00"), Some(expected));
    }

    #[test]
    fn test_custom_date_column() {
        let csv = "day;X\n2024-01-01;1.0\n";
        let reader = RateTableReader::new().with_date_column("DAY");
        let rdr = ReaderBuilder::new()
            .delimiter(b';')
            .trim(Trim::All)
            .from_reader(csv.as_bytes());
        let table = reader.read_records(rdr).unwrap();
        assert_eq!(table.series("x").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_date_column() {
        let csv = "When,X\n2024-01-01,1.0\n";
        assert!(matches!(
            RateTableReader::new().read(csv.as_bytes()),
            Err(FxError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_missing_tokens() {
        assert_eq!(parse_rate("", 1).unwrap(), None);
        assert_eq!(parse_rate("NaN", 1).unwrap(), None);
        assert_eq!(parse_rate("n/a", 1).unwrap(), None);
        assert_eq!(parse_rate(" 1.25 ", 1).unwrap(), Some(1.25));
    }
}
