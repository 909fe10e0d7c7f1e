//! Integration tests for loading rate tables from disk and exporting results

use fx_volatility::prelude::*;
use fx_volatility::report::write_month_end_csv;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// Headers carry the padded names found in published rate tables
const RATES_CSV: &str = "\
Date,South African rand (ZAR)                     ,Russian ruble (RUB)                     ,Brazilian real (BRL)
2023-01-02,17.01,,5.36
2023-01-03,17.10,70.5,5.45
2023-01-04,17.25,71.0,
2023-01-05,17.05,NA,5.40
2023-02-01,16.90,69.5,5.20
2023-02-02,17.40,70.2,5.10
";

fn write_rates() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(RATES_CSV.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_and_analyze_from_file() {
    let file = write_rates();
    let table = RateTableReader::new().read_path(file.path()).unwrap();
    assert_eq!(table.len(), 6);

    let config = AnalysisConfig {
        currencies: vec![
            CurrencyConfig::preset(Currency::ZAR),
            CurrencyConfig::preset(Currency::RUB),
            CurrencyConfig::preset(Currency::BRL),
        ],
        ..Default::default()
    }
    .with_window(2);

    let outcomes = analyze_config(&table, &config).unwrap();
    assert_eq!(outcomes.len(), 3);

    for outcome in &outcomes {
        let analysis = outcome.result.as_ref().unwrap();
        assert_eq!(analysis.daily.len(), 6);
        assert!(analysis.daily.iter().all(|d| d.rate.is_some()));
        assert_eq!(analysis.monthly.len(), 2);
        assert!(analysis.summary.has_sufficient_data());
    }

    let rub = outcomes[1].result.as_ref().unwrap();
    assert_eq!(rub.daily[0].rate, Some(70.5));
    assert_eq!(rub.daily[3].rate, Some(71.0));
}

#[test]
fn test_export_csv_and_json() {
    let file = write_rates();
    let table = RateTableReader::new().read_path(file.path()).unwrap();
    let config = CurrencyConfig::preset(Currency::ZAR).with_window(2);
    let analysis = analyze_currency(&table, &config, TRADING_DAYS_PER_YEAR).unwrap();

    let dir = tempdir().unwrap();
    analysis.export_csv(dir.path()).unwrap();
    analysis.export_json(dir.path()).unwrap();

    let daily = std::fs::read_to_string(dir.path().join("zar_daily.csv")).unwrap();
    assert_eq!(daily.lines().count(), 7);
    assert!(daily.starts_with("date,rate,daily_return,volatility"));

    let monthly = std::fs::read_to_string(dir.path().join("zar_monthly.csv")).unwrap();
    assert_eq!(monthly.lines().count(), 3);
    // Feb average 17.15 vs Jan 17.1025
    assert!(monthly.lines().nth(2).unwrap().ends_with("positive"));

    let json = std::fs::read_to_string(dir.path().join("zar.json")).unwrap();
    let back: CurrencyAnalysis = serde_json::from_str(&json).unwrap();
    assert_eq!(back.currency, "ZAR");
    assert_eq!(back.daily.len(), analysis.daily.len());
    assert_eq!(back.monthly[1].year_month, analysis.monthly[1].year_month);
}

#[test]
fn test_month_end_export() {
    let file = write_rates();
    let table = RateTableReader::new().read_path(file.path()).unwrap();
    let series = table.series("Russian ruble (RUB)").unwrap();

    let mut buf = Vec::new();
    write_month_end_csv(&series, &mut buf).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "year_month,rate\n2023-01,71.0\n2023-02,70.2\n"
    );
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = RateTableReader::new().read_path(&dir.path().join("nope.csv"));
    assert!(result.is_err());
}

#[test]
fn test_malformed_rate_fails_run() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Chinese yuan (CNY)").unwrap();
    writeln!(file, "2023-01-02,7.1").unwrap();
    writeln!(file, "2023-01-03,seven").unwrap();
    file.flush().unwrap();

    match RateTableReader::new().read_path(file.path()) {
        Err(FxError::InvalidRate { value, line }) => {
            assert_eq!(value, "seven");
            assert_eq!(line, 3);
        }
        other => panic!("expected InvalidRate, got {:?}", other),
    }
}
