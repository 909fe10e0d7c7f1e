//! fx-volatility CLI - Command-line interface for currency volatility analysis
//!
//! ## Example Usage
//!
//! ```bash
//! # Analyze every configured currency in a rate table
//! fx-volatility analyze rates.csv
//!
//! # Analyze two currencies with a 20-day window and export CSVs
//! fx-volatility analyze rates.csv -c RUB -c INR --window 20 --output out/
//!
//! # List configured currencies
//! fx-volatility currencies
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use fx_volatility::config::AnalysisConfig;
use fx_volatility::currency::CurrencyConfig;
use fx_volatility::data::{RateTable, RateTableReader};
use fx_volatility::pipeline::{analyze_table, CurrencyAnalysis, CurrencyOutcome};
use fx_volatility::report::write_month_end_csv;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

/// fx-volatility: Rolling volatility analysis for exchange rate series
#[derive(Parser)]
#[command(name = "fx-volatility")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rolling volatility analysis for exchange rate series", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze currencies in a rate table CSV
    Analyze {
        /// Path to the rate table
        #[arg(value_name = "CSV_FILE")]
        input: PathBuf,

        /// Currency code to analyze (repeatable; default: all configured)
        #[arg(short = 'c', long = "currency")]
        currencies: Vec<String>,

        /// Rolling window in observations (overrides config)
        #[arg(short = 'w', long)]
        window: Option<usize>,

        /// Directory for exported results
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short = 'f', long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },

    /// List configured currencies
    Currencies,

    /// Show configuration and build information
    Info,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fx-volatility"))
}

fn load_config(path: Option<&Path>) -> AnalysisConfig {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return AnalysisConfig::default(),
        },
    };

    if !path.exists() {
        return AnalysisConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{} Failed to parse config: {}", "Warning:".yellow(), e);
                AnalysisConfig::default()
            }
        },
        Err(e) => {
            eprintln!("{} Failed to read config: {}", "Warning:".yellow(), e);
            AnalysisConfig::default()
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());

    if cli.verbose {
        println!(
            "{} v{}",
            "fx-volatility".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let result = match cli.command {
        Commands::Analyze {
            input,
            currencies,
            window,
            output,
            format,
        } => run_analysis(AnalyzeConfig {
            input,
            currencies,
            window,
            output,
            format,
            verbose: cli.verbose,
            config,
        }),
        Commands::Currencies => list_currencies(&config),
        Commands::Info => show_info(&config),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

struct AnalyzeConfig {
    input: PathBuf,
    currencies: Vec<String>,
    window: Option<usize>,
    output: Option<PathBuf>,
    format: ExportFormat,
    verbose: bool,
    config: AnalysisConfig,
}

fn run_analysis(cfg: AnalyzeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = cfg.config;
    if let Some(window) = cfg.window {
        config = config.with_window(window);
    }
    config.validate()?;

    let selected: Vec<CurrencyConfig> = if cfg.currencies.is_empty() {
        config.currencies.clone()
    } else {
        cfg.currencies
            .iter()
            .map(|code| config.currency(code))
            .collect::<Result<_, _>>()?
    };

    if !cfg.input.exists() {
        return Err(format!("Input file not found: {:?}", cfg.input).into());
    }

    let started = Instant::now();
    let table = RateTableReader::from_config(&config).read_path(&cfg.input)?;

    if cfg.verbose {
        println!("  {} {:?}", "Input:".bold(), cfg.input);
        println!("  {} {}", "Rows:".bold(), table.len());
        println!("  {} {}", "Currencies:".bold(), selected.len());
        println!();
    }

    if let Some(dir) = &cfg.output {
        fs::create_dir_all(dir)?;
    }

    let outcomes = analyze_table(&table, &selected, config.periods_per_year);
    let failures = report_outcomes(outcomes, &table, cfg.output.as_deref(), cfg.format);

    if cfg.verbose {
        println!(
            "{} in {:.2?}",
            "Analysis complete".green().bold(),
            started.elapsed()
        );
    }

    if failures > 0 {
        return Err(format!("{} currency analyses failed", failures).into());
    }
    Ok(())
}

/// Print and export each outcome, returning the number of failed currencies
///
/// A failed analysis or export is reported and the remaining currencies still run.
fn report_outcomes(
    outcomes: Vec<CurrencyOutcome>,
    table: &RateTable,
    output: Option<&Path>,
    format: ExportFormat,
) -> usize {
    let mut failures = 0;

    for CurrencyOutcome {
        code,
        column_key,
        result,
    } in outcomes
    {
        let exported = result.and_then(|analysis| {
            println!("{}", analysis.display_name.cyan().bold());
            print!("{}", analysis.summary);
            println!();

            match output {
                Some(dir) => export_analysis(&analysis, table, &column_key, dir, format),
                None => Ok(()),
            }
        });

        if let Err(e) = exported {
            failures += 1;
            eprintln!("{} {}: {}", "Failed:".red().bold(), code, e);
        }
    }
    failures
}

fn export_analysis(
    analysis: &CurrencyAnalysis,
    table: &RateTable,
    column_key: &str,
    dir: &Path,
    format: ExportFormat,
) -> fx_volatility::error::Result<()> {
    match format {
        ExportFormat::Csv => {
            analysis.export_csv(dir)?;
            let series = table.series(column_key)?;
            let path = dir.join(format!("{}_month_end.csv", analysis.currency.to_lowercase()));
            write_month_end_csv(&series, fs::File::create(path)?)
        }
        ExportFormat::Json => analysis.export_json(dir),
    }
}

fn list_currencies(config: &AnalysisConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Configured currencies".bold());
    println!("{}", "=====================".dimmed());
    for currency in &config.currencies {
        println!(
            "  {:<5} {:<28} column: {:<28} window: {}",
            currency.code.cyan(),
            currency.display_name,
            currency.column_key,
            currency.window
        );
    }
    Ok(())
}

fn show_info(config: &AnalysisConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} {}",
        "fx-volatility".cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();

    println!("{}", "Configuration".bold());
    println!("{}", "=============".dimmed());
    if let Some(dir) = config_dir() {
        println!("  {} {}", "Config file:".bold(), dir.join("config.toml").display());
    }
    println!("  {} {}", "Date column:".bold(), config.date_column);
    println!("  {} {}", "Default window:".bold(), config.window);
    println!("  {} {}", "Periods per year:".bold(), config.periods_per_year);
    println!("  {} {}", "Date formats:".bold(), config.date_formats.join(", "));
    println!("  {} {}", "Currencies:".bold(), config.currencies.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_volatility::error::FxError;
    use fx_volatility::pipeline::analyze_currency;

    fn table() -> RateTable {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();
        let dates = (0..6).map(|i| start + chrono::Duration::days(i)).collect();
        let rates = vec![Some(7.1), Some(7.2), None, Some(7.15), Some(7.3), Some(7.25)];
        RateTable::from_columns(dates, vec![("Chinese yuan (CNY)".to_string(), rates)]).unwrap()
    }

    fn outcome(code: &str, column_key: &str, table: &RateTable) -> CurrencyOutcome {
        let config = CurrencyConfig::new(code, "Chinese yuan (CNY)", code, 2);
        CurrencyOutcome {
            code: code.to_string(),
            column_key: column_key.to_string(),
            result: analyze_currency(table, &config, 252.0),
        }
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["fx-volatility", "analyze", "rates.csv", "-c", "RUB", "-w", "20"]).unwrap();
        match cli.command {
            Commands::Analyze {
                currencies, window, ..
            } => {
                assert_eq!(currencies, vec!["RUB"]);
                assert_eq!(window, Some(20));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_info_parsing() {
        assert!(Cli::try_parse_from(["fx-volatility", "info"]).is_ok());
        assert!(Cli::try_parse_from(["fx-volatility", "currencies"]).is_ok());
    }

    #[test]
    fn test_failed_export_does_not_stop_other_currencies() {
        let table = table();
        let dir = tempfile::tempdir().unwrap();
        let outcomes = vec![
            outcome("AAA", "Missing column", &table),
            CurrencyOutcome {
                code: "BBB".to_string(),
                column_key: "Chinese yuan (CNY)".to_string(),
                result: Err(FxError::ColumnNotFound("Bad".to_string())),
            },
            outcome("CNY", "Chinese yuan (CNY)", &table),
        ];

        let failures = report_outcomes(outcomes, &table, Some(dir.path()), ExportFormat::Csv);

        assert_eq!(failures, 2);
        assert!(dir.path().join("cny_daily.csv").exists());
        assert!(dir.path().join("cny_monthly.csv").exists());
        assert!(dir.path().join("cny_month_end.csv").exists());
        assert!(!dir.path().join("aaa_month_end.csv").exists());
    }
}
