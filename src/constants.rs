//! Analysis constants and defaults

/// Trading days used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default rolling window (observations, roughly one trading month)
pub const DEFAULT_WINDOW: usize = 30;

/// Default name of the date column in rate tables
pub const DEFAULT_DATE_COLUMN: &str = "Date";

/// Date formats tried, in order, when parsing rate tables
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y", "%d-%b-%Y", "%d-%b-%y"];

/// Cell values read as a missing rate (compared case-insensitively)
pub const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "-"];

/// Largest magnitude of a base rate treated as zero in returns and changes
///
/// Only an exact zero is undefined; any positive base divides.
pub const ZERO_TOLERANCE: f64 = 0.0;
