//! Rate table loading

pub mod loader;

pub use loader::{normalize_label, RateTable, RateTableReader};
