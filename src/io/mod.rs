//! Input adapters.

/// CSV-backed electricity price table.
pub mod price_table;
