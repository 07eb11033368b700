//! Error types shared by the simulation engine, price loader, and runner.

use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can abort a trial or a batch of trials.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid or non-finite configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A price lookup went past the end of the table.
    #[error("price table exhausted: step {step} requested but only {rows} rows available")]
    PriceTableExhausted { step: usize, rows: usize },

    /// A price table row could not be used.
    #[error("price table row {row}: {message}")]
    InvalidPrice { row: usize, message: String },

    /// The OS entropy source could not seed a generator.
    #[error("randomness source failure: {0}")]
    Randomness(String),

    #[error("failed to read price table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
