//! Electricity price table loaded from CSV.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::error::SimError;

/// Zero-based column holding the unit price (`timestamp,price`).
const PRICE_COLUMN: usize = 1;

/// Read-only time series of electricity unit prices indexed by step.
///
/// Built once, then shared by reference with every trial.
///
/// # Examples
///
/// ```
/// use fridge_sim::io::price_table::PriceTable;
///
/// let table = PriceTable::from_prices(vec![0.5, 0.7]).unwrap();
/// assert_eq!(table.price_at(1).unwrap(), 0.7);
/// assert!(table.price_at(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    prices: Vec<f64>,
}

impl PriceTable {
    /// Builds a table from prices already in memory.
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidPrice` for a negative or non-finite entry.
    pub fn from_prices(prices: Vec<f64>) -> Result<Self, SimError> {
        for (row, &price) in prices.iter().enumerate() {
            check_price(row, price)?;
        }
        Ok(Self { prices })
    }

    /// Builds a table of `len` steps from a price function of the step index.
    ///
    /// # Errors
    ///
    /// Same as [`PriceTable::from_prices`].
    pub fn from_fn(len: usize, f: impl Fn(usize) -> f64) -> Result<Self, SimError> {
        Self::from_prices((0..len).map(f).collect())
    }

    /// Loads a table from a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Io` if the file cannot be opened and
    /// `SimError::Csv`/`SimError::InvalidPrice` for malformed rows.
    pub fn from_csv_path(path: &Path) -> Result<Self, SimError> {
        let file = File::open(path).map_err(|e| {
            SimError::Io(io::Error::new(
                e.kind(),
                format!("cannot open price table \"{}\": {e}", path.display()),
            ))
        })?;
        let table = Self::from_csv_reader(file)?;
        info!(path = %path.display(), rows = table.len(), "loaded price table");
        Ok(table)
    }

    /// Loads a table from any CSV source with a header row.
    ///
    /// The price is read from the second column; the first (timestamp or
    /// index) is ignored.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Csv` on malformed CSV and `SimError::InvalidPrice`
    /// for a missing, unparsable, negative, or non-finite price.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, SimError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut prices = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            let field = record.get(PRICE_COLUMN).ok_or_else(|| {
                warn!(row, "price table row has no price column");
                SimError::InvalidPrice {
                    row,
                    message: format!("expected at least {} columns", PRICE_COLUMN + 1),
                }
            })?;
            let price: f64 = field.parse().map_err(|e| SimError::InvalidPrice {
                row,
                message: format!("cannot parse \"{field}\" as a number: {e}"),
            })?;
            check_price(row, price)?;
            prices.push(price);
        }
        Ok(Self { prices })
    }

    /// Price in effect at `step`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::PriceTableExhausted` past the end of the table.
    pub fn price_at(&self, step: usize) -> Result<f64, SimError> {
        self.prices
            .get(step)
            .copied()
            .ok_or(SimError::PriceTableExhausted {
                step,
                rows: self.prices.len(),
            })
    }

    /// Fails unless the table has a price for every step in `0..steps`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::PriceTableExhausted` naming the first missing step.
    pub fn ensure_covers(&self, steps: usize) -> Result<(), SimError> {
        if self.prices.len() < steps {
            return Err(SimError::PriceTableExhausted {
                step: self.prices.len(),
                rows: self.prices.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

fn check_price(row: usize, price: f64) -> Result<(), SimError> {
    if !price.is_finite() || price < 0.0 {
        return Err(SimError::InvalidPrice {
            row,
            message: format!("price must be finite and >= 0, got {price}"),
        });
    }
    Ok(())
}
