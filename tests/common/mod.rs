//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use fridge_sim::io::price_table::PriceTable;
use fridge_sim::sim::door::DoorModel;
use fridge_sim::sim::types::STEPS;

/// Deterministic price profile: 1.0 to 2.1 in a 12-step sawtooth.
pub fn sawtooth_price(n: usize) -> f64 {
    1.0 + 0.1 * (n % 12) as f64
}

/// Full-horizon table built from [`sawtooth_price`].
pub fn sawtooth_prices() -> PriceTable {
    PriceTable::from_fn(STEPS, sawtooth_price).expect("sawtooth prices are valid")
}

/// Full-horizon table with one constant price.
pub fn flat_prices(price: f64) -> PriceTable {
    PriceTable::from_fn(STEPS, |_| price).expect("flat prices are valid")
}

/// Door opened on every `period`-th step.
pub struct PeriodicDoor {
    pub period: usize,
}

impl DoorModel for PeriodicDoor {
    fn door_open(&mut self, step: usize) -> bool {
        step % self.period == 0
    }
}

/// Writes the sawtooth table as `timestamp,price` CSV into a fresh temp dir.
///
/// Returns the CSV path; the caller removes the parent directory.
pub fn write_sawtooth_csv(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fridge-sim-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("electricity_price.csv");
    let mut body = String::from("timestamp,price\n");
    for n in 0..STEPS {
        body.push_str(&format!("{},{}\n", n * 300, sawtooth_price(n)));
    }
    fs::write(&path, body).expect("write csv");
    path
}
