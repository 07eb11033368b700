//! Library entry points: one trial, one traced trial, or a batch estimate.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::error::SimError;
use crate::io::price_table::PriceTable;
use crate::sim::averager::{Estimate, TrialAverager};
use crate::sim::door::RandomDoor;
use crate::sim::thermostat::AnyThermostat;
use crate::sim::trial::Trial;
use crate::sim::types::{FridgeConfig, TrialTrace};

/// Seed for trial `index` of a batch seeded with `base`.
pub fn trial_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add(index as u64)
}

/// Draws a base seed from the OS entropy source.
///
/// # Errors
///
/// Returns `SimError::Randomness` if the OS cannot provide entropy.
pub fn entropy_seed() -> Result<u64, SimError> {
    let mut rng = StdRng::try_from_os_rng().map_err(|e| SimError::Randomness(e.to_string()))?;
    Ok(rng.random())
}

fn door_for(seed: Option<u64>) -> Result<RandomDoor, SimError> {
    match seed {
        Some(s) => Ok(RandomDoor::seeded(s)),
        None => RandomDoor::from_entropy(),
    }
}

/// Runs one trial and returns its total cost.
///
/// With `seed = None` the door stream is seeded from the OS.
///
/// # Errors
///
/// Returns configuration, price-table, or randomness errors.
pub fn simulate(
    config: &FridgeConfig,
    prices: &PriceTable,
    seed: Option<u64>,
) -> Result<f64, SimError> {
    let thermostat = AnyThermostat::from_config(config);
    let door = door_for(seed)?;
    Trial::new(config.clone(), prices, thermostat, door)?.run()
}

/// Runs one trial and returns its full step history.
///
/// # Errors
///
/// Same as [`simulate`].
pub fn simulate_trace(
    config: &FridgeConfig,
    prices: &PriceTable,
    seed: Option<u64>,
) -> Result<TrialTrace, SimError> {
    let thermostat = AnyThermostat::from_config(config);
    let door = door_for(seed)?;
    Trial::new(config.clone(), prices, thermostat, door)?.run_trace()
}

/// Averages `trials` independent trials of `config`.
///
/// Trial `i` uses `StdRng::seed_from_u64(base + i)`, so two calls with the
/// same seed (for example one per thermostat) see the same door streams.
///
/// # Errors
///
/// Returns the first trial error; no partial mean is produced.
pub fn estimate_cost(
    config: &FridgeConfig,
    prices: &PriceTable,
    trials: usize,
    seed: Option<u64>,
) -> Result<Estimate, SimError> {
    config.validate()?;
    prices.ensure_covers(crate::sim::types::STEPS)?;

    let base = match seed {
        Some(s) => s,
        None => entropy_seed()?,
    };
    let thermostat = AnyThermostat::from_config(config);
    info!(
        trials,
        base_seed = base,
        thermostat = thermostat.name(),
        "starting batch"
    );

    TrialAverager::new(trials).estimate(|i| {
        let seed = trial_seed(base, i);
        debug!(trial = i, seed, "running trial");
        let door = RandomDoor::seeded(seed);
        Trial::new(config.clone(), prices, thermostat, door)?.run()
    })
}
