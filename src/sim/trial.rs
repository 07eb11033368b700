//! Single-trial simulation: the temperature and expense recurrence.

use tracing::debug;

use super::clock::Clock;
use super::door::DoorModel;
use super::thermal::{food_expense, next_temperature};
use super::thermostat::{StepContext, Thermostat};
use super::types::{DT_SECONDS, FridgeConfig, STEPS, StepRecord, TrialTrace};
use crate::error::SimError;
use crate::io::price_table::PriceTable;

/// One trial over the fixed horizon.
///
/// Generic over `T: Thermostat` and `D: DoorModel` for static dispatch. A
/// trial borrows the shared price table, owns its door model (and with it
/// its random stream), and keeps no history: every call to `run` starts
/// from `start_temp` with zero expense.
pub struct Trial<'a, T: Thermostat, D: DoorModel> {
    config: FridgeConfig,
    prices: &'a PriceTable,
    thermostat: T,
    door: D,
}

impl<'a, T: Thermostat, D: DoorModel> Trial<'a, T, D> {
    /// Creates a trial after validating the configuration and checking
    /// that the price table covers the whole horizon.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Configuration` for invalid fields and
    /// `SimError::PriceTableExhausted` for a short table.
    pub fn new(
        config: FridgeConfig,
        prices: &'a PriceTable,
        thermostat: T,
        door: D,
    ) -> Result<Self, SimError> {
        config.validate()?;
        prices.ensure_covers(STEPS)?;
        Ok(Self {
            config,
            prices,
            thermostat,
            door,
        })
    }

    /// Computes step `n` from the record of step `n - 1`.
    ///
    /// The compressor decision is taken once and used both for cooling and
    /// for the power expense of this step.
    ///
    /// # Errors
    ///
    /// Returns `SimError::PriceTableExhausted` if step `n` has no price.
    pub fn step(&mut self, n: usize, prev: &StepRecord) -> Result<StepRecord, SimError> {
        let price = self.prices.price_at(n)?;
        let ctx = StepContext {
            prev_temp: prev.temp_c,
            price,
        };
        let compressor_on = self.thermostat.compressor_on(&ctx);
        let door_open = self.door.door_open(n);

        let temp_c = next_temperature(
            prev.temp_c,
            self.config.room_temp,
            self.config.compressor_temp,
            door_open,
            compressor_on,
        );
        let power_expense = if compressor_on {
            price * self.config.power_consumption
        } else {
            0.0
        };
        let food_expense = food_expense(prev.temp_c);

        Ok(StepRecord {
            step: n,
            time_hr: n as f64 * DT_SECONDS / 3600.0,
            temp_c,
            expense: prev.expense + power_expense + food_expense,
            compressor_on,
            door_open,
            power_expense,
            food_expense,
        })
    }

    /// Runs all steps and returns the total accumulated cost.
    ///
    /// # Errors
    ///
    /// Propagates the first step error.
    pub fn run(&mut self) -> Result<f64, SimError> {
        let mut current = StepRecord::initial(self.config.start_temp);
        Clock::transitions(STEPS).try_run(|n| {
            current = self.step(n, &current)?;
            Ok::<(), SimError>(())
        })?;
        debug!(cost = current.expense, "trial complete");
        Ok(current.expense)
    }

    /// Runs all steps and returns every step record, step 0 included.
    ///
    /// # Errors
    ///
    /// Propagates the first step error.
    pub fn run_trace(&mut self) -> Result<TrialTrace, SimError> {
        let mut records = Vec::with_capacity(STEPS);
        let mut current = StepRecord::initial(self.config.start_temp);
        Clock::transitions(STEPS).try_run(|n| {
            let next = self.step(n, &current)?;
            records.push(std::mem::replace(&mut current, next));
            Ok::<(), SimError>(())
        })?;
        records.push(current);
        Ok(TrialTrace { records })
    }
}
