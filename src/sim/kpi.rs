//! Post-hoc breakdown of a single traced trial.

use std::fmt;

use serde::Serialize;

use super::thermal::{SAFE_BAND_HIGH, SAFE_BAND_LOW};
use super::types::StepRecord;

/// Aggregate indicators derived from one trial trace.
///
/// Computed from the step records so the breakdown always agrees with the
/// cumulative expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialReport {
    /// Final cumulative expense.
    pub total_cost: f64,
    /// Sum of electricity costs.
    pub power_cost: f64,
    /// Sum of food-spoilage costs.
    pub food_cost: f64,
    /// Steps with the compressor running.
    pub compressor_steps: usize,
    /// Compressor duty cycle over the transitions (%).
    pub duty_cycle_pct: f64,
    /// Steps with the door open.
    pub door_openings: usize,
    /// Lowest temperature sample (°C).
    pub min_temp_c: f64,
    /// Highest temperature sample (°C).
    pub max_temp_c: f64,
    /// Mean temperature over all samples (°C).
    pub mean_temp_c: f64,
    /// Share of samples inside the safe band (%).
    pub safe_band_pct: f64,
}

impl TrialReport {
    /// Computes the report from the full record vector, step 0 included.
    pub fn from_records(records: &[StepRecord]) -> Self {
        if records.is_empty() {
            return Self {
                total_cost: 0.0,
                power_cost: 0.0,
                food_cost: 0.0,
                compressor_steps: 0,
                duty_cycle_pct: 0.0,
                door_openings: 0,
                min_temp_c: 0.0,
                max_temp_c: 0.0,
                mean_temp_c: 0.0,
                safe_band_pct: 0.0,
            };
        }

        let mut power_cost = 0.0_f64;
        let mut food_cost = 0.0_f64;
        let mut compressor_steps = 0_usize;
        let mut door_openings = 0_usize;
        let mut min_temp = f64::INFINITY;
        let mut max_temp = f64::NEG_INFINITY;
        let mut temp_sum = 0.0_f64;
        let mut in_band = 0_usize;

        for r in records {
            power_cost += r.power_expense;
            food_cost += r.food_expense;
            compressor_steps += usize::from(r.compressor_on);
            door_openings += usize::from(r.door_open);
            min_temp = min_temp.min(r.temp_c);
            max_temp = max_temp.max(r.temp_c);
            temp_sum += r.temp_c;
            if (SAFE_BAND_LOW..SAFE_BAND_HIGH).contains(&r.temp_c) {
                in_band += 1;
            }
        }

        let n = records.len() as f64;
        let transitions = records.len() - 1;
        let duty_cycle_pct = if transitions > 0 {
            100.0 * compressor_steps as f64 / transitions as f64
        } else {
            0.0
        };

        Self {
            total_cost: records[records.len() - 1].expense,
            power_cost,
            food_cost,
            compressor_steps,
            duty_cycle_pct,
            door_openings,
            min_temp_c: min_temp,
            max_temp_c: max_temp,
            mean_temp_c: temp_sum / n,
            safe_band_pct: 100.0 * in_band as f64 / n,
        }
    }
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Trial Report ---")?;
        writeln!(f, "Total cost:            {:.2}", self.total_cost)?;
        writeln!(f, "  electricity:         {:.2}", self.power_cost)?;
        writeln!(f, "  spoiled food:        {:.2}", self.food_cost)?;
        writeln!(
            f,
            "Compressor:            {} steps ({:.1}% duty)",
            self.compressor_steps, self.duty_cycle_pct
        )?;
        writeln!(f, "Door openings:         {}", self.door_openings)?;
        writeln!(
            f,
            "Temperature:           min {:.2} / mean {:.2} / max {:.2} °C",
            self.min_temp_c, self.mean_temp_c, self.max_temp_c
        )?;
        write!(f, "In safe band:          {:.1}%", self.safe_band_pct)
    }
}
