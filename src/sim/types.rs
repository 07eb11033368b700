//! Core simulation types: fridge configuration, horizon constants, and step records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Number of samples in one trial (30 days of 5-minute steps).
pub const STEPS: usize = 8640;

/// Duration of one step in seconds.
pub const DT_SECONDS: f64 = 300.0;

/// Physical and economic parameters of one refrigeration unit.
///
/// Immutable for the duration of a trial. Defaults match the reference
/// workshop setup: a 5 °C fridge in a 20 °C room with a fixed-threshold
/// thermostat.
///
/// # Examples
///
/// ```
/// use fridge_sim::sim::types::FridgeConfig;
///
/// let cfg = FridgeConfig::default();
/// assert_eq!(cfg.start_temp, 5.0);
/// assert!(!cfg.smart);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FridgeConfig {
    /// Initial internal temperature (°C).
    pub start_temp: f64,
    /// Ambient temperature outside the unit (°C).
    pub room_temp: f64,
    /// Temperature the compressor drives toward (°C).
    pub compressor_temp: f64,
    /// Threshold for the fixed-threshold thermostat (°C).
    pub target_temp: f64,
    /// Use the cost-aware thermostat instead of the fixed threshold.
    pub smart: bool,
    /// Compressor energy draw per step (kWh).
    pub power_consumption: f64,
}

impl Default for FridgeConfig {
    fn default() -> Self {
        Self {
            start_temp: 5.0,
            room_temp: 20.0,
            compressor_temp: -5.0,
            target_temp: 5.0,
            smart: false,
            power_consumption: 1.0,
        }
    }
}

impl FridgeConfig {
    /// Returns the default configuration with the cost-aware thermostat.
    pub fn smart() -> Self {
        Self {
            smart: true,
            ..Self::default()
        }
    }

    /// Checks that every numeric field is usable by the recurrence.
    ///
    /// # Errors
    ///
    /// Returns the first entry of [`FridgeConfig::errors`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.errors().into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Collects every problem with the fridge fields.
    ///
    /// A room temperature equal to the current temperature is fine;
    /// non-finite values and a negative power draw are not.
    pub fn errors(&self) -> Vec<ConfigError> {
        let fields = [
            ("fridge.start_temp", self.start_temp),
            ("fridge.room_temp", self.room_temp),
            ("fridge.compressor_temp", self.compressor_temp),
            ("fridge.target_temp", self.target_temp),
            ("fridge.power_consumption", self.power_consumption),
        ];
        let mut errors: Vec<ConfigError> = fields
            .into_iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(field, value)| ConfigError::new(field, format!("must be finite, got {value}")))
            .collect();
        if self.power_consumption < 0.0 {
            errors.push(ConfigError::new(
                "fridge.power_consumption",
                "must be >= 0",
            ));
        }
        errors
    }
}

/// Complete record of one simulation step.
///
/// Step 0 is the initial condition: both flags are false and both expense
/// terms are zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// Step index.
    pub step: usize,
    /// Simulated time in hours.
    pub time_hr: f64,
    /// Internal temperature after this step (°C).
    pub temp_c: f64,
    /// Cumulative expense up to and including this step.
    pub expense: f64,
    /// Compressor decision for this step.
    pub compressor_on: bool,
    /// Whether the door was open during this step.
    pub door_open: bool,
    /// Electricity cost incurred in this step.
    pub power_expense: f64,
    /// Food-spoilage cost incurred in this step.
    pub food_expense: f64,
}

impl StepRecord {
    /// The record for step 0.
    pub fn initial(start_temp: f64) -> Self {
        Self {
            step: 0,
            time_hr: 0.0,
            temp_c: start_temp,
            expense: 0.0,
            compressor_on: false,
            door_open: false,
            power_expense: 0.0,
            food_expense: 0.0,
        }
    }
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={:>4} ({:>6.2}h) | T={:>6.2} °C  cost={:>10.2} | comp={} door={} \
             (power={:.2}, food={:.2})",
            self.step,
            self.time_hr,
            self.temp_c,
            self.expense,
            self.compressor_on,
            self.door_open,
            self.power_expense,
            self.food_expense,
        )
    }
}

/// Full per-step history of one trial, handed to the caller on request.
#[derive(Debug, Clone, Default)]
pub struct TrialTrace {
    pub records: Vec<StepRecord>,
}

impl TrialTrace {
    /// Temperature samples `t[0..N]`.
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.temp_c)
    }

    /// Cumulative expense samples `expense[0..N]`.
    pub fn expenses(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.expense)
    }

    /// Total accumulated cost, i.e. the last expense sample.
    pub fn total_cost(&self) -> f64 {
        self.records.last().map_or(0.0, |r| r.expense)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_workshop_setup() {
        let cfg = FridgeConfig::default();
        assert_eq!(cfg.start_temp, 5.0);
        assert_eq!(cfg.room_temp, 20.0);
        assert_eq!(cfg.compressor_temp, -5.0);
        assert_eq!(cfg.target_temp, 5.0);
        assert!(!cfg.smart);
        assert_eq!(cfg.power_consumption, 1.0);
    }

    #[test]
    fn horizon_is_thirty_days() {
        let seconds = STEPS as f64 * DT_SECONDS;
        assert_eq!(seconds, 30.0 * 24.0 * 3600.0);
    }

    #[test]
    fn validate_rejects_nan() {
        let cfg = FridgeConfig {
            room_temp: f64::NAN,
            ..FridgeConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.field, "fridge.room_temp");
    }

    #[test]
    fn validate_rejects_infinite_power() {
        let cfg = FridgeConfig {
            power_consumption: f64::INFINITY,
            ..FridgeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_power() {
        let cfg = FridgeConfig {
            power_consumption: -1.0,
            ..FridgeConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.field, "fridge.power_consumption");
    }

    #[test]
    fn errors_lists_every_bad_field() {
        let cfg = FridgeConfig {
            start_temp: f64::NAN,
            compressor_temp: f64::NEG_INFINITY,
            power_consumption: -0.5,
            ..FridgeConfig::default()
        };
        let errors = cfg.errors();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "fridge.start_temp",
                "fridge.compressor_temp",
                "fridge.power_consumption"
            ]
        );
        assert_eq!(cfg.validate().unwrap_err().field, "fridge.start_temp");
    }

    #[test]
    fn validate_accepts_room_equal_to_start() {
        let cfg = FridgeConfig {
            room_temp: 5.0,
            ..FridgeConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn trace_accessors() {
        let mut trace = TrialTrace::default();
        assert_eq!(trace.total_cost(), 0.0);
        trace.records.push(StepRecord::initial(4.0));
        trace.records.push(StepRecord {
            step: 1,
            time_hr: DT_SECONDS / 3600.0,
            temp_c: 4.5,
            expense: 2.0,
            compressor_on: true,
            door_open: false,
            power_expense: 2.0,
            food_expense: 0.0,
        });
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.temperatures().collect::<Vec<_>>(), vec![4.0, 4.5]);
        assert_eq!(trace.expenses().collect::<Vec<_>>(), vec![0.0, 2.0]);
        assert_eq!(trace.total_cost(), 2.0);
    }

    #[test]
    fn step_record_display_does_not_panic() {
        let s = format!("{}", StepRecord::initial(5.0));
        assert!(!s.is_empty());
    }
}
