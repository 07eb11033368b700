//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::sim::averager::TrialAverager;
use crate::sim::types::FridgeConfig;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Fridge physics and thermostat selection.
    #[serde(default)]
    pub fridge: FridgeConfig,
    /// Batch and input parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Batch and input parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of trials to average (must be > 0).
    pub trials: usize,
    /// Master random seed; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// CSV file with one price per step in the second column.
    pub price_table: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: TrialAverager::DEFAULT_TRIALS,
            seed: None,
            price_table: PathBuf::from("electricity_price.csv"),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"fridge.room_temp"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: default fridge, fixed-threshold thermostat.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the baseline scenario with the cost-aware thermostat.
    pub fn smart() -> Self {
        Self {
            fridge: FridgeConfig::smart(),
            ..Self::default()
        }
    }

    /// Returns the hot-kitchen preset: 30 °C ambient.
    pub fn hot_kitchen() -> Self {
        Self {
            fridge: FridgeConfig {
                room_temp: 30.0,
                ..FridgeConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "smart", "hot_kitchen"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "smart" => Ok(Self::smart()),
            "hot_kitchen" => Ok(Self::hot_kitchen()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// A relative `price_table` path is resolved against the scenario
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if cfg.simulation.price_table.is_relative() {
            if let Some(dir) = path.parent() {
                cfg.simulation.price_table = dir.join(&cfg.simulation.price_table);
            }
        }
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.fridge.errors();

        let s = &self.simulation;
        if s.trials == 0 {
            errors.push(ConfigError::new("simulation.trials", "must be > 0"));
        }
        if s.price_table.as_os_str().is_empty() {
            errors.push(ConfigError::new("simulation.price_table", "must not be empty"));
        }

        errors
    }
}
