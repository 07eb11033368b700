//! Monte Carlo cost simulator for a thermostat-controlled refrigerator.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod reporting;
pub mod runner;
/// Trial recurrence, thermostat policies, and averaging.
pub mod sim;
pub mod telemetry;
