/// Parallel Monte Carlo averaging.
pub mod averager;
/// Step clock driving the recurrence.
pub mod clock;
pub mod door;
/// Per-trial breakdown derived from a trace.
pub mod kpi;
pub mod thermal;
pub mod thermostat;
pub mod trial;
pub mod types;
