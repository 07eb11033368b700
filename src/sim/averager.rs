//! Monte Carlo averaging over independent trials.

use std::fmt;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::ConfigError;
use crate::error::SimError;

/// Mean cost over a batch of trials.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// Arithmetic mean of the trial costs.
    pub mean_cost: f64,
    /// Number of trials averaged.
    pub trials: usize,
    /// Wall-clock duration of the batch.
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean cost {:.2} over {} trials ({:.3} s)",
            self.mean_cost,
            self.trials,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Runs `trials` independent trials on the rayon pool and averages them.
///
/// The trial function receives the trial index and must build all of its
/// mutable state (including its random stream) itself. Any failed trial
/// fails the whole batch; partial results are never averaged.
///
/// # Examples
///
/// ```
/// use fridge_sim::sim::averager::TrialAverager;
///
/// let est = TrialAverager::new(4).estimate(|i| Ok(i as f64)).unwrap();
/// assert_eq!(est.mean_cost, 1.5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrialAverager {
    trials: usize,
}

impl TrialAverager {
    /// Default number of trials per batch.
    pub const DEFAULT_TRIALS: usize = 10;

    pub fn new(trials: usize) -> Self {
        Self { trials }
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Runs the batch and returns the mean.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Configuration` for a zero trial count and the
    /// first trial error otherwise.
    pub fn estimate<F>(&self, trial: F) -> Result<Estimate, SimError>
    where
        F: Fn(usize) -> Result<f64, SimError> + Sync + Send,
    {
        if self.trials == 0 {
            return Err(ConfigError::new("simulation.trials", "must be > 0").into());
        }

        let start = Instant::now();
        let costs: Vec<f64> = (0..self.trials)
            .into_par_iter()
            .map(&trial)
            .collect::<Result<_, _>>()?;
        let elapsed = start.elapsed();

        let mean_cost = costs.iter().sum::<f64>() / costs.len() as f64;
        info!(
            trials = self.trials,
            mean_cost,
            elapsed_ms = elapsed.as_millis() as u64,
            "batch complete"
        );
        Ok(Estimate {
            mean_cost,
            trials: self.trials,
            elapsed,
        })
    }
}

impl Default for TrialAverager {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRIALS)
    }
}
