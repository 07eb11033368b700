//! Door-opening models that drive the ambient leak coefficient.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::thermal::DOOR_OPEN_PROBABILITY;
use crate::error::SimError;

/// Source of the per-step door state.
///
/// Each trial owns its model; implementations are never shared between
/// concurrently running trials.
pub trait DoorModel {
    /// Returns `true` if the door is open during `step`.
    fn door_open(&mut self, step: usize) -> bool;
}

/// Door opened independently each step with a fixed probability.
///
/// # Examples
///
/// ```
/// use fridge_sim::sim::door::{DoorModel, RandomDoor};
///
/// let mut a = RandomDoor::seeded(7);
/// let mut b = RandomDoor::seeded(7);
/// for step in 1..100 {
///     assert_eq!(a.door_open(step), b.door_open(step));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomDoor<R = StdRng> {
    rng: R,
    p_open: f64,
}

impl<R: Rng> RandomDoor<R> {
    /// Wraps an existing generator with the default opening probability.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            p_open: DOOR_OPEN_PROBABILITY,
        }
    }
}

impl RandomDoor<StdRng> {
    /// Door model backed by a `StdRng` seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Door model backed by a `StdRng` seeded from the OS entropy source.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Randomness` if the OS cannot provide entropy.
    pub fn from_entropy() -> Result<Self, SimError> {
        let rng = StdRng::try_from_os_rng().map_err(|e| SimError::Randomness(e.to_string()))?;
        Ok(Self::new(rng))
    }
}

impl<R: Rng> DoorModel for RandomDoor<R> {
    fn door_open(&mut self, _step: usize) -> bool {
        self.rng.random_bool(self.p_open)
    }
}

/// Door that is never opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClosedDoor;

impl DoorModel for ClosedDoor {
    fn door_open(&mut self, _step: usize) -> bool {
        false
    }
}
