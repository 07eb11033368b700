/// A simulation clock that hands out step indices over a fixed horizon.
///
/// Step 0 of a trial is the initial condition, so the trial clock starts at
/// step 1 and stops before `total`.
///
/// # Examples
///
/// ```
/// use fridge_sim::sim::clock::Clock;
///
/// let mut clock = Clock::transitions(4);
/// let mut steps = Vec::new();
///
/// clock
///     .try_run(|step| {
///         steps.push(step);
///         Ok::<(), ()>(())
///     })
///     .unwrap();
/// assert_eq!(steps, vec![1, 2, 3]);
/// ```
pub struct Clock {
    /// Next step to hand out
    current: usize,
    /// One past the last step
    total: usize,
}

impl Clock {
    /// Creates a clock running over the transitions `1..total` of a horizon
    /// with `total` samples.
    pub fn transitions(total: usize) -> Self {
        Self {
            current: 1.min(total),
            total,
        }
    }

    /// Advances the clock by one step.
    ///
    /// # Returns
    ///
    /// * `Some(step)` - The step number before advancing
    /// * `None` - If the clock has reached its total steps
    pub fn tick(&mut self) -> Option<usize> {
        if self.current < self.total {
            let step = self.current;
            self.current += 1;
            Some(step)
        } else {
            None
        }
    }

    /// Runs a fallible function for each remaining step, stopping at the
    /// first error.
    pub fn try_run<E>(&mut self, mut f: impl FnMut(usize) -> Result<(), E>) -> Result<(), E> {
        while let Some(step) = self.tick() {
            f(step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sample_horizon_has_no_transitions() {
        let mut clock = Clock::transitions(1);
        assert_eq!(clock.current, 1);
        assert_eq!(clock.total, 1);
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_transitions_skip_initial_step() {
        let mut clock = Clock::transitions(3);
        assert_eq!(clock.tick(), Some(1));
        assert_eq!(clock.tick(), Some(2));
        assert_eq!(clock.tick(), None);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = Clock::transitions(0);
        assert_eq!(clock.tick(), None);

        let mut was_called = false;
        let res: Result<(), ()> = clock.try_run(|_| {
            was_called = true;
            Ok(())
        });
        assert!(res.is_ok());
        assert!(!was_called);
    }

    #[test]
    fn test_try_run_stops_on_error() {
        let mut clock = Clock::transitions(10);
        let mut seen = Vec::new();
        let res = clock.try_run(|step| {
            seen.push(step);
            if step == 3 { Err(step) } else { Ok(()) }
        });
        assert_eq!(res, Err(3));
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
