//! Thermostat policies deciding whether the compressor runs.

use super::thermal::food_expense;
use super::types::FridgeConfig;

/// Inputs available to a thermostat when deciding step `n`.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    /// Temperature at the end of the previous step (°C).
    pub prev_temp: f64,
    /// Electricity unit price in effect at this step.
    pub price: f64,
}

/// Decides the compressor state for one step.
pub trait Thermostat {
    /// Returns `true` if the compressor should run during this step.
    fn compressor_on(&self, ctx: &StepContext) -> bool;
}

/// Naive thermostat: cool whenever the fridge is above the target.
#[derive(Debug, Clone, Copy)]
pub struct FixedThreshold {
    pub target_temp: f64,
}

impl FixedThreshold {
    pub fn new(target_temp: f64) -> Self {
        Self { target_temp }
    }
}

impl Thermostat for FixedThreshold {
    fn compressor_on(&self, ctx: &StepContext) -> bool {
        ctx.prev_temp > self.target_temp
    }
}

/// Cost-aware thermostat.
///
/// Lets the food spoil (compressor off) whenever the spoilage cost at the
/// current temperature is strictly cheaper than the electricity price for
/// this step; runs the compressor otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct CostAware;

impl Thermostat for CostAware {
    fn compressor_on(&self, ctx: &StepContext) -> bool {
        food_expense(ctx.prev_temp) >= ctx.price
    }
}

/// Runtime-selected thermostat.
#[derive(Debug, Clone, Copy)]
pub enum AnyThermostat {
    Fixed(FixedThreshold),
    CostAware(CostAware),
}

impl AnyThermostat {
    /// Picks the policy selected by `config.smart`.
    pub fn from_config(config: &FridgeConfig) -> Self {
        if config.smart {
            Self::CostAware(CostAware)
        } else {
            Self::Fixed(FixedThreshold::new(config.target_temp))
        }
    }

    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed-threshold",
            Self::CostAware(_) => "cost-aware",
        }
    }
}

impl Thermostat for AnyThermostat {
    fn compressor_on(&self, ctx: &StepContext) -> bool {
        match self {
            Self::Fixed(t) => t.compressor_on(ctx),
            Self::CostAware(t) => t.compressor_on(ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(prev_temp: f64, price: f64) -> StepContext {
        StepContext { prev_temp, price }
    }

    #[test]
    fn fixed_runs_only_above_target() {
        let t = FixedThreshold::new(5.0);
        assert!(t.compressor_on(&ctx(5.1, 0.0)));
        assert!(!t.compressor_on(&ctx(5.0, 0.0)));
        assert!(!t.compressor_on(&ctx(4.0, 100.0)));
    }

    #[test]
    fn cost_aware_idles_in_safe_band() {
        assert!(!CostAware.compressor_on(&ctx(5.0, 0.5)));
    }

    #[test]
    fn cost_aware_runs_when_spoilage_dominates() {
        // 0.11 * e^(0.31 * 12) ~= 4.54
        assert!(CostAware.compressor_on(&ctx(12.0, 1.0)));
        assert!(!CostAware.compressor_on(&ctx(12.0, 5.0)));
    }

    #[test]
    fn cost_aware_runs_on_free_power() {
        // food cost 0 is not cheaper than price 0
        assert!(CostAware.compressor_on(&ctx(5.0, 0.0)));
    }

    #[test]
    fn from_config_selects_policy() {
        let dumb = AnyThermostat::from_config(&FridgeConfig::default());
        assert_eq!(dumb.name(), "fixed-threshold");
        let smart = AnyThermostat::from_config(&FridgeConfig::smart());
        assert_eq!(smart.name(), "cost-aware");
    }

    #[test]
    fn dispatch_matches_inner_policy() {
        let any = AnyThermostat::Fixed(FixedThreshold::new(3.0));
        assert!(any.compressor_on(&ctx(3.5, 0.0)));
        let any = AnyThermostat::CostAware(CostAware);
        assert!(!any.compressor_on(&ctx(5.0, 1.0)));
    }
}
