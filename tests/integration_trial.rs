//! Integration tests for the single-trial recurrence.

mod common;

use common::PeriodicDoor;
use fridge_sim::error::SimError;
use fridge_sim::runner::{simulate, simulate_trace};
use fridge_sim::sim::door::{ClosedDoor, RandomDoor};
use fridge_sim::sim::kpi::TrialReport;
use fridge_sim::sim::thermal::food_expense;
use fridge_sim::sim::thermostat::{AnyThermostat, CostAware, FixedThreshold};
use fridge_sim::sim::trial::Trial;
use fridge_sim::sim::types::{FridgeConfig, STEPS};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Recorded totals for the default fridge, the sawtooth price table, and a
/// door opened on every tenth step.
const GOLDEN_FIXED_COST: f64 = 8606.500000000076;
const GOLDEN_COST_AWARE_COST: f64 = 15885.70673148713;

/// Recorded totals for the default fridge, the sawtooth price table, and a
/// random door driven by `ChaCha8Rng::seed_from_u64(42)`.
const SEEDED_FIXED_COST: f64 = 8211.600000000064;
const SEEDED_COST_AWARE_COST: f64 = 15611.549828352141;

/// Same setup with the door driven by `StdRng::seed_from_u64(42)`.
///
/// `StdRng` makes no cross-version stream guarantee; re-record on a `rand`
/// upgrade.
const STD_RNG_FIXED_COST: f64 = 8082.1000000000695;
const STD_RNG_COST_AWARE_COST: f64 = 15520.109180680081;

fn chacha_door(seed: u64) -> RandomDoor<ChaCha8Rng> {
    RandomDoor::new(ChaCha8Rng::seed_from_u64(seed))
}

fn assert_close(actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn initial_conditions_hold_for_any_config() {
    let prices = common::sawtooth_prices();
    let configs = [
        FridgeConfig::default(),
        FridgeConfig::smart(),
        FridgeConfig {
            start_temp: -3.0,
            room_temp: 35.0,
            ..FridgeConfig::default()
        },
    ];
    for cfg in configs {
        let trace = simulate_trace(&cfg, &prices, Some(17)).expect("trace succeeds");
        let first = &trace.records[0];
        assert_eq!(first.temp_c, cfg.start_temp);
        assert_eq!(first.expense, 0.0);
    }
}

#[test]
fn sequences_span_full_horizon() {
    let prices = common::sawtooth_prices();
    for cfg in [FridgeConfig::default(), FridgeConfig::smart()] {
        let trace = simulate_trace(&cfg, &prices, Some(3)).expect("trace succeeds");
        assert_eq!(trace.temperatures().count(), STEPS);
        assert_eq!(trace.expenses().count(), STEPS);
    }
}

#[test]
fn expense_is_monotone() {
    let prices = common::sawtooth_prices();
    for seed in 0..4 {
        for cfg in [FridgeConfig::default(), FridgeConfig::smart()] {
            let trace = simulate_trace(&cfg, &prices, Some(seed)).expect("trace succeeds");
            let expenses: Vec<f64> = trace.expenses().collect();
            for w in expenses.windows(2) {
                assert!(w[1] >= w[0], "expense decreased: {} -> {}", w[0], w[1]);
            }
        }
    }
}

#[test]
fn equilibrium_fridge_costs_nothing() {
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig {
        start_temp: 5.0,
        room_temp: 5.0,
        compressor_temp: 5.0,
        target_temp: 5.0,
        smart: false,
        power_consumption: 1.0,
    };
    let trace = Trial::new(cfg, &prices, FixedThreshold::new(5.0), ClosedDoor)
        .and_then(|mut t| t.run_trace())
        .expect("trace succeeds");
    assert!(trace.temperatures().all(|t| t == 5.0));
    assert!(trace.records.iter().all(|r| !r.compressor_on));
    assert_eq!(trace.total_cost(), 0.0);
}

#[test]
fn constant_warm_fridge_costs_spoilage_every_step() {
    // room == start: the leak term vanishes whatever the door does.
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig {
        start_temp: 10.0,
        room_temp: 10.0,
        target_temp: 10.0,
        ..FridgeConfig::default()
    };
    let cost = simulate(&cfg, &prices, Some(99)).expect("run succeeds");
    let mut expected = 0.0;
    for _ in 1..STEPS {
        expected = expected + 0.0 + food_expense(10.0);
    }
    assert_close(cost, expected);
    assert_close(cost, 21094.49112324284);
}

#[test]
fn golden_fixed_threshold_cost() {
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig::default();
    let thermostat = AnyThermostat::from_config(&cfg);
    let trace = Trial::new(cfg, &prices, thermostat, PeriodicDoor { period: 10 })
        .and_then(|mut t| t.run_trace())
        .expect("trace succeeds");
    assert_close(trace.total_cost(), GOLDEN_FIXED_COST);

    let report = TrialReport::from_records(&trace.records);
    assert_eq!(report.compressor_steps, 5549);
    assert_eq!(report.door_openings, (STEPS - 1) / 10);
    assert_eq!(report.food_cost, 0.0);
}

#[test]
fn golden_cost_aware_cost() {
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig::smart();
    let trace = Trial::new(cfg, &prices, CostAware, PeriodicDoor { period: 10 })
        .and_then(|mut t| t.run_trace())
        .expect("trace succeeds");
    assert_close(trace.total_cost(), GOLDEN_COST_AWARE_COST);

    let report = TrialReport::from_records(&trace.records);
    assert_eq!(report.compressor_steps, 3216);
    assert_close(report.power_cost + report.food_cost, report.total_cost);
}

#[test]
fn seeded_golden_fixed_threshold_cost() {
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig::default();
    let thermostat = FixedThreshold::new(cfg.target_temp);
    let cost = Trial::new(cfg, &prices, thermostat, chacha_door(42))
        .and_then(|mut t| t.run())
        .expect("run succeeds");
    assert_close(cost, SEEDED_FIXED_COST);
}

#[test]
fn seeded_golden_cost_aware_cost() {
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig::smart();
    let cost = Trial::new(cfg, &prices, CostAware, chacha_door(42))
        .and_then(|mut t| t.run())
        .expect("run succeeds");
    assert_close(cost, SEEDED_COST_AWARE_COST);
}

#[test]
fn std_rng_golden_costs() {
    let prices = common::sawtooth_prices();
    let fixed = simulate(&FridgeConfig::default(), &prices, Some(42)).expect("run succeeds");
    let smart = simulate(&FridgeConfig::smart(), &prices, Some(42)).expect("run succeeds");
    assert_close(fixed, STD_RNG_FIXED_COST);
    assert_close(smart, STD_RNG_COST_AWARE_COST);
}

#[test]
fn seeded_cost_aware_is_reproducible() {
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig::smart();
    let runs: Vec<f64> = (0..3)
        .map(|_| simulate(&cfg, &prices, Some(2023)).expect("run succeeds"))
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn different_seeds_give_different_costs() {
    let prices = common::sawtooth_prices();
    let cfg = FridgeConfig::default();
    let a = simulate(&cfg, &prices, Some(1)).expect("run succeeds");
    let b = simulate(&cfg, &prices, Some(2)).expect("run succeeds");
    assert_ne!(a, b);
}

#[test]
fn seeded_door_opens_about_ten_percent() {
    let prices = common::flat_prices(1.0);
    let cfg = FridgeConfig::default();
    let thermostat = AnyThermostat::from_config(&cfg);
    let trace = Trial::new(cfg, &prices, thermostat, RandomDoor::seeded(8640))
        .and_then(|mut t| t.run_trace())
        .expect("trace succeeds");
    let opened = trace.records.iter().filter(|r| r.door_open).count();
    // mean 864, sd ~28
    assert!((700..1030).contains(&opened), "opened={opened}");
}

#[test]
fn power_expense_follows_decision() {
    let prices = common::sawtooth_prices();
    for cfg in [FridgeConfig::default(), FridgeConfig::smart()] {
        let trace = simulate_trace(&cfg, &prices, Some(44)).expect("trace succeeds");
        for r in &trace.records[1..] {
            if r.compressor_on {
                assert_eq!(r.power_expense, common::sawtooth_price(r.step));
            } else {
                assert_eq!(r.power_expense, 0.0);
            }
        }
    }
}

#[test]
fn short_price_table_is_rejected() {
    let prices = fridge_sim::io::price_table::PriceTable::from_fn(STEPS / 2, |_| 1.0)
        .expect("valid prices");
    let err = simulate(&FridgeConfig::default(), &prices, Some(1)).unwrap_err();
    assert!(matches!(err, SimError::PriceTableExhausted { .. }));
}
