//! fridge-sim entry point: CLI wiring and config-driven batch runs.

use std::path::Path;
use std::process;

use fridge_sim::cli::{self, CliOptions};
use fridge_sim::config::ScenarioConfig;
use fridge_sim::error::SimError;
use fridge_sim::io::price_table::PriceTable;
use fridge_sim::reporting::{NamedEstimate, RunSummary, render_json, render_text};
use fridge_sim::runner::{entropy_seed, estimate_cost, simulate_trace};
use fridge_sim::sim::kpi::TrialReport;
use fridge_sim::sim::thermostat::AnyThermostat;
use fridge_sim::sim::types::FridgeConfig;
use fridge_sim::telemetry::init_tracing;

/// Loads the scenario: `--scenario` takes priority, then `--preset`, then baseline.
fn load_scenario(opts: &CliOptions) -> Result<ScenarioConfig, SimError> {
    let mut scenario = if let Some(ref path) = opts.scenario {
        ScenarioConfig::from_toml_file(path)?
    } else if let Some(ref name) = opts.preset {
        ScenarioConfig::from_preset(name)?
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(ref path) = opts.prices {
        scenario.simulation.price_table = path.clone();
    }
    if let Some(trials) = opts.trials {
        scenario.simulation.trials = trials;
    }
    if opts.seed.is_some() {
        scenario.simulation.seed = opts.seed;
    }
    if opts.smart {
        scenario.fridge.smart = true;
    }
    Ok(scenario)
}

fn run(opts: &CliOptions) -> Result<String, SimError> {
    let scenario = load_scenario(opts)?;

    let errors = scenario.validate();
    if let Some(first) = errors.first() {
        for e in &errors {
            eprintln!("{e}");
        }
        return Err(first.clone().into());
    }

    let prices = PriceTable::from_csv_path(Path::new(&scenario.simulation.price_table))?;
    let seed = match scenario.simulation.seed {
        Some(s) => s,
        None => entropy_seed()?,
    };
    let trials = scenario.simulation.trials;

    let configs: Vec<FridgeConfig> = if opts.compare {
        vec![
            FridgeConfig {
                smart: false,
                ..scenario.fridge.clone()
            },
            FridgeConfig {
                smart: true,
                ..scenario.fridge.clone()
            },
        ]
    } else {
        vec![scenario.fridge.clone()]
    };

    let mut estimates = Vec::with_capacity(configs.len());
    for cfg in &configs {
        let estimate = estimate_cost(cfg, &prices, trials, Some(seed))?;
        estimates.push(NamedEstimate {
            thermostat: AnyThermostat::from_config(cfg).name(),
            estimate,
        });
    }

    let report = if opts.report {
        let trace = simulate_trace(&scenario.fridge, &prices, Some(seed))?;
        Some(TrialReport::from_records(&trace.records))
    } else {
        None
    };

    let summary = RunSummary { estimates, report };
    if opts.json {
        render_json(&summary).map_err(|e| SimError::Io(e.into()))
    } else {
        Ok(render_text(&summary))
    }
}

fn main() {
    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if opts.help {
        cli::print_usage();
        return;
    }

    init_tracing(opts.json);

    match run(&opts) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
