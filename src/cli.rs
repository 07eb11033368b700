use std::env;
use std::path::PathBuf;

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub scenario: Option<PathBuf>,
    pub preset: Option<String>,
    pub prices: Option<PathBuf>,
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub smart: bool,
    pub compare: bool,
    pub report: bool,
    pub json: bool,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--scenario" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --scenario (expected a TOML file path)",
                )?;
                if opts.scenario.replace(PathBuf::from(path)).is_some() {
                    return Err("--scenario provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --preset (expected a preset name)",
                )?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--prices" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --prices (expected a CSV file path)",
                )?;
                opts.prices = Some(PathBuf::from(path));
            }
            "--trials" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --trials (expected a count)",
                )?;
                let n = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--trials value \"{raw}\" is not a valid count"))?;
                opts.trials = Some(n);
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(
                    i,
                    "missing value for --seed (expected a u64)",
                )?;
                let s = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(s);
            }
            "--smart" => opts.smart = true,
            "--compare" => opts.compare = true,
            "--report" => opts.report = true,
            "--json" => opts.json = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.scenario.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--scenario` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }
    if opts.smart && opts.compare {
        return Err("`--smart` has no effect with `--compare`, which runs both".to_string());
    }
    if opts.report && opts.compare {
        return Err(
            "`--report` traces a single thermostat; drop `--compare` or use `--smart`".to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("fridge-sim - Monte Carlo cost estimate for a thermostat-controlled fridge");
    eprintln!();
    eprintln!("Usage: fridge-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML config file");
    eprintln!("  --preset <name>     Use a built-in preset (baseline, smart, hot_kitchen)");
    eprintln!("  --prices <path>     Price table CSV (overrides the scenario)");
    eprintln!("  --trials <n>        Number of trials to average (default: 10)");
    eprintln!("  --seed <u64>        Master random seed (default: OS entropy)");
    eprintln!("  --smart             Use the cost-aware thermostat");
    eprintln!("  --compare           Run both thermostats on the same seeds");
    eprintln!("  --report            Also print a breakdown of one traced trial");
    eprintln!("  --json              Print results as JSON");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
    eprintln!("--report traces one thermostat and cannot be combined with --compare.");
    eprintln!("Set RUST_LOG to adjust log verbosity.");
}
