use std::fmt;
use std::io::{self, Write};
use std::process::ExitCode;
use std::str::FromStr;

use icfold::{ConsoleReporter, Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: icfold [identifier_count] [round_count] [seed] [capacity ...]";

/// Parse the next positional argument, if any, as `T`.
fn next_arg<T>(args: &mut impl Iterator<Item = String>, name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    args.next()
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| format!("invalid {name} {raw:?}: {e}"))
        })
        .transpose()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SimulationConfig, String> {
    let mut config = SimulationConfig::default();

    if let Some(n) = next_arg::<usize>(&mut args, "identifier_count")? {
        config = config.with_identifier_count(n);
    }
    if let Some(n) = next_arg::<usize>(&mut args, "round_count")? {
        config = config.with_round_count(n);
    }
    if let Some(seed) = next_arg::<u64>(&mut args, "seed")? {
        config = config.with_seed(seed);
    }
    let mut capacities = Vec::new();
    while let Some(c) = next_arg::<usize>(&mut args, "capacity")? {
        capacities.push(c);
    }
    if !capacities.is_empty() {
        config = config.with_capacities(capacities);
    }
    Ok(config)
}

/// Parse, run and report. Returns the process exit status: 0 on success,
/// 1 when the simulation fails, 2 on unparsable arguments.
fn run_cli(args: impl Iterator<Item = String>, out: impl Write, err: &mut impl Write) -> u8 {
    let config = match parse_args(args) {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(err, "{e}\n{USAGE}");
            return 2;
        }
    };

    let mut reporter = ConsoleReporter::new(out);
    match Simulation::new(config).and_then(|mut sim| sim.run(&mut reporter)) {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(err, "icfold: {e}");
            1
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let status = run_cli(
        std::env::args().skip(1),
        io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    ExitCode::from(status)
}
