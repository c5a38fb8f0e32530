//! CLI entry point for the downlink traffic simulator.

use clap::Parser;
use ransim_core::{Simulation, SimulationConfig};
use ransim_runner::{load_scenario, Report};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Slot-level downlink traffic simulator.
#[derive(Debug, Parser)]
#[command(name = "ransim", version, about)]
struct Args {
    /// Scenario YAML file; defaults to the built-in three-class downlink
    /// scenario.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the horizon, in slots.
    #[arg(long)]
    duration: Option<u64>,

    /// Override the random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of simultaneous transmission grants.
    #[arg(long)]
    channels: Option<usize>,

    /// Emit the final counters as JSON instead of the console table.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.scenario {
        Some(path) => {
            let config = load_scenario(path)?;
            debug!(path = %path.display(), "loaded scenario");
            config
        }
        None => SimulationConfig::downlink_default(0),
    };
    if let Some(duration) = args.duration {
        config.duration_slots = duration;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(channels) = args.channels {
        config.channel_capacity = channels;
    }

    let duration = config.duration_slots;
    let stats = Simulation::new(&config)?.run()?;
    let report = Report::new(duration, stats);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }
    Ok(())
}
