//! Headless autopilot CLI.
//!
//! Plays seeded rounds without a terminal to check how a tuning behaves.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # 100 pursuit rounds
//!   cargo run --bin simulate -- -n 20 --mode discrete
//!   cargo run --bin simulate -- --seed 42 --json     # Reproducible, JSON out

use anyhow::Context;
use clap::Parser;
use skyward::autopilot::{run_batch, AutopilotConfig};
use skyward::core::GameConfig;
use skyward::simulation::ControlMode;
use skyward::utils::logging;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "simulate", about = "Run headless autopilot rounds")]
struct Args {
    /// Number of rounds
    #[arg(short = 'n', long, default_value_t = 100)]
    rounds: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Frame cap per round
    #[arg(long, default_value_t = 18_000)]
    max_frames: u64,

    /// Control scheme the autopilot drives
    #[arg(long, value_enum, default_value_t = ControlMode::Pursuit)]
    mode: ControlMode,

    /// Largest aim offset from the gap center, in field units
    #[arg(long, default_value_t = 80.0)]
    aim_error: f64,

    /// Tuning file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init_stderr()?;
    let args = Args::parse();

    let game = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    let (game, warnings) = game.sanitized();
    for w in &warnings {
        warn!("config: {w}");
    }

    let config = AutopilotConfig {
        rounds: args.rounds,
        seed: args.seed,
        max_frames: args.max_frames,
        mode: args.mode,
        aim_error: args.aim_error,
        game,
    };

    if !args.json {
        println!("Configuration:");
        println!("  Rounds:     {}", config.rounds);
        println!("  Mode:       {}", config.mode);
        println!("  Aim error:  {}", config.aim_error);
        println!("  Max frames: {}", config.max_frames);
        if let Some(seed) = config.seed {
            println!("  Seed:       {}", seed);
        }
        println!();
    }

    let report = run_batch(&config);

    if args.json {
        println!("{}", report.to_json().context("serialize report")?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}
