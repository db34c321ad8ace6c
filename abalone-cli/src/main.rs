//! Abalone CLI - Command-line interface
//!
//! Commands:
//! - play: Play one random game
//! - simulate: Play many random games in parallel
//! - replay: Apply moves in notation and show the position

mod play;
mod playout;
mod replay;
mod simulate;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use abalone_core::{GameConfig, GameInfo, Layout};

#[derive(Parser)]
#[command(name = "abalone")]
#[command(about = "Abalone rules engine")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Game config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Starting layout (classic, belgian-daisy, empty); overrides the config
    #[arg(long, global = true)]
    layout: Option<Layout>,

    /// Maximum moves per game; overrides the config
    #[arg(long, global = true)]
    max_moves: Option<u32>,

    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one uniformly random game
    Play(play::PlayArgs),
    /// Play many random games in parallel and report statistics
    Simulate(simulate::SimulateArgs),
    /// Apply moves in notation and print the resulting position
    Replay(replay::ReplayArgs),
    /// Print game metadata as JSON
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    let config = resolve_config(&cli.global)?;
    let seed = cli.global.seed;

    match cli.command {
        Commands::Play(args) => play::run(args, config, seed),
        Commands::Simulate(args) => simulate::run(args, config, seed),
        Commands::Replay(args) => replay::run(args, config),
        Commands::Info => {
            let info = GameInfo {
                default_config: config,
                ..GameInfo::abalone()
            };
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(args: &GlobalArgs) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(layout) = args.layout {
        config.layout = layout;
    }
    if let Some(max_moves) = args.max_moves {
        config.max_moves = max_moves;
    }
    config.validate().context("Invalid game config")?;

    tracing::debug!("Using config: {:?}", config);
    Ok(config)
}
