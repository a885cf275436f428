//! ngt CLI - play and analyze repeated network formation games
//!
//! This CLI provides a unified interface for:
//! - Playing single games and saving them
//! - Running seeded batches of games
//! - Inspecting saved games round by round
//! - Benchmarking approximate betweenness against exact values

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ngt")]
#[command(version, about = "Network formation games between centrality-seeking players", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(Box<ngt::cli::commands::play::PlayArgs>),

    /// Run a batch of seeded games
    Experiment(Box<ngt::cli::commands::experiment::ExperimentArgs>),

    /// Inspect a saved game
    Inspect(ngt::cli::commands::inspect::InspectArgs),

    /// Compare approximate and exact betweenness
    Estimate(ngt::cli::commands::estimate::EstimateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ngt::cli::logger::init_logger(cli.verbose)?;

    match cli.command {
        Commands::Play(args) => ngt::cli::commands::play::execute(*args),
        Commands::Experiment(args) => ngt::cli::commands::experiment::execute(*args),
        Commands::Inspect(args) => ngt::cli::commands::inspect::execute(args),
        Commands::Estimate(args) => ngt::cli::commands::estimate::execute(args),
    }
}
