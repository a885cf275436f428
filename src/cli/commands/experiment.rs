//! Experiment command - play many seeded games from one configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::GameArgs,
        output::{format_number, format_utility, print_kv, print_section, print_subsection},
    },
    pipeline::{ExperimentRunner, MetricsObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Run a batch of games and aggregate the outcomes")]
pub struct ExperimentArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 20)]
    pub games: usize,

    /// Write the aggregated result as JSON
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: ExperimentArgs) -> Result<()> {
    let config = args.game.to_config()?;

    print_section("Experiment");
    print_kv("Games", &format_number(args.games));
    print_kv("Players", &config.rules.nb_players.to_string());
    print_kv("Rounds", &config.rules.nb_time_steps.to_string());

    let mut progress = ProgressObserver::new();
    let mut metrics = MetricsObserver::new();
    let result = {
        let mut runner = ExperimentRunner::new(config, args.games).with_observer(&mut metrics);
        if !args.no_progress {
            runner = runner.with_observer(&mut progress);
        }
        runner.run()?
    };
    let metrics = metrics.summary();

    print_subsection("Aggregate");
    print_kv("Base seed", &result.base_seed.to_string());
    print_kv("Rounds played", &format_number(metrics.total_rounds));
    print_kv("Mean final edges", &format!("{:.2}", result.mean_edge_count));
    print_kv("Peak edges", &metrics.max_edge_count.to_string());
    print_kv(
        "Invalid actions",
        &format_number(result.total_invalid_actions),
    );

    print_subsection("Mean final utility");
    for (player, utility) in result.mean_final_utility.iter().enumerate() {
        println!("  {player:>4}  {}", format_utility(*utility));
    }

    if let Some(path) = &args.output {
        result
            .save(path)
            .with_context(|| format!("writing result to {}", path.display()))?;
        println!("\nResult saved to {}", path.display());
    }

    Ok(())
}
