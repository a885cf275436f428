//! Play command - run a single game and report the final network

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    analysis::GameSummary,
    app::App,
    cli::{
        config::GameArgs,
        output::{format_utility, print_kv, print_section, print_subsection},
    },
    pipeline::{GameSession, JsonlObserver, MetricsObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Play one network formation game")]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Save the finished game (MessagePack)
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write the effective game configuration as JSON
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Stream every round as JSON lines
    #[arg(long)]
    pub jsonl: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.game.to_config()?;
    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("writing config to {}", path.display()))?;
    }

    let app = App::new();
    let mut game = app.create_game(&config)?;

    print_section("Network Formation Game");
    print_kv("Players", &config.rules.nb_players.to_string());
    print_kv("Rounds", &config.rules.nb_time_steps.to_string());
    print_kv("Action space", &config.rules.action_space.to_string());
    print_kv(
        "Conflicts",
        &config.rules.conflict_resolution.to_string(),
    );
    print_kv("Seed", &game.seed().to_string());

    let mut progress = ProgressObserver::new();
    let mut metrics = MetricsObserver::new();
    let mut jsonl = args.jsonl.as_ref().map(JsonlObserver::new).transpose()?;

    {
        let mut session = GameSession::new().with_observer(&mut metrics);
        if !args.no_progress {
            session = session.with_observer(&mut progress);
        }
        if let Some(observer) = jsonl.as_mut() {
            session = session.with_observer(observer);
        }
        session.play(&mut game)?;
    }

    let summary = GameSummary::from_game(&game);
    let metrics = metrics.summary();

    print_subsection("Result");
    print_kv("Rounds played", &summary.rounds.to_string());
    print_kv("Final edges", &summary.final_edge_count.to_string());
    print_kv("Peak edges", &metrics.max_edge_count.to_string());
    print_kv("Mean degree", &format!("{:.2}", summary.mean_degree));
    print_kv("Idle rounds", &summary.idle_rounds.to_string());
    print_kv("Invalid actions", &summary.invalid_actions.to_string());
    if let Some(node) = summary.most_central() {
        print_kv("Most central", &node.to_string());
    }

    print_subsection("Players");
    println!(
        "  {:>4}  {:16} {:14} {:14} {:>8} {:>11}",
        "node", "name", "strategy", "type", "utility", "betweenness"
    );
    for (node, label) in game.node_labels() {
        let utility = summary
            .final_utilities
            .get(node)
            .copied()
            .map_or_else(|| "-".to_string(), format_utility);
        let betweenness = summary.final_betweenness.get(node).copied().unwrap_or(0.0);
        println!(
            "  {:>4}  {:16} {:14} {:14} {:>8} {:>11.4}",
            node,
            label.display_name,
            label.strategy.to_string(),
            label.player_type.to_string(),
            utility,
            betweenness
        );
    }

    if let Some(path) = &args.save {
        app.save_game(&game, path)
            .with_context(|| format!("saving game to {}", path.display()))?;
        println!("\nGame saved to {}", path.display());
    }

    Ok(())
}
