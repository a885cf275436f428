//! Inspect command - replay a saved game round by round

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::{
    analysis::{CentralityTrajectory, GameSummary},
    app::App,
    cli::output::{format_utility, print_kv, print_section, print_subsection},
    game::{Game, Increment},
};

#[derive(Parser, Debug)]
#[command(about = "Inspect a saved game")]
pub struct InspectArgs {
    /// Saved game (MessagePack)
    pub game: PathBuf,

    /// Show only this round, with its full edge list
    #[arg(long)]
    pub round: Option<usize>,

    /// Export the betweenness of every node in every round as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let app = App::new();
    let game = app
        .load_game(&args.game)
        .with_context(|| format!("loading game from {}", args.game.display()))?;

    print_section(&format!("Game: {}", args.game.display()));
    print_rules(&game);

    if let Some(round) = args.round {
        let increment = game.increment(round)?;
        print_round_detail(increment);
    } else {
        print_subsection("Rounds");
        println!(
            "  {:>5} {:>6} {:>7} {:>8}",
            "round", "edges", "active", "invalid"
        );
        for increment in game.history() {
            println!(
                "  {:>5} {:>6} {:>7} {:>8}",
                increment.round,
                increment.graph.edge_count(),
                increment.active_players(),
                increment.diagnostics.len()
            );
        }
        print_final(&game);
    }

    if let Some(path) = &args.csv {
        if game.history().is_empty() {
            return Err(anyhow!("game has no rounds to export"));
        }
        CentralityTrajectory::from_history(game.history())
            .save_csv(path)
            .with_context(|| format!("writing trajectory to {}", path.display()))?;
        println!("\nTrajectory written to {}", path.display());
    }

    Ok(())
}

fn print_rules(game: &Game) {
    let rules = game.rules();
    print_kv("Phase", &format!("{:?}", game.phase()));
    print_kv(
        "Progress",
        &format!("{}/{}", game.current_time_step(), rules.nb_time_steps),
    );
    print_kv("Action space", &rules.action_space.to_string());
    print_kv("Conflicts", &rules.conflict_resolution.to_string());
    print_kv("Seed", &game.seed().to_string());
    if !rules.impossible_actions.is_empty() {
        let impossible: Vec<String> = rules
            .impossible_actions
            .iter()
            .map(ToString::to_string)
            .collect();
        print_kv("Impossible", &impossible.join(", "));
    }
    if !rules.imposed_edges.is_empty() {
        let imposed: Vec<String> = rules.imposed_edges.iter().map(ToString::to_string).collect();
        print_kv("Imposed", &imposed.join(", "));
    }

    print_subsection("Nodes");
    for (node, label) in game.node_labels() {
        println!(
            "  {:>4}  {:16} {:14} {}",
            node,
            label.display_name,
            label.strategy.to_string(),
            label.player_type
        );
    }
}

fn print_round_detail(increment: &Increment) {
    print_subsection(&format!("Round {}", increment.round));
    for (player, action) in &increment.actions {
        println!("  {player:>4}  {action}");
    }
    for diagnostic in &increment.diagnostics {
        println!(
            "  {:>4}  rejected ({:?}): {}",
            diagnostic.player, diagnostic.kind, diagnostic.reason
        );
    }
    let edges: Vec<String> = increment
        .graph
        .edges()
        .into_iter()
        .map(|(a, b)| format!("{a}-{b}"))
        .collect();
    print_kv("Edges", &edges.join(" "));
}

fn print_final(game: &Game) {
    if game.history().is_empty() {
        return;
    }
    let summary = GameSummary::from_game(game);
    print_subsection("Final utilities");
    for (node, utility) in summary.final_utilities.iter().enumerate() {
        println!(
            "  {:>4}  {:>8}  betweenness {:.4}",
            node,
            format_utility(*utility),
            summary.final_betweenness[node]
        );
    }
}
