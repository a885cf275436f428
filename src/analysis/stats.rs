//! Summary statistics of finished games

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    game::Game,
    types::Round,
    utility::betweenness_all,
    utils::derive_seed,
};

/// Final state of one game, as reported by the CLI and aggregated by
/// experiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub rounds: Round,
    pub final_edge_count: usize,
    /// Each player's own utility on the final graph.
    pub final_utilities: Vec<f64>,
    /// Normalized betweenness of every node on the final graph.
    pub final_betweenness: Vec<f64>,
    pub mean_degree: f64,
    pub invalid_actions: usize,
    /// Rounds in which nobody changed the graph.
    pub idle_rounds: usize,
}

impl GameSummary {
    pub fn from_game(game: &Game) -> Self {
        let graph = game.graph();
        // Sampled utilities draw from a stream no round uses.
        let mut rng = StdRng::seed_from_u64(derive_seed(game.seed(), u64::MAX));
        let final_utilities = game
            .players()
            .iter()
            .map(|player| player.utility().evaluate(graph, player.id(), &mut rng))
            .collect();

        let n = graph.node_count();
        let mean_degree = if n == 0 {
            0.0
        } else {
            graph.nodes().map(|node| graph.degree(node)).sum::<usize>() as f64 / n as f64
        };
        let history = game.history();
        let idle_rounds = history
            .iter()
            .skip(1)
            .zip(history.iter())
            .filter(|(next, prev)| next.graph == prev.graph)
            .count();

        Self {
            seed: game.seed(),
            rounds: game.current_time_step(),
            final_edge_count: graph.edge_count(),
            final_utilities,
            final_betweenness: betweenness_all(graph),
            mean_degree,
            invalid_actions: history.diagnostic_count(),
            idle_rounds,
        }
    }

    /// Node with the highest final betweenness. Ties go to the lower id.
    pub fn most_central(&self) -> Option<usize> {
        self.final_betweenness
            .iter()
            .enumerate()
            .max_by(|(a, x), (b, y)| x.total_cmp(y).then(b.cmp(a)))
            .map(|(node, _)| node)
    }
}
