//! Candidate action generation

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use super::{Action, Edge};
use crate::types::NodeId;

/// Every edge toggle between two distinct nodes of `nodes`.
///
/// # Examples
///
/// ```
/// use ngt::actions::all_edges;
///
/// let actions = all_edges(&[0, 1, 2, 3]);
/// assert_eq!(actions.len(), 6);
/// ```
pub fn all_edges(nodes: &[NodeId]) -> Vec<Action> {
    pairs(nodes).into_iter().map(Action::EdgeToggle).collect()
}

/// Every toggle of two distinct edges among `nodes`.
pub fn all_double_edges(nodes: &[NodeId]) -> Vec<Action> {
    let edges = pairs(nodes);
    let mut actions = Vec::new();
    for (i, &first) in edges.iter().enumerate() {
        for &second in &edges[i + 1..] {
            actions.push(Action::DoubleEdgeToggle(first, second));
        }
    }
    actions
}

pub fn all_isolations(nodes: &[NodeId]) -> Vec<Action> {
    nodes.iter().map(|&node| Action::isolate(node)).collect()
}

/// Which extra actions a [`generate_with_bonus`] draw may unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusActions {
    None,
    DoubleEdges,
    Isolations,
}

/// Draw a random subset of `available_nodes` nodes out of `0..total_nodes`
/// and return every edge toggle among them. With probability `bonus_rate`
/// the bonus actions over the same subset are appended.
pub fn generate_with_bonus<R: Rng>(
    total_nodes: usize,
    available_nodes: usize,
    bonus: BonusActions,
    bonus_rate: f64,
    rng: &mut R,
) -> Vec<Action> {
    let mut nodes: Vec<NodeId> = (0..total_nodes).collect();
    nodes.shuffle(rng);
    nodes.truncate(available_nodes);
    nodes.sort_unstable();

    let mut actions = all_edges(&nodes);
    if rng.random::<f64>() < bonus_rate {
        match bonus {
            BonusActions::None => {}
            BonusActions::DoubleEdges => actions.extend(all_double_edges(&nodes)),
            BonusActions::Isolations => actions.extend(all_isolations(&nodes)),
        }
    }
    actions
}

/// Data description of a per-player candidate set.
///
/// Stored in the rules instead of a callback so that games stay serializable
/// and replayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionGenerator {
    AllEdges,
    AllDoubleEdges,
    AllIsolations,
    WithBonus {
        available_nodes: usize,
        bonus: BonusActions,
        bonus_rate: f64,
    },
}

impl ActionGenerator {
    /// Produce candidates for a graph with `node_count` nodes.
    pub fn generate<R: Rng>(&self, node_count: usize, rng: &mut R) -> Vec<Action> {
        let nodes: Vec<NodeId> = (0..node_count).collect();
        match self {
            ActionGenerator::AllEdges => all_edges(&nodes),
            ActionGenerator::AllDoubleEdges => all_double_edges(&nodes),
            ActionGenerator::AllIsolations => all_isolations(&nodes),
            ActionGenerator::WithBonus {
                available_nodes,
                bonus,
                bonus_rate,
            } => generate_with_bonus(
                node_count,
                (*available_nodes).min(node_count),
                *bonus,
                *bonus_rate,
                rng,
            ),
        }
    }
}

fn pairs(nodes: &[NodeId]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(nodes.len() * nodes.len().saturating_sub(1) / 2);
    for (i, &a) in nodes.iter().enumerate() {
        for &b in &nodes[i + 1..] {
            if a != b {
                edges.push(Edge::new(a, b));
            }
        }
    }
    edges
}
