//! Per-round centrality of every node

use std::{io, path::Path};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::History,
    types::{NodeId, Round},
    utility::betweenness_all,
};

/// Normalized betweenness of every node after every round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityTrajectory {
    pub rounds: Vec<Round>,
    /// `values[i][node]` is the centrality of `node` after `rounds[i]`.
    pub values: Vec<Vec<f64>>,
}

/// One CSV row in long format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrajectoryRow {
    round: Round,
    node: NodeId,
    betweenness: f64,
}

impl CentralityTrajectory {
    /// Compute the trajectory of a history. Rounds are evaluated in parallel.
    pub fn from_history(history: &History) -> Self {
        let values = history
            .increments()
            .par_iter()
            .map(|increment| betweenness_all(&increment.graph))
            .collect();
        Self {
            rounds: history.iter().map(|increment| increment.round).collect(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// Centrality of one node over time.
    pub fn node_series(&self, node: NodeId) -> Vec<f64> {
        self.values
            .iter()
            .map(|round| round.get(node).copied().unwrap_or(0.0))
            .collect()
    }

    pub fn final_values(&self) -> Option<&[f64]> {
        self.values.last().map(Vec::as_slice)
    }

    /// Node with the highest final centrality. Ties go to the lower id.
    pub fn final_leader(&self) -> Option<NodeId> {
        let last = self.final_values()?;
        last.iter()
            .enumerate()
            .max_by(|(a, x), (b, y)| x.total_cmp(y).then(b.cmp(a)))
            .map(|(node, _)| node)
    }

    /// Write `round,node,betweenness` rows.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for (round, values) in self.rounds.iter().zip(&self.values) {
            for (node, &betweenness) in values.iter().enumerate() {
                csv.serialize(TrajectoryRow {
                    round: *round,
                    node,
                    betweenness,
                })?;
            }
        }
        csv.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(io::BufWriter::new(file))
    }
}
