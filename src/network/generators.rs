//! Standard graph families

use rand::Rng;

use super::Graph;
use crate::{Error, Result};

/// Path `0 - 1 - ... - (n-1)`.
pub fn path(n: usize) -> Result<Graph> {
    Graph::from_edges(n, (1..n).map(|v| (v - 1, v)))
}

/// Cycle over `n` nodes. Fewer than three nodes give a path.
pub fn cycle(n: usize) -> Result<Graph> {
    let mut graph = path(n)?;
    if n >= 3 {
        graph.add_edge(n - 1, 0)?;
    }
    Ok(graph)
}

/// Star with hub `0`.
pub fn star(n: usize) -> Result<Graph> {
    Graph::from_edges(n, (1..n).map(|v| (0, v)))
}

pub fn complete(n: usize) -> Result<Graph> {
    Graph::from_edges(n, (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))))
}

/// Erdős–Rényi graph: every pair is linked independently with probability
/// `p`.
pub fn gnp<R: Rng>(n: usize, p: f64, rng: &mut R) -> Result<Graph> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidConfiguration {
            message: format!("edge probability {p} must lie in [0, 1]"),
        });
    }
    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in u + 1..n {
            if rng.random::<f64>() < p {
                graph.add_edge(u, v)?;
            }
        }
    }
    Ok(graph)
}
