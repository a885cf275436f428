//! Unweighted single-source shortest paths

use std::collections::VecDeque;

use super::Graph;
use crate::types::NodeId;

/// Breadth-first search result from a single source.
///
/// Besides distances this records the number of shortest paths reaching each
/// node (`sigma`), the shortest-path predecessors, and the order in which
/// nodes were settled. Both Brandes' algorithm and the sampling estimator
/// walk this structure.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: NodeId,
    /// `None` for nodes unreachable from `source`.
    pub distance: Vec<Option<usize>>,
    /// Number of distinct shortest paths from `source`, as `f64` to avoid
    /// overflow on dense graphs.
    pub sigma: Vec<f64>,
    pub predecessors: Vec<Vec<NodeId>>,
    /// Reachable nodes in non-decreasing distance order, starting at `source`.
    pub order: Vec<NodeId>,
}

impl ShortestPaths {
    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance.get(node).copied().flatten().is_some()
    }

    /// Finite distances to every reachable node other than the source.
    pub fn finite_distances(&self) -> impl Iterator<Item = usize> + '_ {
        self.order
            .iter()
            .skip(1)
            .filter_map(|&node| self.distance[node])
    }
}

/// Run a breadth-first search from `source`.
pub fn shortest_paths(graph: &Graph, source: NodeId) -> ShortestPaths {
    let n = graph.node_count();
    let mut distance = vec![None; n];
    let mut sigma = vec![0.0; n];
    let mut predecessors = vec![Vec::new(); n];
    let mut order = Vec::with_capacity(n);

    if source >= n {
        return ShortestPaths {
            source,
            distance,
            sigma,
            predecessors,
            order,
        };
    }

    distance[source] = Some(0);
    sigma[source] = 1.0;
    let mut queue = VecDeque::from([source]);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let dv = distance[v].unwrap_or_default();
        for w in graph.neighbors(v) {
            match distance[w] {
                None => {
                    distance[w] = Some(dv + 1);
                    queue.push_back(w);
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                Some(dw) if dw == dv + 1 => {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
                Some(_) => {}
            }
        }
    }

    ShortestPaths {
        source,
        distance,
        sigma,
        predecessors,
        order,
    }
}

/// Hop distances from `source`; `None` marks unreachable nodes.
pub fn shortest_path_lengths(graph: &Graph, source: NodeId) -> Vec<Option<usize>> {
    shortest_paths(graph, source).distance
}
