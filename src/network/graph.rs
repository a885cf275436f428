//! Simple undirected graph with a fixed node set

use std::fmt;

use petgraph::graphmap::UnGraphMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, types::NodeId};

/// Undirected simple graph over the nodes `0..node_count`.
///
/// Self-loops and parallel edges are impossible by construction. Every
/// traversal (`neighbors`, `edges`) is ordered by node id, so two graphs with
/// the same edge set behave identically regardless of how they were built.
///
/// # Examples
///
/// ```
/// use ngt::network::Graph;
///
/// let mut graph = Graph::new(4);
/// graph.add_edge(0, 1)?;
/// graph.toggle_edge(1, 2)?;
/// assert!(graph.has_edge(2, 1));
/// assert_eq!(graph.degree(1), 2);
///
/// assert!(graph.add_edge(3, 3).is_err());
/// # Ok::<(), ngt::Error>(())
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(into = "EdgeList", try_from = "EdgeList")]
pub struct Graph {
    inner: UnGraphMap<NodeId, ()>,
}

impl Graph {
    /// Create a graph with `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        let mut inner = UnGraphMap::with_capacity(node_count, 0);
        for node in 0..node_count {
            inner.add_node(node);
        }
        Self { inner }
    }

    /// Create a graph from an explicit edge list.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge is a self-loop or references a node
    /// outside `0..node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new(node_count);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// True when the graph has no edges at all.
    pub fn is_edgeless(&self) -> bool {
        self.inner.edge_count() == 0
    }

    /// Node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.node_count()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.inner.contains_edge(u, v)
    }

    /// Add the edge `{u, v}`. Returns `false` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfLoop`] when `u == v` and
    /// [`Error::NodeOutOfRange`] when either endpoint is not a node.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool> {
        self.check_endpoints(u, v)?;
        Ok(self.inner.add_edge(u, v, ()).is_none())
    }

    /// Remove the edge `{u, v}`. Returns `false` if it was absent.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> bool {
        self.inner.remove_edge(u, v).is_some()
    }

    /// Remove the edge if present, otherwise add it.
    ///
    /// Returns whether the edge is present after the toggle.
    pub fn toggle_edge(&mut self, u: NodeId, v: NodeId) -> Result<bool> {
        self.check_endpoints(u, v)?;
        if self.inner.remove_edge(u, v).is_some() {
            Ok(false)
        } else {
            self.inner.add_edge(u, v, ());
            Ok(true)
        }
    }

    /// Remove every edge incident to `node`, returning the former neighbors.
    pub fn isolate(&mut self, node: NodeId) -> Vec<NodeId> {
        let removed: Vec<NodeId> = self.neighbors(node).collect();
        for &other in &removed {
            self.inner.remove_edge(node, other);
        }
        removed
    }

    /// Neighbors of `node` in ascending id order. Empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + use<> {
        let mut neighbors: Vec<NodeId> = if self.inner.contains_node(node) {
            self.inner.neighbors(node).collect()
        } else {
            Vec::new()
        };
        neighbors.sort_unstable();
        neighbors.into_iter()
    }

    pub fn degree(&self, node: NodeId) -> usize {
        if self.inner.contains_node(node) {
            self.inner.neighbors(node).count()
        } else {
            0
        }
    }

    /// All edges as `(low, high)` pairs, sorted.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<(NodeId, NodeId)> = self
            .inner
            .all_edges()
            .map(|(a, b, _)| (a.min(b), a.max(b)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Row-major `n x n` adjacency matrix with `1.0` for present edges.
    pub fn adjacency_matrix(&self) -> Vec<f64> {
        let n = self.node_count();
        let mut matrix = vec![0.0; n * n];
        for (u, v) in self.edges() {
            matrix[u * n + v] = 1.0;
            matrix[v * n + u] = 1.0;
        }
        matrix
    }

    fn check_endpoints(&self, u: NodeId, v: NodeId) -> Result<()> {
        if u == v {
            return Err(Error::SelfLoop { node: u });
        }
        let node_count = self.node_count();
        for node in [u, v] {
            if node >= node_count {
                return Err(Error::NodeOutOfRange { node, node_count });
            }
        }
        Ok(())
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.node_count() == other.node_count() && self.edges() == other.edges()
    }
}

impl Eq for Graph {}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.node_count())
            .field("edges", &self.edges())
            .finish()
    }
}

/// Plain-data form of a [`Graph`], used for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeList {
    pub node_count: usize,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl From<Graph> for EdgeList {
    fn from(graph: Graph) -> Self {
        Self {
            node_count: graph.node_count(),
            edges: graph.edges(),
        }
    }
}

impl TryFrom<EdgeList> for Graph {
    type Error = Error;

    fn try_from(list: EdgeList) -> Result<Self> {
        Graph::from_edges(list.node_count, list.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_has_isolated_nodes() {
        let graph = Graph::new(5);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_edgeless());
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn add_edge_rejects_self_loop_and_out_of_range() {
        let mut graph = Graph::new(3);
        assert!(matches!(
            graph.add_edge(1, 1),
            Err(Error::SelfLoop { node: 1 })
        ));
        assert!(matches!(
            graph.add_edge(0, 3),
            Err(Error::NodeOutOfRange {
                node: 3,
                node_count: 3
            })
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_edge_is_idempotent() {
        let mut graph = Graph::new(3);
        assert!(graph.add_edge(0, 1).unwrap());
        assert!(!graph.add_edge(1, 0).unwrap());
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn toggle_twice_restores_graph() {
        let mut graph = Graph::from_edges(4, [(0, 1), (2, 3)]).unwrap();
        let before = graph.clone();
        assert!(graph.toggle_edge(1, 2).unwrap());
        assert!(!graph.toggle_edge(2, 1).unwrap());
        assert_eq!(graph, before);
    }

    #[test]
    fn neighbors_are_sorted() {
        let graph = Graph::from_edges(5, [(2, 4), (2, 0), (2, 3), (2, 1)]).unwrap();
        assert_eq!(graph.neighbors(2).collect::<Vec<_>>(), vec![0, 1, 3, 4]);
        assert_eq!(graph.degree(2), 4);
        assert_eq!(graph.neighbors(17).count(), 0);
    }

    #[test]
    fn isolate_returns_removed_neighbors() {
        let mut graph = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2)]).unwrap();
        let removed = graph.isolate(0);
        assert_eq!(removed, vec![1, 2, 3]);
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.edges(), vec![(1, 2)]);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = Graph::from_edges(4, [(0, 1), (2, 3)]).unwrap();
        let b = Graph::from_edges(4, [(3, 2), (1, 0)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Graph::from_edges(5, [(0, 1), (2, 3)]).unwrap());
    }

    #[test]
    fn adjacency_matrix_is_symmetric() {
        let graph = Graph::from_edges(3, [(0, 2)]).unwrap();
        assert_eq!(
            graph.adjacency_matrix(),
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn serde_uses_edge_list() {
        let graph = Graph::from_edges(4, [(3, 1), (0, 2)]).unwrap();
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(json, r#"{"node_count":4,"edges":[[0,2],[1,3]]}"#);

        let restored: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, graph);
    }

    #[test]
    fn deserializing_self_loop_fails() {
        let result: std::result::Result<Graph, _> =
            serde_json::from_str(r#"{"node_count":2,"edges":[[1,1]]}"#);
        assert!(result.is_err());
    }
}
