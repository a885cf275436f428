//! Exact centrality and clustering measures

use crate::{
    network::{Graph, shortest_paths},
    types::NodeId,
};

/// Utility of a node with no edges.
///
/// Slightly below zero so that being connected to anything strictly beats
/// isolation in a best-response comparison.
pub const ISOLATED_UTILITY: f64 = -0.0001;

/// Betweenness summed over unordered pairs, without normalization.
///
/// Brandes' algorithm: one BFS per source followed by dependency
/// accumulation in reverse settling order. Every unordered pair is seen from
/// both endpoints, so the totals are halved.
pub fn raw_betweenness(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    let mut betweenness = vec![0.0; n];

    for source in graph.nodes() {
        let paths = shortest_paths(graph, source);
        let mut dependency = vec![0.0; n];
        for &w in paths.order.iter().rev() {
            for &v in &paths.predecessors[w] {
                dependency[v] += paths.sigma[v] / paths.sigma[w] * (1.0 + dependency[w]);
            }
            if w != source {
                betweenness[w] += dependency[w];
            }
        }
    }

    for value in &mut betweenness {
        *value /= 2.0;
    }
    betweenness
}

/// Normalized betweenness of every node: the pair sum divided by the number
/// of pairs not containing the node, `(n-1)(n-2)/2`.
///
/// Graphs with fewer than three nodes have all-zero betweenness.
pub fn betweenness_all(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 2 {
        return vec![0.0; n];
    }
    let scale = 2.0 / ((n - 1) * (n - 2)) as f64;
    raw_betweenness(graph)
        .into_iter()
        .map(|value| value * scale)
        .collect()
}

/// Betweenness as a fraction of all `n(n-1)/2` unordered pairs.
///
/// This is the quantity the sampling estimator approximates directly.
pub fn pair_fraction_betweenness(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    if n < 2 {
        return vec![0.0; n];
    }
    let scale = 2.0 / (n * (n - 1)) as f64;
    raw_betweenness(graph)
        .into_iter()
        .map(|value| value * scale)
        .collect()
}

/// Normalized betweenness of one node, or [`ISOLATED_UTILITY`] when the node
/// has no edges.
///
/// # Examples
///
/// ```
/// use ngt::{network::Graph, utility::{betweenness_centrality, ISOLATED_UTILITY}};
///
/// let star = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3)])?;
/// assert!((betweenness_centrality(&star, 0) - 1.0).abs() < 1e-12);
/// assert_eq!(betweenness_centrality(&star, 1), 0.0);
///
/// let empty = Graph::new(3);
/// assert_eq!(betweenness_centrality(&empty, 0), ISOLATED_UTILITY);
/// # Ok::<(), ngt::Error>(())
/// ```
pub fn betweenness_centrality(graph: &Graph, node: NodeId) -> f64 {
    if graph.degree(node) == 0 {
        return ISOLATED_UTILITY;
    }
    betweenness_all(graph).get(node).copied().unwrap_or(0.0)
}

/// Fraction of pairs of neighbors of `node` that are themselves adjacent.
pub fn local_clustering(graph: &Graph, node: NodeId) -> f64 {
    let neighbors: Vec<NodeId> = graph.neighbors(node).collect();
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }
    let mut links = 0usize;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if graph.has_edge(a, b) {
                links += 1;
            }
        }
    }
    (2 * links) as f64 / (k * (k - 1)) as f64
}

/// Mean local clustering coefficient over all nodes.
pub fn average_clustering(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    graph
        .nodes()
        .map(|node| local_clustering(graph, node))
        .sum::<f64>()
        / n as f64
}

/// Degree divided by the largest possible degree, `n - 1`.
pub fn degree_centrality(graph: &Graph, node: NodeId) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    graph.degree(node) as f64 / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
    }

    fn path(n: usize) -> Graph {
        Graph::from_edges(n, (0..n - 1).map(|i| (i, i + 1))).unwrap()
    }

    #[test]
    fn path_betweenness() {
        // 0 - 1 - 2 - 3 - 4
        let raw = raw_betweenness(&path(5));
        assert_eq!(raw, vec![0.0, 3.0, 4.0, 3.0, 0.0]);

        let normalized = betweenness_all(&path(5));
        assert!((normalized[2] - 4.0 / 6.0).abs() < TOLERANCE);
    }

    #[test]
    fn even_cycle_splits_antipodal_paths() {
        let normalized = betweenness_all(&cycle(10));
        for value in &normalized {
            assert!((value - 2.0 / 9.0).abs() < TOLERANCE);
        }

        let fraction = pair_fraction_betweenness(&cycle(10));
        assert!((fraction[0] - 8.0 / 45.0).abs() < TOLERANCE);
    }

    #[test]
    fn isolated_node_gets_sentinel() {
        let graph = Graph::from_edges(4, [(0, 1), (1, 2)]).unwrap();
        assert_eq!(betweenness_centrality(&graph, 3), ISOLATED_UTILITY);
        assert_eq!(betweenness_centrality(&graph, 0), 0.0);
        assert!(betweenness_centrality(&graph, 1) > 0.0);
    }

    #[test]
    fn tiny_graphs_have_zero_betweenness() {
        assert_eq!(betweenness_all(&Graph::new(0)), Vec::<f64>::new());
        assert_eq!(betweenness_all(&path(2)), vec![0.0, 0.0]);
    }

    #[test]
    fn clustering_of_triangle_with_tail() {
        // Triangle 0-1-2 plus pendant 3 attached to 0.
        let graph = Graph::from_edges(4, [(0, 1), (1, 2), (0, 2), (0, 3)]).unwrap();
        assert!((local_clustering(&graph, 0) - 1.0 / 3.0).abs() < TOLERANCE);
        assert_eq!(local_clustering(&graph, 1), 1.0);
        assert_eq!(local_clustering(&graph, 3), 0.0);
        let expected = (1.0 / 3.0 + 1.0 + 1.0 + 0.0) / 4.0;
        assert!((average_clustering(&graph) - expected).abs() < TOLERANCE);
    }

    #[test]
    fn degree_centrality_of_star() {
        let star = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
        assert_eq!(degree_centrality(&star, 0), 1.0);
        assert_eq!(degree_centrality(&star, 1), 0.25);
    }
}
