//! Action variants with apply/revert semantics

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, network::Graph, types::NodeId};

/// An undirected edge with normalized endpoints (`u <= v`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(NodeId, NodeId)", into = "(NodeId, NodeId)")]
pub struct Edge {
    u: NodeId,
    v: NodeId,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self {
            u: a.min(b),
            v: a.max(b),
        }
    }

    pub fn u(&self) -> NodeId {
        self.u
    }

    pub fn v(&self) -> NodeId {
        self.v
    }

    pub fn is_self_loop(&self) -> bool {
        self.u == self.v
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.u == node || self.v == node
    }

    fn validate(&self, node_count: usize) -> Result<()> {
        if self.is_self_loop() {
            return Err(Error::SelfLoop { node: self.u });
        }
        if self.v >= node_count {
            return Err(Error::NodeOutOfRange {
                node: self.v,
                node_count,
            });
        }
        Ok(())
    }
}

impl From<(NodeId, NodeId)> for Edge {
    fn from((a, b): (NodeId, NodeId)) -> Self {
        Edge::new(a, b)
    }
}

impl From<Edge> for (NodeId, NodeId) {
    fn from(edge: Edge) -> Self {
        (edge.u, edge.v)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

/// Removal of every edge incident to one node.
///
/// The removed neighbors are captured on `apply` so that `revert` restores
/// exactly those edges. Only one frame of undo is kept: applying again
/// overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Isolation {
    pub node: NodeId,
    #[serde(skip)]
    removed: Vec<NodeId>,
}

impl Isolation {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            removed: Vec::new(),
        }
    }

    /// Neighbors removed by the last `apply`.
    pub fn removed(&self) -> &[NodeId] {
        &self.removed
    }
}

/// An intent to mutate the shared graph.
///
/// Equality and hashing are structural: edge endpoints are normalized, the
/// two edges of a double toggle are unordered, and an isolation compares by
/// node only.
///
/// # Examples
///
/// ```
/// use ngt::{actions::Action, network::Graph};
///
/// let mut graph = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3)])?;
/// let original = graph.clone();
///
/// let mut isolate = Action::isolate(0);
/// isolate.apply(&mut graph)?;
/// assert_eq!(graph.degree(0), 0);
///
/// isolate.revert(&mut graph)?;
/// assert_eq!(graph, original);
///
/// assert_eq!(Action::edge(3, 1), Action::edge(1, 3));
/// # Ok::<(), ngt::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    NoOp,
    EdgeToggle(Edge),
    DoubleEdgeToggle(Edge, Edge),
    Isolate(Isolation),
    /// Vote of the boolean action space. Has no effect on the graph.
    Accept(bool),
}

/// Copyable structural identity of an [`Action`], without captured state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionKey {
    NoOp,
    Edge(Edge),
    DoubleEdge(Edge, Edge),
    Isolate(NodeId),
    Accept(bool),
}

impl Action {
    pub fn edge(u: NodeId, v: NodeId) -> Self {
        Action::EdgeToggle(Edge::new(u, v))
    }

    pub fn double_edge(first: (NodeId, NodeId), second: (NodeId, NodeId)) -> Self {
        let (a, b) = (Edge::from(first), Edge::from(second));
        Action::DoubleEdgeToggle(a.min(b), a.max(b))
    }

    pub fn isolate(node: NodeId) -> Self {
        Action::Isolate(Isolation::new(node))
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Action::NoOp)
    }

    pub fn key(&self) -> ActionKey {
        match self {
            Action::NoOp => ActionKey::NoOp,
            Action::EdgeToggle(edge) => ActionKey::Edge(*edge),
            Action::DoubleEdgeToggle(a, b) => ActionKey::DoubleEdge(*a.min(b), *a.max(b)),
            Action::Isolate(isolation) => ActionKey::Isolate(isolation.node),
            Action::Accept(accept) => ActionKey::Accept(*accept),
        }
    }

    /// Human-readable variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::NoOp => "no-op",
            Action::EdgeToggle(_) => "edge toggle",
            Action::DoubleEdgeToggle(..) => "double edge toggle",
            Action::Isolate(_) => "isolation",
            Action::Accept(_) => "acceptance vote",
        }
    }

    /// Check that the action only references existing nodes and never
    /// proposes a self-loop.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfLoop`] or [`Error::NodeOutOfRange`].
    pub fn validate(&self, node_count: usize) -> Result<()> {
        match self {
            Action::NoOp | Action::Accept(_) => Ok(()),
            Action::EdgeToggle(edge) => edge.validate(node_count),
            Action::DoubleEdgeToggle(a, b) => {
                a.validate(node_count)?;
                b.validate(node_count)
            }
            Action::Isolate(isolation) if isolation.node >= node_count => {
                Err(Error::NodeOutOfRange {
                    node: isolation.node,
                    node_count,
                })
            }
            Action::Isolate(_) => Ok(()),
        }
    }

    /// Apply the mutation in place.
    ///
    /// The action is validated first, so a failing call leaves the graph
    /// untouched.
    pub fn apply(&mut self, graph: &mut Graph) -> Result<()> {
        self.validate(graph.node_count())?;
        match self {
            Action::NoOp | Action::Accept(_) => {}
            Action::EdgeToggle(edge) => {
                graph.toggle_edge(edge.u, edge.v)?;
            }
            Action::DoubleEdgeToggle(a, b) => {
                graph.toggle_edge(a.u, a.v)?;
                graph.toggle_edge(b.u, b.v)?;
            }
            Action::Isolate(isolation) => {
                isolation.removed = graph.isolate(isolation.node);
            }
        }
        Ok(())
    }

    /// Undo the last `apply`.
    ///
    /// Toggles are their own inverse. An isolation restores the neighbors it
    /// captured and then forgets them.
    pub fn revert(&mut self, graph: &mut Graph) -> Result<()> {
        match self {
            Action::Isolate(isolation) => {
                for other in std::mem::take(&mut isolation.removed) {
                    graph.add_edge(isolation.node, other)?;
                }
                Ok(())
            }
            _ => self.apply(graph),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::NoOp => f.write_str("pass"),
            Action::EdgeToggle(edge) => write!(f, "toggle {edge}"),
            Action::DoubleEdgeToggle(a, b) => write!(f, "toggle {a} + {b}"),
            Action::Isolate(isolation) => write!(f, "isolate {}", isolation.node),
            Action::Accept(true) => f.write_str("accept"),
            Action::Accept(false) => f.write_str("reject"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn edge_normalizes_endpoints() {
        let edge = Edge::new(5, 2);
        assert_eq!((edge.u(), edge.v()), (2, 5));
        assert!(edge.contains(5));
        assert!(!edge.contains(3));
    }

    #[test]
    fn structural_equality_ignores_direction_and_order() {
        assert_eq!(Action::edge(0, 1), Action::edge(1, 0));
        assert_eq!(
            Action::double_edge((0, 1), (2, 3)),
            Action::double_edge((3, 2), (1, 0))
        );
        assert_eq!(
            Action::DoubleEdgeToggle(Edge::new(2, 3), Edge::new(0, 1)),
            Action::double_edge((0, 1), (2, 3))
        );
        assert_ne!(Action::edge(0, 1), Action::edge(0, 2));

        let set: HashSet<Action> = [Action::edge(0, 1), Action::edge(1, 0)].into();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn isolation_equality_ignores_captured_state() {
        let mut graph = Graph::from_edges(3, [(0, 1)]).unwrap();
        let mut applied = Action::isolate(0);
        applied.apply(&mut graph).unwrap();
        assert_eq!(applied, Action::isolate(0));
    }

    #[test]
    fn edge_toggle_is_involution() {
        let mut graph = Graph::from_edges(3, [(0, 1)]).unwrap();
        let original = graph.clone();
        let mut action = Action::edge(1, 2);
        action.apply(&mut graph).unwrap();
        assert!(graph.has_edge(1, 2));
        action.apply(&mut graph).unwrap();
        assert_eq!(graph, original);
    }

    #[test]
    fn double_edge_toggle_is_involution() {
        let mut graph = Graph::from_edges(4, [(0, 1)]).unwrap();
        let original = graph.clone();
        let mut action = Action::double_edge((0, 1), (2, 3));
        action.apply(&mut graph).unwrap();
        assert_eq!(graph.edges(), vec![(2, 3)]);
        action.apply(&mut graph).unwrap();
        assert_eq!(graph, original);
    }

    #[test]
    fn reapplying_isolation_overwrites_capture() {
        let mut graph = Graph::from_edges(4, [(0, 1), (0, 2)]).unwrap();
        let mut action = Action::isolate(0);
        action.apply(&mut graph).unwrap();
        graph.add_edge(0, 3).unwrap();
        action.apply(&mut graph).unwrap();
        action.revert(&mut graph).unwrap();
        assert_eq!(graph.edges(), vec![(0, 3)]);
    }

    #[test]
    fn invalid_actions_leave_graph_untouched() {
        let mut graph = Graph::from_edges(3, [(0, 1)]).unwrap();
        let original = graph.clone();

        let mut self_loop = Action::edge(2, 2);
        assert!(matches!(
            self_loop.apply(&mut graph),
            Err(Error::SelfLoop { node: 2 })
        ));

        let mut partly_out_of_range = Action::double_edge((0, 1), (1, 7));
        assert!(partly_out_of_range.apply(&mut graph).is_err());

        let mut isolate = Action::isolate(3);
        assert!(isolate.apply(&mut graph).is_err());

        assert_eq!(graph, original);
    }

    #[test]
    fn accept_and_noop_do_not_mutate() {
        let mut graph = Graph::from_edges(2, [(0, 1)]).unwrap();
        Action::Accept(true).apply(&mut graph).unwrap();
        Action::NoOp.apply(&mut graph).unwrap();
        assert_eq!(graph.edges(), vec![(0, 1)]);
    }

    #[test]
    fn serde_skips_captured_neighbors() {
        let mut graph = Graph::from_edges(3, [(0, 1), (0, 2)]).unwrap();
        let mut action = Action::isolate(0);
        action.apply(&mut graph).unwrap();

        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"Isolate":{"node":0}}"#);

        let restored: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, action);
        if let Action::Isolate(isolation) = restored {
            assert!(isolation.removed().is_empty());
        }
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(Action::edge(4, 1).to_string(), "toggle (1, 4)");
        assert_eq!(Action::NoOp.to_string(), "pass");
        assert_eq!(Action::isolate(2).to_string(), "isolate 2");
    }
}
