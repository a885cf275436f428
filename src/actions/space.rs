//! Action spaces configured by the game rules

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::Action;

/// The kind of actions players may take in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionSpace {
    /// Single edge toggles between any two nodes.
    #[default]
    Edge,
    /// Isolation of a single node.
    Node,
    /// An accept/reject vote with no effect on the graph.
    Boolean,
    /// Per-player candidate sets produced by an action generator. Admits
    /// every graph-mutating variant.
    DynamicEdge,
}

impl ActionSpace {
    /// Minimum number of nodes the graph needs before a round can be played.
    pub fn min_nodes(self) -> usize {
        match self {
            ActionSpace::Edge | ActionSpace::DynamicEdge => 2,
            ActionSpace::Node | ActionSpace::Boolean => 1,
        }
    }

    /// Whether `action` is of a type this space accepts. Passing is always
    /// accepted.
    pub fn admits(self, action: &Action) -> bool {
        match (self, action) {
            (_, Action::NoOp) => true,
            (ActionSpace::Edge, Action::EdgeToggle(_)) => true,
            (
                ActionSpace::DynamicEdge,
                Action::EdgeToggle(_) | Action::DoubleEdgeToggle(..) | Action::Isolate(_),
            ) => true,
            (ActionSpace::Node, Action::Isolate(_)) => true,
            (ActionSpace::Boolean, Action::Accept(_)) => true,
            _ => false,
        }
    }

    /// Whether actions in this space mutate edges.
    pub fn is_edge_like(self) -> bool {
        matches!(self, ActionSpace::Edge | ActionSpace::DynamicEdge)
    }
}

impl fmt::Display for ActionSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActionSpace::Edge => "edge",
            ActionSpace::Node => "node",
            ActionSpace::Boolean => "boolean",
            ActionSpace::DynamicEdge => "dynamic-edge",
        };
        f.write_str(label)
    }
}

impl FromStr for ActionSpace {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "edge" => Ok(ActionSpace::Edge),
            "node" => Ok(ActionSpace::Node),
            "boolean" | "bool" => Ok(ActionSpace::Boolean),
            "dynamic-edge" | "dynamic_edge" | "dynamic" => Ok(ActionSpace::DynamicEdge),
            _ => Err(crate::Error::ParseActionSpace {
                input: s.to_string(),
                expected: "edge, node, boolean, dynamic-edge".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_space_admits_only_edge_toggles() {
        let space = ActionSpace::Edge;
        assert!(space.admits(&Action::edge(0, 1)));
        assert!(space.admits(&Action::NoOp));
        assert!(!space.admits(&Action::Accept(true)));
        assert!(!space.admits(&Action::isolate(0)));
        assert!(!space.admits(&Action::double_edge((0, 1), (1, 2))));
    }

    #[test]
    fn dynamic_space_admits_all_mutations() {
        let space = ActionSpace::DynamicEdge;
        assert!(space.admits(&Action::edge(0, 1)));
        assert!(space.admits(&Action::double_edge((0, 1), (1, 2))));
        assert!(space.admits(&Action::isolate(3)));
        assert!(!space.admits(&Action::Accept(false)));
    }

    #[test]
    fn minimum_node_counts() {
        assert_eq!(ActionSpace::Edge.min_nodes(), 2);
        assert_eq!(ActionSpace::DynamicEdge.min_nodes(), 2);
        assert_eq!(ActionSpace::Node.min_nodes(), 1);
        assert_eq!(ActionSpace::Boolean.min_nodes(), 1);
    }

    #[test]
    fn parse_round_trips_display() {
        for space in [
            ActionSpace::Edge,
            ActionSpace::Node,
            ActionSpace::Boolean,
            ActionSpace::DynamicEdge,
        ] {
            assert_eq!(space.to_string().parse::<ActionSpace>().unwrap(), space);
        }
        assert!("hyperedge".parse::<ActionSpace>().is_err());
    }
}
