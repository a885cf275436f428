//! Shared primitive types

/// Identifier of a graph node. Nodes are dense integers in `[0, nb_players)`.
pub type NodeId = usize;

/// Identifier of a player. Each player owns the node with the same id.
pub type PlayerId = usize;

/// Index of a round in the game history. Round 0 is the seed graph.
pub type Round = usize;
