//! Error types for the network game crate

use thiserror::Error;

use crate::types::{NodeId, PlayerId};

/// Main error type for the network game crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("too many players: the game has only {capacity} slots")]
    TooManyPlayers { capacity: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error(
        "insufficient topology for '{action_space}' actions: need at least {required} nodes, graph has {available}"
    )]
    InsufficientTopology {
        action_space: String,
        required: usize,
        available: usize,
    },

    #[error("game is over: all {nb_time_steps} rounds have been played")]
    TerminalGame { nb_time_steps: usize },

    #[error("graph has not been initialized")]
    NotInitialized,

    #[error("invalid action from player {player}: {reason}")]
    InvalidAction { player: PlayerId, reason: String },

    #[error("self-loop on node {node} is not allowed")]
    SelfLoop { node: NodeId },

    #[error("node {node} is out of range (graph has {node_count} nodes)")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("unknown player {player}")]
    UnknownPlayer { player: PlayerId },

    #[error("round {round} is out of range (history has {len} entries)")]
    RoundOutOfRange { round: usize, len: usize },

    #[error("invalid {parameter} {value}: must lie strictly between 0 and 1")]
    InvalidProbability { parameter: String, value: f64 },

    #[error("invalid action space '{input}'. Expected one of: {expected}")]
    ParseActionSpace { input: String, expected: String },

    #[error("invalid strategy '{input}'. Expected one of: {expected}")]
    ParseStrategy { input: String, expected: String },

    #[error("invalid utility function '{input}'. Expected one of: {expected}")]
    ParseUtility { input: String, expected: String },

    #[error("invalid conflict resolution '{input}'. Expected one of: {expected}")]
    ParseConflictResolution { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
