//! Repeated network formation games
//!
//! This crate provides:
//! - An undirected graph substrate with exact shortest-path counting
//! - Edge, isolation and boolean actions with apply/revert semantics
//! - Exact betweenness and clustering, plus a sampling estimator with
//!   (epsilon, delta) guarantees
//! - Player strategies from passive to myopic best response
//! - A round-based game engine with conflict resolution and diagnostics
//! - Persistence, experiment pipelines and a reinforcement-learning
//!   environment

pub mod actions;
pub mod adapters;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod env;
pub mod error;
pub mod game;
pub mod network;
pub mod pipeline;
pub mod ports;
pub mod strategy;
pub mod types;
pub mod utility;
pub mod utils;

pub use actions::{Action, ActionSpace};
pub use error::{Error, Result};
pub use game::{Game, GamePhase, History, Increment, PlayerSpec, Rules};
pub use network::Graph;
pub use strategy::StrategyKind;
pub use types::{NodeId, PlayerId, Round};
pub use utility::UtilityFunction;
