//! Graph substrate shared by every other component
//!
//! The game is played over a simple undirected graph whose node set is fixed
//! when the game is initialized. Only edges change from round to round.

pub mod generators;
pub mod graph;
pub mod paths;

pub use graph::{EdgeList, Graph};
pub use paths::{ShortestPaths, shortest_path_lengths, shortest_paths};
