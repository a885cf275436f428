//! Analysis of played games
//!
//! Turns histories into the data a plotter or report consumes: per-round
//! centrality trajectories (exportable as CSV) and final-state summaries.

pub mod stats;
pub mod trajectory;

pub use stats::GameSummary;
pub use trajectory::CentralityTrajectory;
