//! Running games and batches of games with observers attached
//!
//! - [`GameSession`] plays one game and reports events
//! - [`ExperimentRunner`] plays seeded batches and aggregates outcomes
//! - observers collect progress, metrics and JSONL exports

pub mod experiment;
pub mod observers;
pub mod session;

pub use experiment::{ExperimentResult, ExperimentRunner};
pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver, RoundObservation,
};
pub use session::{ActionSource, GameSession};

pub use crate::ports::Observer;
