//! The repeated network formation game
//!
//! A [`Game`] owns the rules, the registered players, the live graph and an
//! append-only [`History`]. Each round every player picks one action, the
//! engine merges them into a single transition and records the result.

pub mod engine;
pub mod history;
pub mod player;
pub mod record;
pub mod rules;

pub use engine::{Game, GamePhase, NodeLabel};
pub use history::{Diagnostic, DiagnosticKind, History, Increment};
pub use player::{Player, PlayerSpec, PlayerType};
pub use record::GameRecord;
pub use rules::{ConflictResolution, Rules};
