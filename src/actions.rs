//! Reversible graph mutations available to players
//!
//! Every action can be applied to a graph and reverted afterwards, which is
//! what makes the what-if evaluation in the greedy strategy cheap.

pub mod action;
pub mod generate;
pub mod space;

pub use action::{Action, ActionKey, Edge, Isolation};
pub use generate::{
    ActionGenerator, BonusActions, all_double_edges, all_edges, all_isolations,
    generate_with_bonus,
};
pub use space::ActionSpace;
