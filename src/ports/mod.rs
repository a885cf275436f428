//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the game core and everything
//! that plugs into it: decision rules, observers and storage.

pub mod observer;
pub mod repository;
pub mod strategy;

pub use observer::Observer;
pub use repository::GameRepository;
pub use strategy::{DecisionContext, Strategy};
