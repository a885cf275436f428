//! Built-in strategies and their serializable tags
//!
//! Players store a [`StrategyKind`] rather than a strategy object so that
//! game configurations and records remain plain data. The engine builds the
//! matching [`Strategy`] when a player is registered.

pub mod follower;
pub mod greedy;
pub mod inactive;
pub mod random;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use follower::Follower;
pub use greedy::MyopicGreedy;
pub use inactive::Inactive;
pub use random::{RandomEgoist, RandomRandom, random_egoist_action};

use crate::ports::Strategy;

/// Tag selecting one of the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Always passes.
    Inactive,
    /// Random action involving the player's own node.
    RandomEgoist,
    /// Random action between two other nodes.
    RandomRandom,
    /// Connects to the most central node it is not yet linked to.
    Follower,
    /// One-step best response over every candidate action.
    #[default]
    MyopicGreedy,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Inactive => Box::new(Inactive),
            StrategyKind::RandomEgoist => Box::new(RandomEgoist),
            StrategyKind::RandomRandom => Box::new(RandomRandom),
            StrategyKind::Follower => Box::new(Follower),
            StrategyKind::MyopicGreedy => Box::new(MyopicGreedy),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyKind::Inactive => "inactive",
            StrategyKind::RandomEgoist => "random-egoist",
            StrategyKind::RandomRandom => "random-random",
            StrategyKind::Follower => "follower",
            StrategyKind::MyopicGreedy => "myopic-greedy",
        };
        f.write_str(label)
    }
}

impl FromStr for StrategyKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalised.as_str() {
            "inactive" | "passive" => Ok(StrategyKind::Inactive),
            "random-egoist" | "egoist" => Ok(StrategyKind::RandomEgoist),
            "random-random" | "random" => Ok(StrategyKind::RandomRandom),
            "follower" => Ok(StrategyKind::Follower),
            "myopic-greedy" | "greedy" => Ok(StrategyKind::MyopicGreedy),
            _ => Err(crate::Error::ParseStrategy {
                input: s.to_string(),
                expected: "inactive, random-egoist, random-random, follower, myopic-greedy"
                    .to_string(),
            }),
        }
    }
}
