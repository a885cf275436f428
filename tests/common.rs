//! Common test utilities for the ngt test suite.
//!
//! Builders for small reference graphs and game configurations.

#![allow(dead_code)]

use ngt::{
    app::GameConfig,
    game::{PlayerSpec, Rules},
    network::{Graph, generators},
    strategy::StrategyKind,
};

pub fn cycle(n: usize) -> Graph {
    generators::cycle(n).unwrap()
}

pub fn star(n: usize) -> Graph {
    generators::star(n).unwrap()
}

pub fn path(n: usize) -> Graph {
    generators::path(n).unwrap()
}

/// A config where every slot is registered and plays `strategy`.
pub fn uniform_config(
    nodes: usize,
    rounds: usize,
    strategy: StrategyKind,
    seed: u64,
) -> GameConfig {
    let players = (0..nodes).map(|i| PlayerSpec::new(format!("p{i}")).with_strategy(strategy));
    GameConfig::new(Rules::new(nodes, rounds))
        .with_players(players)
        .with_seed(seed)
}

/// One player of each automated strategy, the remaining slots left passive.
pub fn mixed_config(nodes: usize, rounds: usize, seed: u64) -> GameConfig {
    let players = [
        StrategyKind::MyopicGreedy,
        StrategyKind::Follower,
        StrategyKind::RandomEgoist,
        StrategyKind::RandomRandom,
    ]
    .into_iter()
    .take(nodes)
    .enumerate()
    .map(|(i, kind)| PlayerSpec::new(format!("{kind}-{i}")).with_strategy(kind));
    GameConfig::new(Rules::new(nodes, rounds))
        .with_players(players)
        .with_seed(seed)
}
