//! Batches of seeded games

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::session::{GameSession, NoOverrides};
use crate::{Result, analysis::GameSummary, app::GameConfig, ports::Observer};

/// Aggregate outcome of an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub total_games: usize,
    pub base_seed: u64,
    /// Per player, the mean of its own final utility across games.
    pub mean_final_utility: Vec<f64>,
    pub mean_edge_count: f64,
    pub total_invalid_actions: usize,
    pub games: Vec<GameSummary>,
}

impl ExperimentResult {
    pub fn from_summaries(base_seed: u64, games: Vec<GameSummary>) -> Self {
        let total_games = games.len();
        let players = games
            .iter()
            .map(|g| g.final_utilities.len())
            .max()
            .unwrap_or(0);
        let mean = |sum: f64| {
            if total_games == 0 {
                0.0
            } else {
                sum / total_games as f64
            }
        };

        // A player missing from some games is averaged over the games that have it.
        let mean_final_utility = (0..players)
            .map(|player| {
                let values: Vec<f64> = games
                    .iter()
                    .filter_map(|g| g.final_utilities.get(player).copied())
                    .collect();
                values.iter().sum::<f64>() / values.len() as f64
            })
            .collect();
        let mean_edge_count = mean(games.iter().map(|g| g.final_edge_count as f64).sum());
        let total_invalid_actions = games.iter().map(|g| g.invalid_actions).sum();

        Self {
            total_games,
            base_seed,
            mean_final_utility,
            mean_edge_count,
            total_invalid_actions,
            games,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays `num_games` games from one config. Game `i` uses seed
/// `base_seed + i`, where the base seed is the config's or a random one.
pub struct ExperimentRunner<'a> {
    config: GameConfig,
    num_games: usize,
    session: GameSession<'a>,
}

impl<'a> ExperimentRunner<'a> {
    pub fn new(config: GameConfig, num_games: usize) -> Self {
        Self {
            config,
            num_games,
            session: GameSession::new(),
        }
    }

    pub fn with_observer(mut self, observer: &'a mut dyn Observer) -> Self {
        self.session = self.session.with_observer(observer);
        self
    }

    pub fn run(&mut self) -> Result<ExperimentResult> {
        self.config.validate()?;
        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        info!(games = self.num_games, base_seed, "experiment started");

        for observer in self.session.observers_mut() {
            observer.on_experiment_start(self.num_games)?;
        }

        let mut summaries = Vec::with_capacity(self.num_games);
        for game_num in 0..self.num_games {
            let config = self
                .config
                .clone()
                .with_seed(base_seed.wrapping_add(game_num as u64));
            let mut game = config.build_game()?;
            self.session
                .play_numbered(game_num, &mut game, &mut NoOverrides)?;
            summaries.push(GameSummary::from_game(&game));
        }

        for observer in self.session.observers_mut() {
            observer.on_experiment_end()?;
        }

        let result = ExperimentResult::from_summaries(base_seed, summaries);
        info!(
            games = result.total_games,
            mean_edges = result.mean_edge_count,
            invalid = result.total_invalid_actions,
            "experiment finished"
        );
        Ok(result)
    }
}
