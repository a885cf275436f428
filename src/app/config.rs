//! Configuration types for game creation.

use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{Game, PlayerSpec, Rules},
};

/// Everything needed to set up a game: rules, registered players, seed and
/// execution mode.
///
/// Slots without a registered player are filled with passive players when
/// the graph is initialized.
///
/// # Examples
///
/// ```
/// use ngt::app::GameConfig;
/// use ngt::game::{PlayerSpec, Rules};
/// use ngt::strategy::StrategyKind;
///
/// let config = GameConfig::new(Rules::new(8, 20))
///     .with_player(PlayerSpec::new("greedy"))
///     .with_player(PlayerSpec::new("follower").with_strategy(StrategyKind::Follower))
///     .with_seed(42)
///     .with_parallel(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rules: Rules,
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    /// Base seed. `None` draws one at random.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Run player decisions on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

impl GameConfig {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            players: Vec::new(),
            seed: None,
            parallel: false,
        }
    }

    pub fn with_player(mut self, player: PlayerSpec) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_players<I>(mut self, players: I) -> Self
    where
        I: IntoIterator<Item = PlayerSpec>,
    {
        self.players.extend(players);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check the rules and every player description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyPlayers`] when more players are listed than
    /// the rules have slots, or the first rule/utility validation error.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        if self.players.len() > self.rules.nb_players {
            return Err(Error::TooManyPlayers {
                capacity: self.rules.nb_players,
            });
        }
        for player in &self.players {
            player.utility.validate()?;
        }
        Ok(())
    }

    /// Create the game this config describes, with every listed player
    /// registered. The graph is not initialized yet.
    pub fn build_game(&self) -> Result<Game> {
        self.validate()?;
        let mut game = Game::new(self.rules.clone())?.with_parallel(self.parallel);
        if let Some(seed) = self.seed {
            game = game.with_seed(seed);
        }
        for player in &self.players {
            game.add_player(player.clone())?;
        }
        Ok(game)
    }

    /// Load a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create config {path:?}"),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        actions::ActionSpace,
        utility::{ApproximateBetweenness, UtilityFunction},
    };

    #[test]
    fn too_many_players_is_rejected() {
        let config = GameConfig::new(Rules::new(1, 3))
            .with_players([PlayerSpec::new("a"), PlayerSpec::new("b")]);
        assert!(matches!(
            config.validate(),
            Err(Error::TooManyPlayers { capacity: 1 })
        ));
    }

    #[test]
    fn json_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game.json");
        let config = GameConfig::new(Rules::new(6, 4).with_action_space(ActionSpace::Node))
            .with_player(
                PlayerSpec::new("sampler").with_utility(UtilityFunction::ApproximateBetweenness(
                    ApproximateBetweenness::new(0.1, 0.1).unwrap(),
                )),
            )
            .with_seed(9);

        config.save(&path).unwrap();
        assert_eq!(GameConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let json = r#"{"rules": {
            "nb_players": 3,
            "nb_time_steps": 2,
            "action_space": "Edge",
            "impossible_actions": [],
            "conflict_resolution": "Parity",
            "default_generator": "AllEdges",
            "generators": {}
        }}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert!(config.players.is_empty());
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
    }
}
