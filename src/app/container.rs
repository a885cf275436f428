//! Dependency injection container for the game application.
//!
//! The container owns infrastructure dependencies and creates domain objects
//! from plain configuration.

use std::{path::Path, sync::Arc};

use super::config::GameConfig;
use crate::{Result, adapters::MsgPackRepository, game::Game, ports::GameRepository};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use ngt::app::{App, GameConfig};
/// use ngt::game::{PlayerSpec, Rules};
///
/// let app = App::new();
/// let config = GameConfig::new(Rules::new(5, 3))
///     .with_player(PlayerSpec::new("greedy"))
///     .with_seed(42);
/// let mut game = app.create_game(&config)?;
/// game.play_game()?;
/// # Ok::<(), ngt::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use ngt::app::App;
/// use ngt::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    /// Seed for configs that do not set one (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create an app with production defaults: MessagePack files and no
    /// default seed.
    pub fn new() -> Self {
        Self {
            game_repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Builder for an app with custom dependencies, mostly for tests.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn game_repository(&self) -> Arc<dyn GameRepository + Send + Sync> {
        Arc::clone(&self.game_repository)
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Create a game with every configured player registered. The graph is
    /// not initialized yet, so callers may still add players.
    ///
    /// The config's seed wins over the app default.
    pub fn create_game(&self, config: &GameConfig) -> Result<Game> {
        match (config.seed, self.default_seed) {
            (None, Some(seed)) => config.clone().with_seed(seed).build_game(),
            _ => config.build_game(),
        }
    }

    /// Restore a game from the configured repository.
    pub fn load_game(&self, path: &Path) -> Result<Game> {
        let record = self.game_repository.load(path)?;
        Game::from_record(record)
    }

    pub fn save_game(&self, game: &Game, path: &Path) -> Result<()> {
        self.game_repository.save(&game.to_record(), path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for an [`App`] with injected dependencies.
#[derive(Default)]
pub struct AppBuilder {
    game_repository: Option<Arc<dyn GameRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository<R: GameRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.game_repository = Some(Arc::new(repo));
        self
    }

    /// Seed used by every game whose config has none.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Falls back to `MsgPackRepository` when no repository
    /// was injected.
    pub fn build(self) -> App {
        App {
            game_repository: self
                .game_repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerSpec, Rules};

    #[test]
    fn test_app_creates_game_with_players() {
        let app = App::new();
        let config = GameConfig::new(Rules::new(4, 2)).with_player(PlayerSpec::new("a"));
        let game = app.create_game(&config).unwrap();
        assert_eq!(game.players().len(), 1);
    }

    #[test]
    fn test_app_applies_default_seed() {
        let app = App::for_testing().with_default_seed(42).build();
        let game = app.create_game(&GameConfig::default()).unwrap();
        assert_eq!(game.seed(), 42);
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();
        let config = GameConfig::default().with_seed(123);
        assert_eq!(app.create_game(&config).unwrap().seed(), 123);
    }
}
