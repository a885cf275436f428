//! Repository port for game persistence.

use std::path::Path;

use crate::{Result, game::GameRecord};

/// Port for persisting and loading game records.
///
/// A [`GameRecord`] is plain data (rules, player tags, history, seed), so any
/// serde format can back this trait.
///
/// # Examples
///
/// ```no_run
/// use ngt::ports::GameRepository;
/// use ngt::game::Game;
/// use std::path::Path;
///
/// fn checkpoint<R: GameRepository>(repo: &R, game: &Game, path: &Path) -> ngt::Result<()> {
///     repo.save(&game.to_record(), path)
/// }
/// ```
pub trait GameRepository {
    /// Save a record to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization
    /// fails.
    fn save(&self, record: &GameRecord, path: &Path) -> Result<()>;

    /// Load a record from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path` or the stored bytes
    /// cannot be decoded.
    fn load(&self, path: &Path) -> Result<GameRecord>;
}
