//! In-memory game repository for tests.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, game::GameRecord, ports::GameRepository};

/// Keeps MessagePack-encoded records in a shared map keyed by path.
///
/// Clones share the same storage.
///
/// # Examples
///
/// ```
/// use ngt::adapters::InMemoryRepository;
/// use ngt::game::{Game, Rules};
/// use ngt::ports::GameRepository;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let mut game = Game::new(Rules::new(4, 2))?.with_seed(5);
/// game.play_game()?;
///
/// repo.save(&game.to_record(), Path::new("game"))?;
/// let record = repo.load(Path::new("game"))?;
/// assert_eq!(record.history.len(), 3);
/// # Ok::<(), ngt::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn clear(&self) {
        self.storage().clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&key(path))
    }

    // A panic while holding the lock cannot leave the map half-written.
    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

impl GameRepository for InMemoryRepository {
    fn save(&self, record: &GameRecord, path: &Path) -> Result<()> {
        let bytes = rmp_serde::to_vec(record).map_err(|e| Error::SerializationContext {
            operation: "serialize game record for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage().insert(key(path), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<GameRecord> {
        let storage = self.storage();
        let bytes = storage.get(&key(path)).ok_or_else(|| Error::Io {
            operation: format!("load game record from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize game record from in-memory storage".to_string(),
            message: e.to_string(),
        })
    }
}
