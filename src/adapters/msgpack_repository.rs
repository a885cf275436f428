//! MessagePack implementation of the game repository.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{Result, error::Error, game::GameRecord, ports::GameRepository};

/// Stores game records as MessagePack files via `rmp_serde`.
///
/// # Examples
///
/// ```no_run
/// use ngt::adapters::MsgPackRepository;
/// use ngt::game::{Game, Rules};
/// use ngt::ports::GameRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let mut game = Game::new(Rules::new(6, 5))?.with_seed(1);
/// game.play_game()?;
///
/// repo.save(&game.to_record(), Path::new("game.msgpack"))?;
/// let restored = Game::from_record(repo.load(Path::new("game.msgpack"))?)?;
/// # Ok::<(), ngt::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl GameRepository for MsgPackRepository {
    fn save(&self, record: &GameRecord, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, record).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize game record to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })
    }

    fn load(&self, path: &Path) -> Result<GameRecord> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
            operation: "deserialize game record from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
