//! Saving and loading games through both repositories.

mod common;

use std::path::Path;

use tempfile::TempDir;

use ngt::{
    Error,
    adapters::{InMemoryRepository, MsgPackRepository},
    game::{Game, GameRecord},
    ports::GameRepository,
    strategy::StrategyKind,
};

fn finished_game() -> Game {
    let mut game = common::mixed_config(5, 6, 31).build_game().unwrap();
    game.play_game().unwrap();
    game
}

#[test]
fn msgpack_round_trip_preserves_the_record() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("game.msgpack");
    let game = finished_game();

    let repo = MsgPackRepository::new();
    repo.save(&game.to_record(), &path).unwrap();
    assert!(path.exists());

    let record = repo.load(&path).unwrap();
    assert_eq!(record, game.to_record());

    let restored = Game::from_record(record).unwrap();
    assert!(restored.is_terminal());
    assert_eq!(restored.history(), game.history());
    assert_eq!(restored.node_labels(), game.node_labels());
}

#[test]
fn in_memory_round_trip_preserves_the_record() {
    let repo = InMemoryRepository::new();
    let game = finished_game();
    let path = Path::new("games/first");

    repo.save(&game.to_record(), path).unwrap();
    assert!(repo.contains(path));
    assert_eq!(repo.load(path).unwrap(), game.to_record());
}

#[test]
fn partial_game_resumes_after_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("partial.msgpack");
    let config = common::uniform_config(5, 8, StrategyKind::RandomEgoist, 77);

    let mut original = config.build_game().unwrap();
    original.initialize_graph().unwrap();
    for _ in 0..3 {
        original.play_round().unwrap();
    }
    MsgPackRepository::new()
        .save(&original.to_record(), &path)
        .unwrap();

    let record = MsgPackRepository::new().load(&path).unwrap();
    let mut restored = Game::from_record(record).unwrap();
    original.play_game().unwrap();
    restored.play_game().unwrap();
    assert_eq!(restored.history(), original.history());
}

#[test]
fn json_round_trip_of_a_record() {
    let record = finished_game().to_record();
    let json = serde_json::to_string(&record).unwrap();
    let restored: GameRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.history, record.history);
    assert_eq!(restored.players, record.players);
    assert_eq!(restored.seed, record.seed);
}

#[test]
fn missing_files_are_io_errors() {
    let temp_dir = TempDir::new().unwrap();
    let err = MsgPackRepository::new()
        .load(&temp_dir.path().join("absent.msgpack"))
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(InMemoryRepository::new().load(Path::new("absent")).is_err());
}

#[test]
fn corrupted_records_are_rejected_on_restore() {
    let mut record = finished_game().to_record();
    record.current_time_step = 2;
    assert!(Game::from_record(record).is_err());
}
