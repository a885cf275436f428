//! Application layer with dependency injection container.
//!
//! ```text
//! App (DI container)
//!  ├─ owns   GameRepository adapter (MsgPackRepository / InMemoryRepository)
//!  └─ builds Game from GameConfig
//! ```
//!
//! # Usage
//!
//! ```
//! use ngt::app::{App, GameConfig};
//! use ngt::adapters::InMemoryRepository;
//! use std::path::Path;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//!
//! let mut game = app.create_game(&GameConfig::default())?;
//! game.play_game()?;
//! app.save_game(&game, Path::new("checkpoint"))?;
//! let restored = app.load_game(Path::new("checkpoint"))?;
//! assert_eq!(restored.history(), game.history());
//! # Ok::<(), ngt::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::GameConfig;
pub use container::{App, AppBuilder};
