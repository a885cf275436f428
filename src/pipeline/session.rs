//! Driving a single game while notifying observers

use std::collections::BTreeMap;

use crate::{
    Error, Result,
    actions::Action,
    game::{Game, GamePhase},
    ports::Observer,
    types::PlayerId,
};

/// Source of externally chosen actions, consulted before every round.
///
/// Human front-ends and scripted tests implement this; returning an empty
/// map lets every player run its own strategy.
pub trait ActionSource {
    fn actions_for(&mut self, game: &Game) -> Result<BTreeMap<PlayerId, Action>>;
}

impl<F> ActionSource for F
where
    F: FnMut(&Game) -> Result<BTreeMap<PlayerId, Action>>,
{
    fn actions_for(&mut self, game: &Game) -> Result<BTreeMap<PlayerId, Action>> {
        self(game)
    }
}

/// Leaves every player to its own strategy.
pub(crate) struct NoOverrides;

impl ActionSource for NoOverrides {
    fn actions_for(&mut self, _game: &Game) -> Result<BTreeMap<PlayerId, Action>> {
        Ok(BTreeMap::new())
    }
}

/// Plays one game to the end and reports every event to its observers.
///
/// # Examples
///
/// ```
/// use ngt::game::{Game, Rules};
/// use ngt::pipeline::{GameSession, MetricsObserver};
///
/// let mut metrics = MetricsObserver::new();
/// let mut game = Game::new(Rules::new(5, 4))?.with_seed(3);
/// GameSession::new().with_observer(&mut metrics).play(&mut game)?;
/// assert_eq!(metrics.summary().total_rounds, 4);
/// # Ok::<(), ngt::Error>(())
/// ```
#[derive(Default)]
pub struct GameSession<'a> {
    observers: Vec<&'a mut dyn Observer>,
}

impl<'a> GameSession<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: &'a mut dyn Observer) -> Self {
        self.observers.push(observer);
        self
    }

    /// Initialize the game if needed and play every remaining round.
    pub fn play(&mut self, game: &mut Game) -> Result<()> {
        self.play_numbered(0, game, &mut NoOverrides)
    }

    /// Like [`play`](Self::play), asking `source` for override actions
    /// before every round.
    pub fn play_with(&mut self, game: &mut Game, source: &mut dyn ActionSource) -> Result<()> {
        self.play_numbered(0, game, source)
    }

    pub(crate) fn play_numbered(
        &mut self,
        game_num: usize,
        game: &mut Game,
        source: &mut dyn ActionSource,
    ) -> Result<()> {
        if game.phase() == GamePhase::Initializing {
            game.initialize_graph()?;
        }
        let seed = game.history().get(0).ok_or(Error::NotInitialized)?;
        for observer in &mut self.observers {
            observer.on_game_start(game_num, game.rules(), seed)?;
        }

        while !game.is_terminal() {
            let overrides = source.actions_for(game)?;
            let increment = game.play_round_with(&overrides)?;
            for observer in &mut self.observers {
                for diagnostic in &increment.diagnostics {
                    observer.on_invalid_action(game_num, increment.round, diagnostic)?;
                }
                observer.on_round(game_num, increment)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_game_end(game_num, game.history())?;
        }
        Ok(())
    }

    pub(crate) fn observers_mut(&mut self) -> &mut [&'a mut dyn Observer] {
        &mut self.observers
    }
}
