//! Observer port - abstraction for watching games as they are played
//!
//! Observers let the pipeline collect progress, metrics and exports without
//! coupling the game engine to any output format.

use crate::{
    Result,
    game::{Diagnostic, History, Increment, Rules},
    types::Round,
};

/// Observer trait for monitoring games and experiments
///
/// # Event Sequence
///
/// 1. `on_experiment_start(total_games)` - Once, when a batch starts
/// 2. For each game:
///    - `on_game_start(game_num, rules, seed_round)`
///    - `on_invalid_action(...)` - For each diagnostic of a round
///    - `on_round(game_num, increment)` - After every round
///    - `on_game_end(game_num, history)`
/// 3. `on_experiment_end()` - Once, at the end
///
/// Single games driven by [`GameSession`](crate::pipeline::GameSession) skip
/// the experiment events.
///
/// # Examples
///
/// ```no_run
/// use ngt::{game::Increment, ports::Observer};
///
/// struct EdgeCounter {
///     edges: Vec<usize>,
/// }
///
/// impl Observer for EdgeCounter {
///     fn on_round(&mut self, _game_num: usize, increment: &Increment) -> ngt::Result<()> {
///         self.edges.push(increment.graph.edge_count());
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game of a batch.
    fn on_experiment_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the graph is initialized, with the round-0 entry.
    fn on_game_start(&mut self, _game_num: usize, _rules: &Rules, _seed: &Increment) -> Result<()> {
        Ok(())
    }

    /// Called for every action the engine rejected during a round.
    fn on_invalid_action(
        &mut self,
        _game_num: usize,
        _round: Round,
        _diagnostic: &Diagnostic,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after each round is committed to history.
    fn on_round(&mut self, _game_num: usize, _increment: &Increment) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches its last round.
    fn on_game_end(&mut self, _game_num: usize, _history: &History) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game of a batch.
    fn on_experiment_end(&mut self) -> Result<()> {
        Ok(())
    }
}
