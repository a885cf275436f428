//! Serializable snapshot of a whole game

use serde::{Deserialize, Serialize};

use super::{History, PlayerSpec, Rules};
use crate::{Error, Result, types::Round};

/// Everything needed to restore a [`Game`](super::Game): rules, player
/// descriptions, history and the base seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub rules: Rules,
    pub players: Vec<PlayerSpec>,
    pub history: History,
    pub current_time_step: Round,
    pub seed: u64,
    #[serde(default)]
    pub parallel: bool,
}

impl GameRecord {
    /// Check that the record describes a reachable game state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the inconsistency.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        if self.players.len() > self.rules.nb_players {
            return Err(Error::TooManyPlayers {
                capacity: self.rules.nb_players,
            });
        }

        let inconsistent = |message: String| Err(Error::InvalidConfiguration { message });
        if self.history.is_empty() {
            if self.current_time_step != 0 {
                return inconsistent(format!(
                    "record is at round {} but has no history",
                    self.current_time_step
                ));
            }
            return Ok(());
        }

        if self.players.len() != self.rules.nb_players {
            return inconsistent(format!(
                "initialized game has {} players for {} nodes",
                self.players.len(),
                self.rules.nb_players
            ));
        }
        if self.history.len() != self.current_time_step + 1 {
            return inconsistent(format!(
                "record is at round {} but holds {} history entries",
                self.current_time_step,
                self.history.len()
            ));
        }
        if let Some((index, increment)) = self
            .history
            .iter()
            .enumerate()
            .find(|(index, increment)| increment.round != *index)
        {
            return inconsistent(format!(
                "history entry {index} is labelled round {}",
                increment.round
            ));
        }
        if let Some(increment) = self
            .history
            .iter()
            .find(|increment| increment.graph.node_count() != self.rules.nb_players)
        {
            return inconsistent(format!(
                "graph of round {} has {} nodes, expected {}",
                increment.round,
                increment.graph.node_count(),
                self.rules.nb_players
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, PlayerSpec};

    fn played(rounds: usize) -> Game {
        let mut game = Game::new(Rules::new(4, 6)).unwrap().with_seed(21);
        game.add_player(PlayerSpec::new("a")).unwrap();
        game.initialize_graph().unwrap();
        for _ in 0..rounds {
            game.play_round().unwrap();
        }
        game
    }

    #[test]
    fn record_of_a_played_game_is_valid() {
        let record = played(3).to_record();
        assert!(record.validate().is_ok());
        assert_eq!(record.history.len(), 4);
        assert_eq!(record.players.len(), 4);
    }

    #[test]
    fn truncated_history_is_rejected() {
        let mut record = played(3).to_record();
        record.current_time_step = 5;
        assert!(matches!(
            record.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn restored_game_picks_up_where_it_left_off() {
        let mut original = played(2);
        let mut restored = Game::from_record(original.to_record()).unwrap();
        assert_eq!(restored.current_time_step(), 2);

        original.play_game().unwrap();
        restored.play_game().unwrap();
        assert_eq!(restored.history(), original.history());
    }
}
