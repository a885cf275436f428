//! Players and their serializable descriptions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    ports::Strategy, strategy::StrategyKind, types::PlayerId, utility::UtilityFunction,
};

/// Role of a player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerType {
    /// Runs its strategy every round.
    #[default]
    Competitive,
    /// Filler for a slot nobody registered. Always passes.
    Passive,
    /// Takes its action from the caller each round.
    Human,
}

impl fmt::Display for PlayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerType::Competitive => f.write_str("competitive"),
            PlayerType::Passive => f.write_str("passive"),
            PlayerType::Human => f.write_str("human"),
        }
    }
}

/// Plain-data description of a player.
///
/// # Examples
///
/// ```
/// use ngt::{game::{PlayerSpec, PlayerType}, strategy::StrategyKind, utility::UtilityFunction};
///
/// let spec = PlayerSpec::new("alice")
///     .with_strategy(StrategyKind::Follower)
///     .with_utility(UtilityFunction::DegreeCentrality);
/// assert_eq!(spec.player_type, PlayerType::Competitive);
///
/// assert_eq!(PlayerSpec::human("bob").player_type, PlayerType::Human);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub display_name: String,
    pub player_type: PlayerType,
    pub utility: UtilityFunction,
    pub strategy: StrategyKind,
}

impl PlayerSpec {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            player_type: PlayerType::Competitive,
            utility: UtilityFunction::default(),
            strategy: StrategyKind::default(),
        }
    }

    pub fn passive(display_name: impl Into<String>) -> Self {
        Self::new(display_name)
            .with_player_type(PlayerType::Passive)
            .with_strategy(StrategyKind::Inactive)
    }

    pub fn human(display_name: impl Into<String>) -> Self {
        Self::new(display_name)
            .with_player_type(PlayerType::Human)
            .with_strategy(StrategyKind::Inactive)
    }

    pub fn with_player_type(mut self, player_type: PlayerType) -> Self {
        self.player_type = player_type;
        self
    }

    pub fn with_utility(mut self, utility: UtilityFunction) -> Self {
        self.utility = utility;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }
}

/// A registered player: its description, node id and live strategy.
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) spec: PlayerSpec,
    pub(crate) strategy: Box<dyn Strategy>,
}

impl Player {
    pub(crate) fn new(id: PlayerId, spec: PlayerSpec) -> Self {
        let strategy = spec.strategy.build();
        Self { id, spec, strategy }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn spec(&self) -> &PlayerSpec {
        &self.spec
    }

    pub fn display_name(&self) -> &str {
        &self.spec.display_name
    }

    pub fn player_type(&self) -> PlayerType {
        self.spec.player_type
    }

    pub fn utility(&self) -> &UtilityFunction {
        &self.spec.utility
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("spec", &self.spec)
            .finish()
    }
}
