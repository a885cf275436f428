//! Game options shared by the `play` and `experiment` commands

use std::path::PathBuf;

use clap::Args;

use crate::{
    Result,
    actions::ActionSpace,
    app::GameConfig,
    game::{ConflictResolution, PlayerSpec, Rules},
    strategy::StrategyKind,
    utility::UtilityFunction,
};

/// Either a JSON config file or flags describing a game.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// JSON game configuration. Replaces the rule and player flags
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Number of nodes, one per player slot
    #[arg(long, short = 'n', default_value_t = 10)]
    pub players: usize,

    /// Number of rounds
    #[arg(long, short = 'r', default_value_t = 10)]
    pub rounds: usize,

    /// Action space (edge, node, boolean, dynamic-edge)
    #[arg(long, default_value = "edge")]
    pub action_space: ActionSpace,

    /// Strategy per registered player, in node order. Without any, every
    /// slot plays myopic-greedy
    #[arg(long = "strategy", short = 's', value_delimiter = ',')]
    pub strategies: Vec<StrategyKind>,

    /// Utility every registered player maximizes
    #[arg(long, short = 'u', default_value = "betweenness")]
    pub utility: UtilityFunction,

    /// How identical simultaneous requests combine (parity, distinct)
    #[arg(long, default_value = "parity")]
    pub conflict_resolution: ConflictResolution,

    /// Base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate players in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl GameArgs {
    /// Build the game configuration. `--seed` and `--parallel` also apply
    /// on top of a config file.
    pub fn to_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => self.config_from_flags(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config.parallel |= self.parallel;
        config.validate()?;
        Ok(config)
    }

    fn config_from_flags(&self) -> GameConfig {
        let rules = Rules::new(self.players, self.rounds)
            .with_action_space(self.action_space)
            .with_conflict_resolution(self.conflict_resolution);
        let strategies = if self.strategies.is_empty() {
            vec![StrategyKind::MyopicGreedy; self.players]
        } else {
            self.strategies.clone()
        };
        let players = strategies.into_iter().enumerate().map(|(i, strategy)| {
            PlayerSpec::new(format!("{strategy}-{i}"))
                .with_strategy(strategy)
                .with_utility(self.utility)
        });
        GameConfig::new(rules).with_players(players)
    }
}
