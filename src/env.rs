//! Reinforcement-learning harness around a game
//!
//! [`NetworkEnv`] exposes a gym-style `reset`/`step` interface for one
//! learning agent that owns node 0. Every other player runs its configured
//! strategy. There is no training loop here; callers bring their own.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    actions::{Action, all_edges},
    app::GameConfig,
    game::{Game, PlayerSpec},
    types::{NodeId, PlayerId},
    utility::{betweenness_centrality, degree_centrality, local_clustering},
};

/// How the agent is rewarded after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RewardFunction {
    /// The agent's betweenness centrality.
    #[default]
    Centrality,
    /// `+1` when centrality rose (or stayed at the maximum of 1), `-1`
    /// otherwise.
    CentralityImprovement,
    DegreeCentrality,
    /// The agent's local clustering coefficient.
    Clustering,
}

impl fmt::Display for RewardFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RewardFunction::Centrality => "centrality",
            RewardFunction::CentralityImprovement => "centrality-improvement",
            RewardFunction::DegreeCentrality => "degree-centrality",
            RewardFunction::Clustering => "clustering",
        };
        f.write_str(label)
    }
}

impl FromStr for RewardFunction {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "centrality" => Ok(RewardFunction::Centrality),
            "centrality-improvement" => Ok(RewardFunction::CentralityImprovement),
            "degree-centrality" | "degree" => Ok(RewardFunction::DegreeCentrality),
            "clustering" => Ok(RewardFunction::Clustering),
            _ => Err(Error::InvalidConfiguration {
                message: format!(
                    "unknown reward function '{s}' (expected centrality, \
                     centrality-improvement, degree-centrality, clustering)"
                ),
            }),
        }
    }
}

/// Outcome of one [`NetworkEnv::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Flattened adjacency matrix after the round.
    pub observation: Vec<f64>,
    pub reward: f64,
    pub done: bool,
    /// The action the index decoded to.
    pub action: Action,
}

/// Gym-style environment for one learning agent.
///
/// Discrete action `0` passes; action `i >= 1` toggles the `i`-th unordered
/// pair of nodes in lexicographic order.
///
/// # Examples
///
/// ```
/// use ngt::app::GameConfig;
/// use ngt::env::{NetworkEnv, RewardFunction};
/// use ngt::game::{PlayerSpec, Rules};
///
/// let config = GameConfig::new(Rules::new(4, 3))
///     .with_player(PlayerSpec::new("opponent"))
///     .with_seed(1);
/// let mut env = NetworkEnv::new(config, RewardFunction::Centrality)?;
/// assert_eq!(env.action_count(), 7);
///
/// let observation = env.reset()?;
/// assert_eq!(observation.len(), env.observation_size());
///
/// let step = env.step(1)?;
/// assert!(!step.done);
/// # Ok::<(), ngt::Error>(())
/// ```
pub struct NetworkEnv {
    config: GameConfig,
    reward_function: RewardFunction,
    actions: Vec<Action>,
    game: Game,
    base_seed: u64,
    episode: u64,
    previous_centrality: f64,
}

impl NetworkEnv {
    /// Node owned by the learning agent.
    pub const AGENT: PlayerId = 0;

    /// Build the environment. The agent is registered on node 0 ahead of
    /// the config's players.
    pub fn new(mut config: GameConfig, reward_function: RewardFunction) -> Result<Self> {
        config.players.insert(0, PlayerSpec::human("rl-agent"));
        config.validate()?;

        let nodes: Vec<NodeId> = (0..config.rules.nb_players).collect();
        let actions = std::iter::once(Action::NoOp)
            .chain(all_edges(&nodes))
            .collect();
        let base_seed = config.seed.unwrap_or_else(rand::random);
        let game = Self::episode_game(&config, base_seed)?;

        Ok(Self {
            config,
            reward_function,
            actions,
            game,
            base_seed,
            episode: 0,
            previous_centrality: 0.0,
        })
    }

    fn episode_game(config: &GameConfig, seed: u64) -> Result<Game> {
        let mut game = config.clone().with_seed(seed).build_game()?;
        game.initialize_graph()?;
        Ok(game)
    }

    /// Start a new episode on an empty graph. Episode `k` uses seed
    /// `base_seed + k`.
    pub fn reset(&mut self) -> Result<Vec<f64>> {
        self.episode += 1;
        self.game = Self::episode_game(&self.config, self.base_seed.wrapping_add(self.episode))?;
        self.previous_centrality = 0.0;
        Ok(self.observation())
    }

    /// Play one round with the agent taking discrete action `action`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAction`] for an index outside
    /// `0..action_count()` and [`Error::TerminalGame`] once the episode is
    /// done.
    pub fn step(&mut self, action: usize) -> Result<StepResult> {
        let chosen = self
            .actions
            .get(action)
            .cloned()
            .ok_or_else(|| Error::InvalidAction {
                player: Self::AGENT,
                reason: format!(
                    "action index {action} is outside 0..{}",
                    self.actions.len()
                ),
            })?;

        self.game
            .play_round_with(&BTreeMap::from([(Self::AGENT, chosen.clone())]))?;

        let reward = self.reward();
        debug!(round = self.game.current_time_step(), action = %chosen, reward, "env step");
        Ok(StepResult {
            observation: self.observation(),
            reward,
            done: self.game.is_terminal(),
            action: chosen,
        })
    }

    fn reward(&mut self) -> f64 {
        let graph = self.game.graph();
        match self.reward_function {
            RewardFunction::Centrality => betweenness_centrality(graph, Self::AGENT),
            RewardFunction::CentralityImprovement => {
                let centrality = betweenness_centrality(graph, Self::AGENT);
                let improved = centrality > self.previous_centrality
                    || (centrality == 1.0 && centrality == self.previous_centrality);
                self.previous_centrality = centrality;
                if improved { 1.0 } else { -1.0 }
            }
            RewardFunction::DegreeCentrality => degree_centrality(graph, Self::AGENT),
            RewardFunction::Clustering => local_clustering(graph, Self::AGENT),
        }
    }

    pub fn observation(&self) -> Vec<f64> {
        self.game.graph().adjacency_matrix()
    }

    /// Number of discrete actions: every unordered pair plus the pass.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn observation_size(&self) -> usize {
        let n = self.config.rules.nb_players;
        n * n
    }

    pub fn action(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn reward_function(&self) -> RewardFunction {
        self.reward_function
    }
}
