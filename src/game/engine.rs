//! Round-based game state machine

use std::collections::{BTreeMap, HashSet};

use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    ConflictResolution, Diagnostic, DiagnosticKind, GameRecord, History, Increment, Player,
    PlayerSpec, PlayerType, Rules,
};
use crate::{
    Error, Result,
    actions::Action,
    network::Graph,
    ports::DecisionContext,
    strategy::StrategyKind,
    types::{NodeId, PlayerId, Round},
    utils::derive_seed,
};

/// Lifecycle of a [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players may still register.
    Initializing,
    /// The graph exists and rounds can be played.
    Running,
    /// Every round has been played.
    Terminal,
}

/// What a renderer needs to draw a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLabel {
    pub display_name: String,
    pub player_type: PlayerType,
    pub strategy: StrategyKind,
}

/// Outcome of one player's decision before conflict resolution.
type Decision = (Action, Option<Diagnostic>);

/// A repeated network formation game.
///
/// # Examples
///
/// ```
/// use ngt::{game::{Game, PlayerSpec, Rules}, strategy::StrategyKind};
///
/// let mut game = Game::new(Rules::new(5, 10))?.with_seed(7);
/// game.add_player(PlayerSpec::new("greedy"))?;
/// game.add_player(PlayerSpec::new("egoist").with_strategy(StrategyKind::RandomEgoist))?;
/// game.initialize_graph()?;
///
/// let history = game.play_game()?;
/// assert_eq!(history.len(), 11);
/// assert!(game.is_terminal());
/// # Ok::<(), ngt::Error>(())
/// ```
#[derive(Debug)]
pub struct Game {
    rules: Rules,
    players: Vec<Player>,
    graph: Graph,
    history: History,
    current_time_step: Round,
    phase: GamePhase,
    seed: u64,
    parallel: bool,
}

impl Game {
    /// Create a game in the initializing phase with a random base seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the rules are unusable.
    pub fn new(rules: Rules) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            graph: Graph::new(rules.nb_players),
            rules,
            players: Vec::new(),
            history: History::new(),
            current_time_step: 0,
            phase: GamePhase::Initializing,
            seed: rand::random(),
            parallel: false,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Evaluate players on the rayon pool. Results are identical to the
    /// sequential mode.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Register a player on the next free node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyPlayers`] once every slot is taken, and
    /// [`Error::InvalidConfiguration`] after the graph was initialized or if
    /// the player's utility is misconfigured.
    pub fn add_player(&mut self, spec: PlayerSpec) -> Result<PlayerId> {
        if self.phase != GamePhase::Initializing {
            return Err(Error::InvalidConfiguration {
                message: "players can only join before the graph is initialized".to_string(),
            });
        }
        if self.players.len() >= self.rules.nb_players {
            return Err(Error::TooManyPlayers {
                capacity: self.rules.nb_players,
            });
        }
        spec.utility.validate()?;

        let id = self.players.len();
        debug!(player = id, name = %spec.display_name, strategy = %spec.strategy, "player registered");
        self.players.push(Player::new(id, spec));
        Ok(id)
    }

    /// Seed the graph with isolated nodes, fill empty slots with passive
    /// players and record round 0.
    pub fn initialize_graph(&mut self) -> Result<&Increment> {
        if self.phase != GamePhase::Initializing {
            return Err(Error::InvalidConfiguration {
                message: "graph is already initialized".to_string(),
            });
        }
        for id in self.players.len()..self.rules.nb_players {
            self.players
                .push(Player::new(id, PlayerSpec::passive(format!("passive-{id}"))));
        }

        let mut graph = Graph::new(self.rules.nb_players);
        restore_imposed_edges(&self.rules, &mut graph)?;
        self.graph = graph;
        self.current_time_step = 0;
        self.phase = if self.rules.nb_time_steps == 0 {
            GamePhase::Terminal
        } else {
            GamePhase::Running
        };
        info!(
            players = self.rules.nb_players,
            rounds = self.rules.nb_time_steps,
            action_space = %self.rules.action_space,
            seed = self.seed,
            "game initialized"
        );
        Ok(self.history.push(Increment::seed(self.graph.clone())))
    }

    /// Play one round with every player running its own strategy.
    pub fn play_round(&mut self) -> Result<&Increment> {
        self.play_round_with(&BTreeMap::new())
    }

    /// Play one round, taking the actions in `overrides` instead of running
    /// those players' strategies.
    ///
    /// Human players without an override pass. Invalid actions are replaced
    /// by a pass and recorded as diagnostics on the increment.
    ///
    /// # Errors
    ///
    /// Fails before touching any state if the game is not running, the graph
    /// is too small for the action space, or an override names an unknown
    /// player.
    pub fn play_round_with(
        &mut self,
        overrides: &BTreeMap<PlayerId, Action>,
    ) -> Result<&Increment> {
        self.ensure_running()?;
        if let Some(&player) = overrides.keys().find(|&&p| p >= self.players.len()) {
            return Err(Error::UnknownPlayer { player });
        }

        let round = self.current_time_step + 1;
        let ids: Vec<PlayerId> = (0..self.players.len()).collect();
        let decisions = self.decide(round, &ids, overrides);

        let mut actions = BTreeMap::new();
        let mut diagnostics = Vec::new();
        for (player, (action, diagnostic)) in ids.into_iter().zip(decisions) {
            if let Some(diagnostic) = diagnostic {
                warn!(round, player, kind = ?diagnostic.kind, reason = %diagnostic.reason, "action replaced by pass");
                diagnostics.push(diagnostic);
            }
            actions.insert(player, action);
        }

        let mut next = self.graph.clone();
        for mut action in resolve_conflicts(&self.rules, actions.values()) {
            action.apply(&mut next)?;
        }
        restore_imposed_edges(&self.rules, &mut next)?;

        self.graph = next;
        self.current_time_step = round;
        if round >= self.rules.nb_time_steps {
            self.phase = GamePhase::Terminal;
        }
        debug!(
            round,
            edges = self.graph.edge_count(),
            invalid = diagnostics.len(),
            "round committed"
        );
        Ok(self.history.push(Increment {
            round,
            actions,
            graph: self.graph.clone(),
            diagnostics,
        }))
    }

    /// Initialize if needed, then play rounds until the game is over.
    pub fn play_game(&mut self) -> Result<&History> {
        if self.phase == GamePhase::Initializing {
            self.initialize_graph()?;
        }
        while self.phase == GamePhase::Running {
            self.play_round()?;
        }
        info!(
            rounds = self.current_time_step,
            edges = self.graph.edge_count(),
            invalid = self.history.diagnostic_count(),
            "game finished"
        );
        Ok(&self.history)
    }

    /// The validated actions every player except `excluding` would take in
    /// the next round, without changing the game.
    ///
    /// Uses the same random streams as the next [`play_round`](Self::play_round),
    /// so passing the result back through
    /// [`play_round_with`](Self::play_round_with) reproduces that round.
    pub fn get_actions(&self, excluding: Option<PlayerId>) -> Result<BTreeMap<PlayerId, Action>> {
        self.ensure_running()?;
        if let Some(player) = excluding
            && player >= self.players.len()
        {
            return Err(Error::UnknownPlayer { player });
        }

        let ids: Vec<PlayerId> = (0..self.players.len())
            .filter(|&id| Some(id) != excluding)
            .collect();
        let decisions = self.decide(self.current_time_step + 1, &ids, &BTreeMap::new());
        Ok(ids
            .into_iter()
            .zip(decisions)
            .map(|(id, (action, _))| (id, action))
            .collect())
    }

    fn ensure_running(&self) -> Result<()> {
        match self.phase {
            GamePhase::Initializing => return Err(Error::NotInitialized),
            GamePhase::Terminal => {
                return Err(Error::TerminalGame {
                    nb_time_steps: self.rules.nb_time_steps,
                });
            }
            GamePhase::Running => {}
        }
        let required = self.rules.action_space.min_nodes();
        let available = self.graph.node_count();
        if available < required {
            return Err(Error::InsufficientTopology {
                action_space: self.rules.action_space.to_string(),
                required,
                available,
            });
        }
        Ok(())
    }

    /// Decisions of `ids`, in order. Per-player seeds are drawn for every
    /// player in id order before any decision is made.
    fn decide(
        &self,
        round: Round,
        ids: &[PlayerId],
        overrides: &BTreeMap<PlayerId, Action>,
    ) -> Vec<Decision> {
        let mut round_rng = StdRng::seed_from_u64(derive_seed(self.seed, round as u64));
        let seeds: Vec<u64> = self.players.iter().map(|_| round_rng.random()).collect();

        if self.parallel {
            ids.par_iter()
                .map(|&id| self.decide_one(id, seeds[id], overrides))
                .collect()
        } else {
            ids.iter()
                .map(|&id| self.decide_one(id, seeds[id], overrides))
                .collect()
        }
    }

    fn decide_one(
        &self,
        id: PlayerId,
        seed: u64,
        overrides: &BTreeMap<PlayerId, Action>,
    ) -> Decision {
        let player = &self.players[id];
        if let Some(action) = overrides.get(&id) {
            return self.check(id, action.clone());
        }
        if player.player_type() == PlayerType::Human {
            return (
                Action::NoOp,
                Some(Diagnostic {
                    player: id,
                    action: None,
                    kind: DiagnosticKind::MissingInput,
                    reason: "no action supplied for human player".to_string(),
                }),
            );
        }

        let ctx = DecisionContext {
            rules: &self.rules,
            history: &self.history,
            graph: &self.graph,
            utility: player.utility(),
            player: id,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        match player.strategy().decide(&ctx, &mut rng) {
            Ok(action) => self.check(id, action),
            Err(err) => (
                Action::NoOp,
                Some(Diagnostic {
                    player: id,
                    action: None,
                    kind: DiagnosticKind::StrategyFailure,
                    reason: err.to_string(),
                }),
            ),
        }
    }

    fn check(&self, player: PlayerId, action: Action) -> Decision {
        let rejection = if let Err(err) = action.validate(self.graph.node_count()) {
            Some((DiagnosticKind::Malformed, err.to_string()))
        } else if !self.rules.action_space.admits(&action) {
            Some((
                DiagnosticKind::WrongActionSpace,
                format!(
                    "{} is not allowed in the {} action space",
                    action.kind(),
                    self.rules.action_space
                ),
            ))
        } else {
            None
        };

        match rejection {
            None => (action, None),
            Some((kind, reason)) => {
                let reason = Error::InvalidAction { player, reason }.to_string();
                (
                    Action::NoOp,
                    Some(Diagnostic {
                        player,
                        action: Some(action),
                        kind,
                        reason,
                    }),
                )
            }
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .get(id)
            .ok_or(Error::UnknownPlayer { player: id })
    }

    /// The graph after the last committed round.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn current_time_step(&self) -> Round {
        self.current_time_step
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Terminal
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Snapshot of the graph at the end of `round`.
    pub fn graph_at(&self, round: Round) -> Option<&Graph> {
        self.history.get(round).map(|increment| &increment.graph)
    }

    pub fn increment(&self, round: Round) -> Result<&Increment> {
        self.history.get(round).ok_or(Error::RoundOutOfRange {
            round,
            len: self.history.len(),
        })
    }

    pub fn node_labels(&self) -> BTreeMap<NodeId, NodeLabel> {
        self.players
            .iter()
            .map(|player| {
                (
                    player.id(),
                    NodeLabel {
                        display_name: player.display_name().to_string(),
                        player_type: player.player_type(),
                        strategy: player.spec().strategy,
                    },
                )
            })
            .collect()
    }

    pub fn player_type(&self, node: NodeId) -> Option<PlayerType> {
        self.players.get(node).map(Player::player_type)
    }

    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            rules: self.rules.clone(),
            players: self.players.iter().map(|p| p.spec().clone()).collect(),
            history: self.history.clone(),
            current_time_step: self.current_time_step,
            seed: self.seed,
            parallel: self.parallel,
        }
    }

    /// Rebuild a game from a record. The restored game continues exactly as
    /// the original would have.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the record is inconsistent.
    pub fn from_record(record: GameRecord) -> Result<Self> {
        record.validate()?;
        let GameRecord {
            rules,
            players,
            history,
            current_time_step,
            seed,
            parallel,
        } = record;

        let (graph, phase) = match history.latest() {
            None => (Graph::new(rules.nb_players), GamePhase::Initializing),
            Some(latest) if current_time_step >= rules.nb_time_steps => {
                (latest.graph.clone(), GamePhase::Terminal)
            }
            Some(latest) => (latest.graph.clone(), GamePhase::Running),
        };
        let players = players
            .into_iter()
            .enumerate()
            .map(|(id, spec)| Player::new(id, spec))
            .collect();

        Ok(Self {
            rules,
            players,
            graph,
            history,
            current_time_step,
            phase,
            seed,
            parallel,
        })
    }
}

/// Merge the round's actions into the list of mutations to apply, in player
/// order. Passes and impossible actions are dropped.
pub fn resolve_conflicts<'a, I>(rules: &Rules, actions: I) -> Vec<Action>
where
    I: IntoIterator<Item = &'a Action>,
{
    let requests = actions
        .into_iter()
        .filter(|action| !action.is_noop() && !rules.is_impossible(action))
        .cloned();
    match rules.conflict_resolution {
        ConflictResolution::Parity => requests.collect(),
        ConflictResolution::Distinct => {
            let mut seen = HashSet::new();
            requests.filter(|action| seen.insert(action.key())).collect()
        }
    }
}

/// Add every imposed edge to `graph`, undoing isolations that removed one.
fn restore_imposed_edges(rules: &Rules, graph: &mut Graph) -> Result<()> {
    for edge in &rules.imposed_edges {
        graph.add_edge(edge.u(), edge.v())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionSpace;

    fn humans(rules: Rules, count: usize) -> Game {
        let mut game = Game::new(rules).unwrap().with_seed(1);
        for i in 0..count {
            game.add_player(PlayerSpec::human(format!("h{i}"))).unwrap();
        }
        game.initialize_graph().unwrap();
        game
    }

    #[test]
    fn lifecycle_and_round_bookkeeping() {
        let mut game = Game::new(Rules::new(5, 10)).unwrap().with_seed(3);
        assert!(matches!(game.play_round(), Err(Error::NotInitialized)));
        game.add_player(PlayerSpec::new("a")).unwrap();
        game.initialize_graph().unwrap();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.players().len(), 5);
        assert_eq!(game.player_type(4), Some(PlayerType::Passive));

        game.play_game().unwrap();
        assert_eq!(game.history().len(), 11);
        assert_eq!(game.current_time_step(), 10);
        assert!(matches!(
            game.play_round(),
            Err(Error::TerminalGame { nb_time_steps: 10 })
        ));
    }

    #[test]
    fn registering_past_capacity_fails() {
        let mut game = Game::new(Rules::new(2, 1)).unwrap();
        game.add_player(PlayerSpec::new("a")).unwrap();
        game.add_player(PlayerSpec::new("b")).unwrap();
        assert!(matches!(
            game.add_player(PlayerSpec::new("c")),
            Err(Error::TooManyPlayers { capacity: 2 })
        ));
        assert_eq!(game.players().len(), 2);
    }

    #[test]
    fn parity_cancels_identical_toggles() {
        let mut game = humans(Rules::new(3, 2), 3);
        let both = BTreeMap::from([(0, Action::edge(0, 1)), (1, Action::edge(1, 0))]);
        game.play_round_with(&both).unwrap();
        assert!(!game.graph().has_edge(0, 1));

        let one = BTreeMap::from([(0, Action::edge(0, 1)), (1, Action::NoOp), (2, Action::NoOp)]);
        game.play_round_with(&one).unwrap();
        assert!(game.graph().has_edge(0, 1));
    }

    #[test]
    fn distinct_applies_duplicate_requests_once() {
        let rules = Rules::new(3, 1).with_conflict_resolution(ConflictResolution::Distinct);
        let mut game = humans(rules, 3);
        let both = BTreeMap::from([(0, Action::edge(0, 1)), (1, Action::edge(1, 0))]);
        game.play_round_with(&both).unwrap();
        assert!(game.graph().has_edge(0, 1));
    }

    #[test]
    fn invalid_and_missing_actions_become_diagnostics() {
        let mut game = humans(Rules::new(3, 1), 3);
        let overrides = BTreeMap::from([(0, Action::edge(0, 0)), (1, Action::isolate(2))]);
        let increment = game.play_round_with(&overrides).unwrap();

        let kinds: Vec<_> = increment.diagnostics.iter().map(|d| (d.player, d.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (0, DiagnosticKind::Malformed),
                (1, DiagnosticKind::WrongActionSpace),
                (2, DiagnosticKind::MissingInput),
            ]
        );
        assert!(increment.actions.values().all(Action::is_noop));
        assert_eq!(increment.graph.edge_count(), 0);
    }

    #[test]
    fn impossible_actions_are_dropped() {
        let rules = Rules::new(3, 1).with_impossible_action(Action::edge(0, 2));
        let mut game = humans(rules, 3);
        let overrides = BTreeMap::from([
            (0, Action::edge(2, 0)),
            (1, Action::edge(1, 2)),
            (2, Action::NoOp),
        ]);
        let increment = game.play_round_with(&overrides).unwrap();
        assert!(increment.diagnostics.is_empty());
        assert_eq!(increment.graph.edges(), vec![(1, 2)]);
    }

    #[test]
    fn imposed_edges_survive_every_round() {
        let rules = Rules::new(4, 2)
            .with_action_space(ActionSpace::DynamicEdge)
            .with_imposed_edge(0, 1);
        let mut game = humans(rules, 4);
        assert_eq!(game.history().get(0).unwrap().graph.edges(), vec![(0, 1)]);

        let overrides = BTreeMap::from([
            (0, Action::edge(0, 1)),
            (1, Action::double_edge((1, 0), (2, 3))),
            (2, Action::edge(1, 2)),
            (3, Action::NoOp),
        ]);
        let increment = game.play_round_with(&overrides).unwrap();
        assert!(increment.diagnostics.is_empty());
        assert_eq!(increment.graph.edges(), vec![(0, 1), (1, 2)]);

        let isolate = BTreeMap::from([(1, Action::isolate(1))]);
        let increment = game.play_round_with(&isolate).unwrap();
        assert_eq!(increment.graph.edges(), vec![(0, 1)]);
    }

    #[test]
    fn unknown_override_leaves_state_untouched() {
        let mut game = humans(Rules::new(3, 1), 3);
        let overrides = BTreeMap::from([(9, Action::edge(0, 1))]);
        assert!(matches!(
            game.play_round_with(&overrides),
            Err(Error::UnknownPlayer { player: 9 })
        ));
        assert_eq!(game.current_time_step(), 0);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn single_node_edge_game_lacks_topology() {
        let mut game = Game::new(Rules::new(1, 3)).unwrap();
        game.initialize_graph().unwrap();
        assert!(matches!(
            game.play_round(),
            Err(Error::InsufficientTopology {
                required: 2,
                available: 1,
                ..
            })
        ));

        let mut boolean = Game::new(Rules::new(1, 3).with_action_space(ActionSpace::Boolean)).unwrap();
        boolean.initialize_graph().unwrap();
        assert!(boolean.play_round().is_ok());
    }

    #[test]
    fn get_actions_matches_the_next_round() {
        let mut game = Game::new(Rules::new(4, 3)).unwrap().with_seed(11);
        game.add_player(PlayerSpec::new("g")).unwrap();
        game.add_player(PlayerSpec::new("r").with_strategy(StrategyKind::RandomEgoist))
            .unwrap();
        game.initialize_graph().unwrap();

        let predicted = game.get_actions(None).unwrap();
        let without_first = game.get_actions(Some(0)).unwrap();
        assert!(!without_first.contains_key(&0));
        assert_eq!(without_first.get(&1), predicted.get(&1));

        let played = game.play_round().unwrap().actions.clone();
        assert_eq!(played, predicted);
    }
}
