//! Immutable per-game configuration

use std::{collections::BTreeMap, fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    actions::{Action, ActionGenerator, ActionSpace, Edge, all_edges, all_isolations},
    types::{NodeId, PlayerId},
};

/// How simultaneous requests for the same action are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConflictResolution {
    /// Every request is applied in player order, so an even number of
    /// identical toggles cancels out.
    #[default]
    Parity,
    /// Identical requests are merged first and each distinct action is
    /// applied once.
    Distinct,
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictResolution::Parity => f.write_str("parity"),
            ConflictResolution::Distinct => f.write_str("distinct"),
        }
    }
}

impl FromStr for ConflictResolution {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parity" => Ok(ConflictResolution::Parity),
            "distinct" | "or" => Ok(ConflictResolution::Distinct),
            _ => Err(Error::ParseConflictResolution {
                input: s.to_string(),
                expected: "parity, distinct".to_string(),
            }),
        }
    }
}

/// Rules of a game, fixed at construction.
///
/// # Examples
///
/// ```
/// use ngt::{actions::{Action, ActionGenerator, ActionSpace}, game::Rules};
///
/// let rules = Rules::new(6, 20)
///     .with_action_space(ActionSpace::DynamicEdge)
///     .with_generator(0, ActionGenerator::AllDoubleEdges)
///     .with_impossible_action(Action::isolate(0));
///
/// assert!(rules.is_impossible(&Action::isolate(0)));
/// assert_eq!(rules.generator_for(0), &ActionGenerator::AllDoubleEdges);
/// assert_eq!(rules.generator_for(1), &ActionGenerator::AllEdges);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub nb_players: usize,
    pub nb_time_steps: usize,
    pub action_space: ActionSpace,
    /// Actions no player may ever take, compared structurally.
    pub impossible_actions: Vec<Action>,
    /// Edges present from round 0 that no action can remove.
    #[serde(default)]
    pub imposed_edges: Vec<Edge>,
    pub conflict_resolution: ConflictResolution,
    /// Candidate generator for players without a specific entry in
    /// `generators`. Only used in the dynamic-edge action space.
    pub default_generator: ActionGenerator,
    pub generators: BTreeMap<PlayerId, ActionGenerator>,
}

impl Rules {
    pub fn new(nb_players: usize, nb_time_steps: usize) -> Self {
        Self {
            nb_players,
            nb_time_steps,
            action_space: ActionSpace::default(),
            impossible_actions: Vec::new(),
            imposed_edges: Vec::new(),
            conflict_resolution: ConflictResolution::default(),
            default_generator: ActionGenerator::AllEdges,
            generators: BTreeMap::new(),
        }
    }

    pub fn with_action_space(mut self, action_space: ActionSpace) -> Self {
        self.action_space = action_space;
        self
    }

    pub fn with_impossible_action(mut self, action: Action) -> Self {
        if !self.impossible_actions.contains(&action) {
            self.impossible_actions.push(action);
        }
        self
    }

    pub fn with_impossible_actions<I>(self, actions: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        actions
            .into_iter()
            .fold(self, |rules, action| rules.with_impossible_action(action))
    }

    pub fn with_imposed_edge(mut self, u: NodeId, v: NodeId) -> Self {
        let edge = Edge::new(u, v);
        if !self.imposed_edges.contains(&edge) {
            self.imposed_edges.push(edge);
        }
        self
    }

    pub fn with_conflict_resolution(mut self, resolution: ConflictResolution) -> Self {
        self.conflict_resolution = resolution;
        self
    }

    pub fn with_default_generator(mut self, generator: ActionGenerator) -> Self {
        self.default_generator = generator;
        self
    }

    pub fn with_generator(mut self, player: PlayerId, generator: ActionGenerator) -> Self {
        self.generators.insert(player, generator);
        self
    }

    /// Whether `action` is forbidden outright. Toggling an imposed edge
    /// could only remove it, so such toggles count as impossible too.
    pub fn is_impossible(&self, action: &Action) -> bool {
        if self.impossible_actions.contains(action) {
            return true;
        }
        match action {
            Action::EdgeToggle(edge) => self.is_imposed(edge),
            Action::DoubleEdgeToggle(a, b) => self.is_imposed(a) || self.is_imposed(b),
            _ => false,
        }
    }

    pub fn is_imposed(&self, edge: &Edge) -> bool {
        self.imposed_edges.contains(edge)
    }

    pub fn generator_for(&self, player: PlayerId) -> &ActionGenerator {
        self.generators
            .get(&player)
            .unwrap_or(&self.default_generator)
    }

    /// Candidate actions a player may consider this round, before filtering
    /// impossible ones.
    ///
    /// The dynamic-edge space draws from the player's generator, which may
    /// consume randomness. The boolean space enumerates nothing, so
    /// enumerating strategies pass there.
    pub fn candidate_actions<R: Rng>(
        &self,
        player: PlayerId,
        node_count: usize,
        rng: &mut R,
    ) -> Vec<Action> {
        let nodes: Vec<NodeId> = (0..node_count).collect();
        match self.action_space {
            ActionSpace::Edge => all_edges(&nodes),
            ActionSpace::DynamicEdge => self.generator_for(player).generate(node_count, rng),
            ActionSpace::Node => all_isolations(&nodes),
            ActionSpace::Boolean => Vec::new(),
        }
    }

    /// Check the rules for values that would make a game meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        if self.nb_players == 0 {
            return Err(Error::InvalidConfiguration {
                message: "a game needs at least one player".to_string(),
            });
        }
        for action in &self.impossible_actions {
            action
                .validate(self.nb_players)
                .map_err(|err| Error::InvalidConfiguration {
                    message: format!("impossible action {action} is malformed: {err}"),
                })?;
        }
        for edge in &self.imposed_edges {
            Action::EdgeToggle(*edge)
                .validate(self.nb_players)
                .map_err(|err| Error::InvalidConfiguration {
                    message: format!("imposed edge {edge} is malformed: {err}"),
                })?;
        }
        for (player, generator) in
            std::iter::once((None, &self.default_generator)).chain(
                self.generators
                    .iter()
                    .map(|(player, generator)| (Some(*player), generator)),
            )
        {
            if let Some(player) = player
                && player >= self.nb_players
            {
                return Err(Error::InvalidConfiguration {
                    message: format!("generator configured for unknown player {player}"),
                });
            }
            if let ActionGenerator::WithBonus { bonus_rate, .. } = generator
                && !(0.0..=1.0).contains(bonus_rate)
            {
                return Err(Error::InvalidConfiguration {
                    message: format!("bonus rate {bonus_rate} must lie in [0, 1]"),
                });
            }
        }
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::actions::BonusActions;

    #[test]
    fn impossible_actions_compare_structurally() {
        let rules = Rules::new(4, 1).with_impossible_action(Action::edge(2, 0));
        assert!(rules.is_impossible(&Action::edge(0, 2)));
        assert!(!rules.is_impossible(&Action::edge(0, 1)));
    }

    #[test]
    fn toggles_of_imposed_edges_are_impossible() {
        let rules = Rules::new(4, 1).with_imposed_edge(2, 1).with_imposed_edge(1, 2);
        assert_eq!(rules.imposed_edges, vec![Edge::new(1, 2)]);
        assert!(rules.is_impossible(&Action::edge(1, 2)));
        assert!(rules.is_impossible(&Action::double_edge((0, 3), (2, 1))));
        assert!(!rules.is_impossible(&Action::edge(0, 1)));
        assert!(!rules.is_impossible(&Action::isolate(1)));
    }

    #[test]
    fn malformed_imposed_edges_are_rejected() {
        assert!(Rules::new(3, 1).with_imposed_edge(0, 2).validate().is_ok());
        assert!(Rules::new(3, 1).with_imposed_edge(1, 1).validate().is_err());
        assert!(Rules::new(3, 1).with_imposed_edge(0, 3).validate().is_err());
    }

    #[test]
    fn rules_without_imposed_edges_still_deserialize() {
        let mut json = serde_json::to_value(Rules::new(3, 2)).unwrap();
        json.as_object_mut().unwrap().remove("imposed_edges");
        let rules: Rules = serde_json::from_value(json).unwrap();
        assert!(rules.imposed_edges.is_empty());
    }

    #[test]
    fn duplicate_impossible_actions_are_stored_once() {
        let rules = Rules::new(4, 1)
            .with_impossible_actions([Action::isolate(1), Action::isolate(1), Action::edge(0, 1)]);
        assert_eq!(rules.impossible_actions.len(), 2);
    }

    #[test]
    fn candidates_per_action_space() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(Rules::new(5, 1).candidate_actions(0, 5, &mut rng).len(), 10);
        assert_eq!(
            Rules::new(5, 1)
                .with_action_space(ActionSpace::Node)
                .candidate_actions(0, 5, &mut rng)
                .len(),
            5
        );
        assert!(
            Rules::new(5, 1)
                .with_action_space(ActionSpace::Boolean)
                .candidate_actions(0, 5, &mut rng)
                .is_empty()
        );

        let rules = Rules::new(5, 1)
            .with_action_space(ActionSpace::DynamicEdge)
            .with_generator(
                1,
                ActionGenerator::WithBonus {
                    available_nodes: 3,
                    bonus: BonusActions::Isolations,
                    bonus_rate: 1.0,
                },
            );
        assert_eq!(rules.candidate_actions(0, 5, &mut rng).len(), 10);
        assert_eq!(rules.candidate_actions(1, 5, &mut rng).len(), 6);
    }

    #[test]
    fn validate_rejects_bad_configurations() {
        assert!(Rules::new(0, 5).validate().is_err());
        assert!(
            Rules::new(3, 5)
                .with_impossible_action(Action::edge(1, 1))
                .validate()
                .is_err()
        );
        assert!(
            Rules::new(3, 5)
                .with_generator(7, ActionGenerator::AllEdges)
                .validate()
                .is_err()
        );
        assert!(
            Rules::new(3, 5)
                .with_default_generator(ActionGenerator::WithBonus {
                    available_nodes: 2,
                    bonus: BonusActions::None,
                    bonus_rate: 1.5,
                })
                .validate()
                .is_err()
        );
        assert!(Rules::default().validate().is_ok());
    }

    #[test]
    fn json_round_trip_preserves_rules() {
        let rules = Rules::new(3, 7)
            .with_action_space(ActionSpace::DynamicEdge)
            .with_conflict_resolution(ConflictResolution::Distinct)
            .with_impossible_action(Action::isolate(0))
            .with_generator(2, ActionGenerator::AllDoubleEdges);
        let json = serde_json::to_string(&rules).unwrap();
        let restored: Rules = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, rules);
    }
}
