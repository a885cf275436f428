//! Append-only record of a game

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    actions::Action,
    network::Graph,
    types::{PlayerId, Round},
};

/// Why an action was replaced by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The action does not belong to the game's action space.
    WrongActionSpace,
    /// The action references a missing node or proposes a self-loop.
    Malformed,
    /// The strategy failed internally.
    StrategyFailure,
    /// A human slot received no action for the round.
    MissingInput,
}

/// A recoverable problem with one player's action in one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub player: PlayerId,
    /// The rejected action, when there was one.
    pub action: Option<Action>,
    pub kind: DiagnosticKind,
    pub reason: String,
}

/// One entry of the history: the actions taken in a round and the graph
/// they produced.
///
/// Round 0 holds the seed graph and no actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Increment {
    pub round: Round,
    /// Every player's effective action, after invalid ones became passes.
    pub actions: BTreeMap<PlayerId, Action>,
    pub graph: Graph,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Increment {
    pub(crate) fn seed(graph: Graph) -> Self {
        Self {
            round: 0,
            actions: BTreeMap::new(),
            graph,
            diagnostics: Vec::new(),
        }
    }

    /// Number of players that did something other than pass.
    pub fn active_players(&self) -> usize {
        self.actions.values().filter(|a| !a.is_noop()).count()
    }
}

/// Ordered list of increments. Entries are never modified once pushed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    increments: Vec<Increment>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, increment: Increment) -> &Increment {
        self.increments.push(increment);
        let last = self.increments.len() - 1;
        &self.increments[last]
    }

    pub fn len(&self) -> usize {
        self.increments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.increments.is_empty()
    }

    pub fn get(&self, round: Round) -> Option<&Increment> {
        self.increments.get(round)
    }

    pub fn latest(&self) -> Option<&Increment> {
        self.increments.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Increment> {
        self.increments.iter()
    }

    pub fn increments(&self) -> &[Increment] {
        &self.increments
    }

    /// Total number of diagnostics across all rounds.
    pub fn diagnostic_count(&self) -> usize {
        self.increments.iter().map(|i| i.diagnostics.len()).sum()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Increment;
    type IntoIter = std::slice::Iter<'a, Increment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
