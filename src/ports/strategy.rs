//! Strategy port - how a player chooses its action for a round

use rand::rngs::StdRng;

use crate::{
    Result,
    actions::Action,
    game::{History, Rules},
    network::Graph,
    types::{NodeId, PlayerId},
    utility::UtilityFunction,
};

/// Read-only view of the game handed to a strategy.
///
/// The graph is the state at the end of the previous round. Strategies that
/// want to evaluate hypothetical actions must work on their own copy.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub rules: &'a Rules,
    pub history: &'a History,
    pub graph: &'a Graph,
    pub utility: &'a UtilityFunction,
    pub player: PlayerId,
}

impl DecisionContext<'_> {
    /// Node owned by the deciding player.
    pub fn node(&self) -> NodeId {
        self.player
    }

    /// Utility of the deciding player's node in `graph`.
    pub fn utility_of(&self, graph: &Graph, rng: &mut StdRng) -> f64 {
        self.utility.evaluate(graph, self.node(), rng)
    }
}

/// A decision rule for one player.
///
/// Strategies are stateless: the chosen action is a function of the context
/// and the random stream alone, which is what keeps games reproducible from a
/// seed. `Send + Sync` lets the engine evaluate players on worker threads.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use ngt::{
///     actions::Action,
///     ports::{DecisionContext, Strategy},
///     strategy::StrategyKind,
/// };
///
/// /// Always tries to connect to node 0.
/// struct Hub;
///
/// impl Strategy for Hub {
///     fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut StdRng) -> ngt::Result<Action> {
///         if ctx.player == 0 || ctx.graph.has_edge(0, ctx.player) {
///             Ok(Action::NoOp)
///         } else {
///             Ok(Action::edge(0, ctx.player))
///         }
///     }
///
///     fn kind(&self) -> StrategyKind {
///         StrategyKind::Inactive
///     }
/// }
/// ```
pub trait Strategy: Send + Sync {
    /// Choose the action for this round.
    ///
    /// # Errors
    ///
    /// Returns an error only for internal failures (for example a candidate
    /// that cannot be applied to the scratch graph). Choosing an action the
    /// rules do not admit is not an error here; the engine records it as a
    /// diagnostic.
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut StdRng) -> Result<Action>;

    /// Serializable tag identifying this strategy.
    fn kind(&self) -> crate::strategy::StrategyKind;
}
