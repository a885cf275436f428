//! Myopic best response

use rand::rngs::StdRng;
use tracing::trace;

use super::{StrategyKind, random_egoist_action};
use crate::{
    Result,
    actions::Action,
    ports::{DecisionContext, Strategy},
};

/// Picks the candidate action that maximizes the player's utility one step
/// ahead.
///
/// Every candidate is applied to a single scratch copy of the graph,
/// evaluated and reverted. Only a strictly better utility replaces the
/// incumbent, so ties keep the earliest candidate and the player passes when
/// nothing beats the current graph. On an edgeless graph in an edge-like
/// action space every single edge looks the same, so the strategy falls back
/// to a random egoist move to bootstrap the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct MyopicGreedy;

impl Strategy for MyopicGreedy {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut StdRng) -> Result<Action> {
        if ctx.graph.is_edgeless() && ctx.rules.action_space.is_edge_like() {
            return Ok(random_egoist_action(ctx, rng));
        }

        let candidates = ctx.rules.candidate_actions(ctx.player, ctx.graph.node_count(), rng);
        let mut scratch = ctx.graph.clone();
        let mut best = Action::NoOp;
        let mut best_utility = ctx.utility_of(&scratch, rng);

        for mut candidate in candidates {
            if ctx.rules.is_impossible(&candidate) {
                continue;
            }
            candidate.apply(&mut scratch)?;
            let utility = ctx.utility_of(&scratch, rng);
            candidate.revert(&mut scratch)?;

            if utility > best_utility {
                best = candidate;
                best_utility = utility;
            }
        }

        trace!(player = ctx.player, action = %best, utility = best_utility, "greedy choice");
        Ok(best)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::MyopicGreedy
    }
}
