//! Uniformly random strategies

use rand::{Rng, prelude::IndexedRandom, rngs::StdRng};

use super::StrategyKind;
use crate::{
    Result,
    actions::{Action, ActionSpace},
    ports::{DecisionContext, Strategy},
    types::NodeId,
};

/// Random action centered on the player's own node: an edge toggle to a
/// random other node, or its isolation in the node space.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEgoist;

/// Random action that does not involve the player's own node.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRandom;

/// The egoist draw, shared with the greedy strategy's bootstrap fallback.
///
/// Never proposes a self-loop. Passes when the player has no other node to
/// connect to.
pub fn random_egoist_action(ctx: &DecisionContext<'_>, rng: &mut StdRng) -> Action {
    let me = ctx.node();
    let others = other_nodes(ctx, me);
    match ctx.rules.action_space {
        ActionSpace::Edge | ActionSpace::DynamicEdge => others
            .choose(rng)
            .map_or(Action::NoOp, |&other| Action::edge(me, other)),
        ActionSpace::Node => others
            .choose(rng)
            .map_or(Action::NoOp, |&other| Action::isolate(other)),
        ActionSpace::Boolean => Action::Accept(rng.random()),
    }
}

impl Strategy for RandomEgoist {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut StdRng) -> Result<Action> {
        Ok(random_egoist_action(ctx, rng))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::RandomEgoist
    }
}

impl Strategy for RandomRandom {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut StdRng) -> Result<Action> {
        let others = other_nodes(ctx, ctx.node());
        let action = match ctx.rules.action_space {
            ActionSpace::Edge | ActionSpace::DynamicEdge => {
                let pair: Vec<NodeId> = others.choose_multiple(rng, 2).copied().collect();
                match pair.as_slice() {
                    [a, b] => Action::edge(*a, *b),
                    _ => Action::NoOp,
                }
            }
            ActionSpace::Node => others
                .choose(rng)
                .map_or(Action::NoOp, |&other| Action::isolate(other)),
            ActionSpace::Boolean => Action::Accept(rng.random()),
        };
        Ok(action)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::RandomRandom
    }
}

fn other_nodes(ctx: &DecisionContext<'_>, me: NodeId) -> Vec<NodeId> {
    ctx.graph.nodes().filter(|&node| node != me).collect()
}
