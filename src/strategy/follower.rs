//! Follow the most central nodes

use rand::rngs::StdRng;

use super::StrategyKind;
use crate::{
    Result,
    actions::Action,
    ports::{DecisionContext, Strategy},
    utility::betweenness_all,
};

/// Links to the node with the highest betweenness that the player is not
/// already adjacent to. Ties go to the lower node id.
///
/// Outside the edge-like action spaces the follower has nothing to do and
/// passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Follower;

impl Strategy for Follower {
    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut StdRng) -> Result<Action> {
        if !ctx.rules.action_space.is_edge_like() {
            return Ok(Action::NoOp);
        }

        let me = ctx.node();
        let centrality = betweenness_all(ctx.graph);
        let mut ranked: Vec<usize> = ctx.graph.nodes().collect();
        ranked.sort_by(|&a, &b| centrality[b].total_cmp(&centrality[a]).then(a.cmp(&b)));

        let choice = ranked
            .into_iter()
            .filter(|&node| node != me && !ctx.graph.has_edge(me, node))
            .map(|node| Action::edge(me, node))
            .find(|action| !ctx.rules.is_impossible(action));

        Ok(choice.unwrap_or(Action::NoOp))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Follower
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{
        game::{History, Rules},
        network::Graph,
        utility::UtilityFunction,
    };

    fn decide(rules: &Rules, graph: &Graph, player: usize) -> Action {
        let history = History::new();
        let utility = UtilityFunction::Betweenness;
        let ctx = DecisionContext {
            rules,
            history: &history,
            graph,
            utility: &utility,
            player,
        };
        Follower
            .decide(&ctx, &mut StdRng::seed_from_u64(0))
            .unwrap()
    }

    #[test]
    fn connects_to_the_hub() {
        // Path 0 - 1 - 2 - 3 with isolated node 4: node 1 and 2 tie, 1 wins.
        let graph = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3)]).unwrap();
        let rules = Rules::new(5, 1);
        assert_eq!(decide(&rules, &graph, 4), Action::edge(4, 1));
    }

    #[test]
    fn skips_existing_neighbors_and_impossible_links() {
        let graph = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3)]).unwrap();
        let rules = Rules::new(5, 1).with_impossible_action(Action::edge(1, 4));
        // Node 0 already touches 1, so 2 is next in line.
        assert_eq!(decide(&rules, &graph, 0), Action::edge(0, 2));
        assert_eq!(decide(&rules, &graph, 4), Action::edge(4, 2));
    }

    #[test]
    fn passes_when_connected_to_everyone() {
        let graph = Graph::from_edges(3, [(0, 1), (0, 2)]).unwrap();
        let rules = Rules::new(3, 1);
        assert_eq!(decide(&rules, &graph, 0), Action::NoOp);
    }
}
