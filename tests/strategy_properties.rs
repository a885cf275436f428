//! Properties every strategy must satisfy regardless of the graph.

mod common;

use rand::{SeedableRng, rngs::StdRng};

use ngt::{
    actions::{Action, ActionSpace},
    game::{History, Rules},
    network::{Graph, generators},
    ports::DecisionContext,
    strategy::StrategyKind,
    utility::UtilityFunction,
};

fn decide(kind: StrategyKind, rules: &Rules, graph: &Graph, player: usize, seed: u64) -> Action {
    let history = History::new();
    let utility = UtilityFunction::Betweenness;
    let ctx = DecisionContext {
        rules,
        history: &history,
        graph,
        utility: &utility,
        player,
    };
    kind.build()
        .decide(&ctx, &mut StdRng::seed_from_u64(seed))
        .unwrap()
}

fn utility_after(graph: &Graph, action: &Action, player: usize) -> f64 {
    let mut scratch = graph.clone();
    let mut action = action.clone();
    action.apply(&mut scratch).unwrap();
    UtilityFunction::Betweenness.evaluate(&scratch, player, &mut StdRng::seed_from_u64(0))
}

#[test]
fn greedy_choice_is_optimal_among_candidates() {
    let rules = Rules::new(6, 1);
    let graphs = [common::path(6), common::star(6), common::cycle(6)];
    for graph in &graphs {
        for player in 0..6 {
            let chosen = decide(StrategyKind::MyopicGreedy, &rules, graph, player, 1);
            let chosen_utility = utility_after(graph, &chosen, player);
            let candidates =
                rules.candidate_actions(player, 6, &mut StdRng::seed_from_u64(0));
            for candidate in &candidates {
                assert!(
                    utility_after(graph, candidate, player) <= chosen_utility + 1e-12,
                    "{candidate} beats {chosen} for player {player}"
                );
            }
            assert!(utility_after(graph, &Action::NoOp, player) <= chosen_utility + 1e-12);
        }
    }
}

#[test]
fn greedy_passes_when_already_the_hub() {
    let rules = Rules::new(5, 1);
    let action = decide(StrategyKind::MyopicGreedy, &rules, &common::star(5), 0, 3);
    assert!(action.is_noop());
}

#[test]
fn greedy_skips_impossible_actions() {
    let graph = common::path(4);
    let unrestricted = decide(StrategyKind::MyopicGreedy, &Rules::new(4, 1), &graph, 0, 0);
    assert!(!unrestricted.is_noop());

    let rules = Rules::new(4, 1).with_impossible_action(unrestricted.clone());
    let restricted = decide(StrategyKind::MyopicGreedy, &rules, &graph, 0, 0);
    assert_ne!(restricted, unrestricted);
}

#[test]
fn no_strategy_proposes_a_self_loop() {
    let kinds = [
        StrategyKind::Inactive,
        StrategyKind::RandomEgoist,
        StrategyKind::RandomRandom,
        StrategyKind::Follower,
        StrategyKind::MyopicGreedy,
    ];
    let mut rng = StdRng::seed_from_u64(8);
    for seed in 0..20 {
        let graph = generators::gnp(7, 0.3, &mut rng).unwrap();
        for space in [ActionSpace::Edge, ActionSpace::Node, ActionSpace::Boolean] {
            let rules = Rules::new(7, 1).with_action_space(space);
            for kind in kinds {
                for player in [0, 3, 6] {
                    let action = decide(kind, &rules, &graph, player, seed);
                    assert!(action.validate(7).is_ok(), "{kind} proposed {action}");
                    assert!(space.admits(&action), "{kind} left the {space} space");
                }
            }
        }
    }
}

#[test]
fn random_egoist_always_involves_itself() {
    let rules = Rules::new(6, 1);
    let graph = common::cycle(6);
    for seed in 0..30 {
        match decide(StrategyKind::RandomEgoist, &rules, &graph, 2, seed) {
            Action::EdgeToggle(edge) => assert!(edge.contains(2)),
            other => panic!("unexpected {other}"),
        }
    }
}

#[test]
fn random_random_never_involves_itself() {
    let rules = Rules::new(6, 1);
    let graph = common::cycle(6);
    for seed in 0..30 {
        match decide(StrategyKind::RandomRandom, &rules, &graph, 2, seed) {
            Action::EdgeToggle(edge) => assert!(!edge.contains(2)),
            other => panic!("unexpected {other}"),
        }
    }
}

#[test]
fn follower_links_to_the_hub() {
    let graph = Graph::from_edges(5, [(0, 1), (0, 2), (0, 3)]).unwrap();
    let action = decide(StrategyKind::Follower, &Rules::new(5, 1), &graph, 4, 0);
    assert_eq!(action, Action::edge(4, 0));
}
