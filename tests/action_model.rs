//! Apply/revert behavior of actions on real graphs.

mod common;

use ngt::{Error, actions::Action, network::Graph};

#[test]
fn edge_toggle_is_an_involution() {
    let original = common::cycle(5);
    let mut graph = original.clone();
    let mut action = Action::edge(0, 2);

    action.apply(&mut graph).unwrap();
    assert!(graph.has_edge(0, 2));
    assert_eq!(graph.edge_count(), original.edge_count() + 1);

    action.apply(&mut graph).unwrap();
    assert_eq!(graph, original);
}

#[test]
fn toggling_an_existing_edge_removes_it() {
    let mut graph = common::cycle(5);
    let mut action = Action::edge(1, 0);
    action.apply(&mut graph).unwrap();
    assert!(!graph.has_edge(0, 1));
    action.revert(&mut graph).unwrap();
    assert!(graph.has_edge(0, 1));
}

#[test]
fn double_toggle_reverts_both_edges() {
    let original = common::path(4);
    let mut graph = original.clone();
    let mut action = Action::double_edge((0, 3), (1, 2));

    action.apply(&mut graph).unwrap();
    assert!(graph.has_edge(0, 3));
    assert!(!graph.has_edge(1, 2));

    action.revert(&mut graph).unwrap();
    assert_eq!(graph, original);
}

#[test]
fn isolation_restores_the_star() {
    let original = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3)]).unwrap();
    let mut graph = original.clone();
    let mut action = Action::isolate(0);

    action.apply(&mut graph).unwrap();
    assert!(graph.is_edgeless());

    action.revert(&mut graph).unwrap();
    assert_eq!(graph, original);
}

#[test]
fn isolation_of_a_leaf_only_touches_its_edges() {
    let mut graph = common::star(5);
    let mut action = Action::isolate(3);
    action.apply(&mut graph).unwrap();
    assert_eq!(graph.degree(3), 0);
    assert_eq!(graph.edge_count(), 3);
    action.revert(&mut graph).unwrap();
    assert_eq!(graph, common::star(5));
}

#[test]
fn noop_and_accept_leave_the_graph_alone() {
    let original = common::cycle(4);
    let mut graph = original.clone();
    for mut action in [Action::NoOp, Action::Accept(true), Action::Accept(false)] {
        action.apply(&mut graph).unwrap();
        assert_eq!(graph, original);
    }
}

#[test]
fn malformed_actions_fail_without_mutating() {
    let original = common::cycle(4);
    let mut graph = original.clone();

    let err = Action::edge(2, 2).apply(&mut graph).unwrap_err();
    assert!(matches!(err, Error::SelfLoop { node: 2 }));

    let err = Action::edge(0, 9).apply(&mut graph).unwrap_err();
    assert!(matches!(err, Error::NodeOutOfRange { node: 9, .. }));

    assert_eq!(graph, original);
}

#[test]
fn edge_actions_ignore_endpoint_order() {
    assert_eq!(Action::edge(3, 1), Action::edge(1, 3));
    assert_ne!(Action::edge(1, 3), Action::isolate(1));
}
