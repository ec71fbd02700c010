//! Tests for connection validation and cycle detection.
mod common;
use common::*;
use taiwa::prelude::*;
use taiwa::validator::{is_acyclic, reaches, would_create_cycle};

fn reason(graph: &FlowGraph, source: &NodeId, target: &NodeId) -> Option<RejectReason> {
    validate_connection(graph, source.as_str(), target.as_str())
        .err()
        .and_then(|e| e.reason())
}

#[test]
fn test_self_loop_rejected() {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");
    let c1 = choice(&mut graph, "C1");

    assert_eq!(reason(&graph, &q1, &q1), Some(RejectReason::SelfLoop));
    // Self loop is checked before the choice-to-choice rule.
    assert_eq!(reason(&graph, &c1, &c1), Some(RejectReason::SelfLoop));
}

#[test]
fn test_choice_to_choice_rejected_without_mutation() {
    let mut graph = FlowGraph::new();
    let c1 = choice(&mut graph, "Yes");
    let c2 = choice(&mut graph, "No");
    let edges_before = graph.edges().len();

    let mut editor = Editor::builder().with_graph(graph).build();
    let err = editor.connect(c1.as_str(), c2.as_str()).unwrap_err();

    assert_eq!(err.reason(), Some(RejectReason::ChoiceToChoice));
    assert_eq!(err.reason().map(|r| r.code()), Some("CHOICE_TO_CHOICE"));
    assert_eq!(editor.edges().len(), edges_before);
}

#[test]
fn test_mixed_question_targets_rejected() {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");
    let c1 = choice(&mut graph, "C1");
    let q2 = question(&mut graph, "Q2");
    connect(&mut graph, &q1, &c1);

    assert_eq!(
        reason(&graph, &q1, &q2),
        Some(RejectReason::MixedQuestionTargets)
    );
}

#[test]
fn test_mixed_choice_source_question_rejected() {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");
    let q2 = question(&mut graph, "Q2");
    let c1 = choice(&mut graph, "C1");
    connect(&mut graph, &q1, &q2);

    assert_eq!(
        reason(&graph, &q1, &c1),
        Some(RejectReason::MixedChoiceSourceQuestion)
    );
}

#[test]
fn test_cycle_rejected() {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");
    let c1 = choice(&mut graph, "C1");
    let q2 = question(&mut graph, "Q2");
    connect(&mut graph, &q1, &c1);
    connect(&mut graph, &c1, &q2);

    assert_eq!(reason(&graph, &q2, &q1), Some(RejectReason::Cycle));
    assert!(would_create_cycle(&graph, q2.as_str(), q1.as_str()));
    assert!(!would_create_cycle(&graph, q1.as_str(), q2.as_str()));
}

#[test]
fn test_mixing_rule_wins_over_cycle() {
    // q1 -> q2 would both mix target kinds and close q2 -> c2 -> q1.
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");
    let c1 = choice(&mut graph, "C1");
    let q2 = question(&mut graph, "Q2");
    let c2 = choice(&mut graph, "C2");
    connect(&mut graph, &q1, &c1);
    connect(&mut graph, &q2, &c2);
    connect(&mut graph, &c2, &q1);

    assert_eq!(
        reason(&graph, &q1, &q2),
        Some(RejectReason::MixedQuestionTargets)
    );
}

#[test]
fn test_allowed_connections() {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");
    let c1 = choice(&mut graph, "C1");
    let c2 = choice(&mut graph, "C2");
    let q2 = question(&mut graph, "Q2");
    let q3 = question(&mut graph, "Q3");

    assert!(can_connect(&graph, q1.as_str(), c1.as_str()));
    connect(&mut graph, &q1, &c1);
    assert!(can_connect(&graph, q1.as_str(), c2.as_str()));
    connect(&mut graph, &q1, &c2);
    connect(&mut graph, &c1, &q2);
    // A choice may lead to more than one question; the validator does not forbid it.
    assert!(can_connect(&graph, c1.as_str(), q3.as_str()));
    // Converging branches are not cycles.
    connect(&mut graph, &c2, &q2);
    assert!(can_connect(&graph, q2.as_str(), q3.as_str()));
}

#[test]
fn test_unknown_node() {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");

    let err = validate_connection(&graph, q1.as_str(), "ghost").unwrap_err();
    assert_eq!(err, ConnectError::UnknownNode("ghost".to_string()));
    assert_eq!(err.reason(), None);

    let err = validate_connection(&graph, "ghost", q1.as_str()).unwrap_err();
    assert_eq!(err, ConnectError::UnknownNode("ghost".to_string()));
}

#[test]
fn test_rejected_error_carries_endpoints() {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Q1");

    let err = validate_connection(&graph, q1.as_str(), q1.as_str()).unwrap_err();
    assert_eq!(
        err,
        ConnectError::Rejected {
            source_id: q1.clone(),
            target_id: q1.clone(),
            reason: RejectReason::SelfLoop,
        }
    );
}

#[test]
fn test_graph_stays_acyclic_under_exhaustive_connects() {
    let mut graph = FlowGraph::new();
    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(question(&mut graph, &format!("Q{}", i)));
        ids.push(choice(&mut graph, &format!("C{}", i)));
    }

    let mut accepted = 0;
    for source in &ids {
        for target in ids.iter().rev() {
            if validate_connection(&graph, source.as_str(), target.as_str()).is_ok() {
                graph.add_edge(source.as_str(), target.as_str()).unwrap();
                accepted += 1;
            }
            assert!(is_acyclic(&graph));
        }
    }
    assert!(accepted > 0);

    // Every question ends up with targets of a single kind.
    for node in graph.nodes().iter().filter(|n| n.is_question()) {
        let id = node.id.as_str();
        assert!(
            !(graph.has_edge_to_kind(id, NodeKind::Choice)
                && graph.has_edge_to_kind(id, NodeKind::Question)),
            "question {} mixes target kinds",
            id
        );
    }
    // No edge joins two choices.
    for edge in graph.edges() {
        assert!(
            !(graph.kind(edge.source.as_str()) == Some(NodeKind::Choice)
                && graph.kind(edge.target.as_str()) == Some(NodeKind::Choice))
        );
    }
}

#[test]
fn test_reaches_terminates_on_imported_cycle() {
    let graph = import_script(&load_script(LOOPING_SCRIPT_JSON)).unwrap();
    assert!(!is_acyclic(&graph));
    let no = graph
        .nodes()
        .iter()
        .find(|n| n.as_choice().is_some_and(|c| c.text == "No"))
        .unwrap();
    assert!(reaches(&graph, no.id.as_str(), "q1"));
    assert!(reaches(&graph, "q1", no.id.as_str()));

    let yes = graph
        .nodes()
        .iter()
        .find(|n| n.as_choice().is_some_and(|c| c.text == "Yes"))
        .unwrap();
    assert!(!reaches(&graph, yes.id.as_str(), "q1"));
}
