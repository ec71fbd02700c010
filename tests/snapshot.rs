//! Tests for saving and restoring full editor documents.
mod common;
use common::*;
use std::fs;
use taiwa::prelude::*;

#[test]
fn test_snapshot_keeps_what_export_drops() {
    let mut editor = Editor::builder()
        .with_graph(create_branching_graph())
        .build();
    let orphan = editor.add_question_node();
    editor.run_layout(Direction::LeftToRight).unwrap();

    let bytes = editor.snapshot().to_bytes().unwrap();
    let snapshot = DocumentSnapshot::from_bytes(&bytes).unwrap();
    assert_eq!(snapshot, editor.snapshot());

    let mut restored = Editor::new();
    restored.restore(snapshot).unwrap();
    assert_eq!(restored.nodes(), editor.nodes());
    assert_eq!(restored.edges(), editor.edges());
    assert!(restored.graph().contains_node(orphan.as_str()));
    assert_eq!(
        restored.export_config().unwrap(),
        editor.export_config().unwrap()
    );
}

#[test]
fn test_restored_graph_continues_id_sequence() {
    let (graph, q1, q2) = create_linear_graph();
    let snapshot = DocumentSnapshot::capture(&graph);

    let mut restored = snapshot.restore().unwrap();
    assert_eq!(restored.next_id(), graph.next_id());
    let fresh = question(&mut restored, "New");
    assert_ne!(fresh, q1);
    assert_ne!(fresh, q2);
    assert_eq!(restored.nodes().len(), 3);
}

#[test]
fn test_corrupt_bytes_are_rejected() {
    let bytes = vec![0xff; 7];
    let err = DocumentSnapshot::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, SnapshotError::Generic(_)));
    assert!(err.to_string().contains("Deserialization failed"));
}

#[test]
fn test_inconsistent_snapshot_is_rejected() {
    let (graph, q1, _) = create_linear_graph();
    let mut snapshot = DocumentSnapshot::capture(&graph);
    snapshot.nodes.retain(|n| n.id != q1);

    let mut editor = Editor::new();
    let kept = editor.add_question_node();
    let err = editor.restore(snapshot).unwrap_err();
    assert!(matches!(err, SnapshotError::Corrupt(GraphError::NodeNotFound(_))));
    // The current document survives a failed restore.
    assert!(editor.graph().contains_node(kept.as_str()));
}

#[test]
fn test_snapshot_with_two_start_questions_is_rejected() {
    let (graph, q1, q2) = create_linear_graph();
    let mut snapshot = DocumentSnapshot::capture(&graph);
    for node in &mut snapshot.nodes {
        if let NodeData::Question(q) = &mut node.data {
            q.is_start_node = true;
        }
    }
    let bytes = snapshot.to_bytes().unwrap();
    let snapshot = DocumentSnapshot::from_bytes(&bytes).unwrap();

    let mut editor = Editor::new();
    let kept = editor.add_question_node();
    let err = editor.restore(snapshot).unwrap_err();
    assert!(matches!(
        err,
        SnapshotError::Corrupt(GraphError::MultipleStartNodes { ref first, ref second })
            if *first == q1 && *second == q2
    ));
    assert_eq!(editor.graph().start_node().unwrap().id, kept);
}

#[test]
fn test_snapshot_with_duplicate_edge_ids_is_rejected() {
    let graph = create_branching_graph();
    let mut snapshot = DocumentSnapshot::capture(&graph);
    let first_id = snapshot.edges[0].id.clone();
    snapshot.edges[1].id = first_id.clone();

    let err = snapshot.restore().unwrap_err();
    assert!(matches!(err, SnapshotError::Corrupt(GraphError::DuplicateEdge(ref id)) if *id == first_id.to_string()));
}

#[test]
fn test_save_and_load_file() {
    let path = std::env::temp_dir().join(format!("taiwa-snapshot-{}.bin", std::process::id()));
    let graph = import_script(&load_script(SUPPORT_SCRIPT_JSON)).unwrap();
    let snapshot = DocumentSnapshot::capture(&graph);

    snapshot.save(&path).unwrap();
    let loaded = DocumentSnapshot::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded, snapshot);
}

#[test]
fn test_missing_file_is_reported() {
    let path = std::env::temp_dir().join("taiwa-does-not-exist.bin");
    let err = DocumentSnapshot::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Could not open file"));
}
