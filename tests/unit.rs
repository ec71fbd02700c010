//! Unit tests for error messages, notifications and serialized enums.
mod common;
use taiwa::prelude::*;

#[test]
fn test_reject_reason_codes() {
    let codes: Vec<&str> = [
        RejectReason::SelfLoop,
        RejectReason::ChoiceToChoice,
        RejectReason::MixedQuestionTargets,
        RejectReason::MixedChoiceSourceQuestion,
        RejectReason::Cycle,
    ]
    .iter()
    .map(|r| r.code())
    .collect();
    assert_eq!(
        codes,
        vec![
            "SELF_LOOP",
            "CHOICE_TO_CHOICE",
            "MIXED_QUESTION_TARGETS",
            "MIXED_CHOICE_SOURCE_QUESTION",
            "CYCLE"
        ]
    );

    // Serialized form matches the code.
    assert_eq!(
        serde_json::to_string(&RejectReason::MixedChoiceSourceQuestion).unwrap(),
        "\"MIXED_CHOICE_SOURCE_QUESTION\""
    );
}

#[test]
fn test_connect_error_display() {
    let err = ConnectError::Rejected {
        source_id: NodeId::from("a"),
        target_id: NodeId::from("b"),
        reason: RejectReason::Cycle,
    };
    assert_eq!(
        err.to_string(),
        "Connection a -> b rejected [CYCLE]: the connection would create a loop in the script"
    );

    let err = ConnectError::from(GraphError::NodeNotFound("x".into()));
    assert_eq!(err.to_string(), "Node 'x' not found");
}

#[test]
fn test_graph_error_display() {
    let err = GraphError::NotAQuestion {
        id: NodeId::from("c1"),
        kind: NodeKind::Choice,
    };
    assert_eq!(
        err.to_string(),
        "Node 'c1' is a choice, only questions can be the start node"
    );
}

#[test]
fn test_script_error_display() {
    let err = ScriptError::UnknownReference {
        referrer: "q1.choices[0]".into(),
        missing: "q9".into(),
    };
    assert_eq!(err.to_string(), "'q1.choices[0]' points to unknown question 'q9'");
    assert_eq!(
        ScriptError::MissingStartNode.to_string(),
        "No start question is selected; choose one before exporting"
    );
}

#[test]
fn test_notifications_from_errors() {
    let notice = Notification::from(&ConnectError::Rejected {
        source_id: NodeId::from("a"),
        target_id: NodeId::from("a"),
        reason: RejectReason::SelfLoop,
    });
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.title, "Action not allowed");
    assert_eq!(notice.description, "A node cannot be connected to itself.");
    assert_eq!(
        notice.to_string(),
        "Action not allowed: A node cannot be connected to itself."
    );

    let notice = Notification::from(&ScriptError::JsonParseError("eof".into()));
    assert_eq!(notice.title, "Invalid script file");

    let notice = Notification::from(&ScriptError::NothingToExport);
    assert_eq!(notice.title, "Cannot export script");

    let notice = Notification::from(&ScriptError::DuplicateName("q1".into()));
    assert_eq!(notice.title, "Cannot import script");

    let notice = Notification::from(&ConnectError::UnknownNode("ghost".into()));
    assert_eq!(notice.title, "Connection failed");
}

#[test]
fn test_start_removed_warning() {
    let warning = StructuralWarning::StartNodeRemoved(NodeId::from("q1"));
    let notice = Notification::from(&warning);
    assert_eq!(notice.severity, Severity::Warning);
    assert!(notice.description.contains("start question"));
    assert_eq!(
        warning.to_string(),
        "Start question 'q1' was removed; choose a new start question"
    );
}

#[test]
fn test_direction_serialization() {
    assert_eq!(serde_json::to_string(&Direction::TopToBottom).unwrap(), "\"TB\"");
    assert_eq!(
        serde_json::from_str::<Direction>("\"LR\"").unwrap(),
        Direction::LeftToRight
    );
    assert_eq!(Direction::default(), Direction::TopToBottom);
    assert_eq!(Direction::LeftToRight.to_string(), "LR");
}

#[test]
fn test_layout_config_defaults_from_partial_json() {
    let config: LayoutConfig = serde_json::from_str(r#"{"direction":"LR","rank_sep":80.0}"#).unwrap();
    assert_eq!(config.direction, Direction::LeftToRight);
    assert_eq!(config.rank_sep, 80.0);
    assert_eq!(config.node_sep, LayoutConfig::default().node_sep);
    assert_eq!(config.node_width, 300.0);
    assert_eq!(config.node_height, 230.0);
}

#[test]
fn test_node_ids() {
    let id = NodeId::from("welcome");
    assert_eq!(id, "welcome");
    assert_eq!(id.as_str(), "welcome");
    assert_eq!(format!("[{:<9}]", id), "[welcome  ]");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"welcome\"");
}

#[test]
fn test_node_data_is_tagged() {
    let data = NodeData::Choice(ChoiceData {
        text: "Yes".into(),
        response: None,
        request_contact: true,
    });
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["choice"]["text"], "Yes");
    assert_eq!(data.kind(), NodeKind::Choice);
    assert_eq!(data.response(), None);
}
