//! Common test utilities for building graphs and scripts.
use taiwa::graph::{NODE_HEIGHT, NODE_WIDTH};
use taiwa::prelude::*;

/// A question that offers two choices, one of which loops back to the question.
#[allow(dead_code)]
pub const LOOPING_SCRIPT_JSON: &str = r#"
{
  "first_node_name": "q1",
  "nodes": [
    {
      "name": "q1",
      "question": "Would you like us to call you?",
      "only_choices": true,
      "choices": [
        { "text": "Yes", "request_contact": true },
        { "text": "No", "next": "q1" }
      ]
    }
  ]
}
"#;

/// A small support script mixing plain `next` pointers and choices.
#[allow(dead_code)]
pub const SUPPORT_SCRIPT_JSON: &str = r#"
{
  "first_node_name": "welcome",
  "nodes": [
    { "name": "welcome", "question": "Hi! What do you need?", "only_choices": true,
      "choices": [
        { "text": "Pricing", "next": "pricing" },
        { "text": "Support", "response": "Sure.", "next": "support" }
      ] },
    { "name": "pricing", "question": "Which plan?", "next": "contact" },
    { "name": "support", "question": "Describe the issue", "response": "Thanks!", "next": "contact" },
    { "name": "contact", "question": "Leave your email" }
  ]
}
"#;

#[allow(dead_code)]
pub fn question(graph: &mut FlowGraph, text: &str) -> NodeId {
    graph.add_node(
        NodeData::Question(QuestionData {
            question: text.to_string(),
            ..QuestionData::default()
        }),
        Position::default(),
    )
}

#[allow(dead_code)]
pub fn choice(graph: &mut FlowGraph, text: &str) -> NodeId {
    graph.add_node(
        NodeData::Choice(ChoiceData {
            text: text.to_string(),
            ..ChoiceData::default()
        }),
        Position::default(),
    )
}

/// Validates and adds an edge, panicking if the connection is rejected.
#[allow(dead_code)]
pub fn connect(graph: &mut FlowGraph, source: &NodeId, target: &NodeId) -> EdgeId {
    validate_connection(graph, source.as_str(), target.as_str())
        .unwrap_or_else(|e| panic!("connect {} -> {} failed: {}", source, target, e));
    graph
        .add_edge(source.as_str(), target.as_str())
        .expect("endpoints exist")
}

/// `q1 -> q2`, built interactively.
#[allow(dead_code)]
pub fn create_linear_graph() -> (FlowGraph, NodeId, NodeId) {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "What is your name?");
    let q2 = question(&mut graph, "Nice to meet you. Anything else?");
    connect(&mut graph, &q1, &q2);
    (graph, q1, q2)
}

/// `q1 -> {c1, c2}`, `c1 -> q2`, `c2 -> q3`, `q2 -> q4`, `q3 -> q4`.
#[allow(dead_code)]
pub fn create_branching_graph() -> FlowGraph {
    let mut graph = FlowGraph::new();
    let q1 = question(&mut graph, "Pick one");
    let c1 = choice(&mut graph, "Left");
    let c2 = choice(&mut graph, "Right");
    let q2 = question(&mut graph, "Left side");
    let q3 = question(&mut graph, "Right side");
    let q4 = question(&mut graph, "Done");
    connect(&mut graph, &q1, &c1);
    connect(&mut graph, &q1, &c2);
    connect(&mut graph, &c1, &q2);
    connect(&mut graph, &c2, &q3);
    connect(&mut graph, &q2, &q4);
    connect(&mut graph, &q3, &q4);
    graph
}

#[allow(dead_code)]
pub fn load_script(json: &str) -> ScriptConfig {
    ScriptConfig::from_json(json).expect("fixture script parses")
}

/// True if two node boxes of the default size overlap.
#[allow(dead_code)]
pub fn overlaps(a: &Position, b: &Position) -> bool {
    let eps = 1e-6;
    a.x < b.x + NODE_WIDTH - eps
        && b.x < a.x + NODE_WIDTH - eps
        && a.y < b.y + NODE_HEIGHT - eps
        && b.y < a.y + NODE_HEIGHT - eps
}

#[allow(dead_code)]
pub fn assert_no_overlaps(layout: &Layout) {
    for (i, a) in layout.placements.iter().enumerate() {
        for b in &layout.placements[i + 1..] {
            assert!(
                !overlaps(&a.position, &b.position),
                "'{}' at {:?} overlaps '{}' at {:?}",
                a.id,
                a.position,
                b.id,
                b.position
            );
        }
    }
}
