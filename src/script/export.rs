use super::schema::{ChoiceRecord, QuestionRecord, ScriptConfig};
use crate::error::ScriptError;
use crate::graph::{FlowGraph, Node, NodeData};
use ahash::AHashSet;
use std::collections::VecDeque;

/// Serializes the part of the graph reachable from the start question.
///
/// Questions are emitted breadth-first from the start, following edges in insertion
/// order. Unreachable branches stay in the editor but are not exported.
pub fn export_script(graph: &FlowGraph) -> Result<ScriptConfig, ScriptError> {
    if graph.question_count() == 0 {
        return Err(ScriptError::NothingToExport);
    }
    let start = graph.start_node().ok_or(ScriptError::MissingStartNode)?;

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    enqueue(&mut seen, &mut queue, start.id.as_str());

    let mut records = Vec::new();
    while let Some(id) = queue.pop_front() {
        let Some(node) = graph.node(id) else {
            continue;
        };
        let NodeData::Question(question) = &node.data else {
            continue;
        };

        let (choices, questions): (Vec<&Node>, Vec<&Node>) = graph
            .outgoing(id)
            .filter_map(|e| graph.node(e.target.as_str()))
            .partition(|n| n.is_choice());

        let mut record = QuestionRecord {
            name: id.to_string(),
            question: question.question.clone(),
            response: question.response.clone(),
            choices: Vec::with_capacity(choices.len()),
            next: None,
            only_choices: graph.effective_only_choices(id),
        };

        if choices.is_empty() {
            record.next = first_question(id, &questions).map(|next| {
                enqueue(&mut seen, &mut queue, next);
                next.to_string()
            });
        } else {
            if !questions.is_empty() {
                log::warn!("Question '{}' mixes choice and question targets, exporting choices only", id);
            }
            for choice_node in choices {
                let Some(choice) = choice_node.as_choice() else {
                    continue;
                };
                let choice_id = choice_node.id.as_str();
                let successors: Vec<&Node> = graph
                    .outgoing(choice_id)
                    .filter_map(|e| graph.node(e.target.as_str()))
                    .filter(|n| n.is_question())
                    .collect();
                let next = first_question(choice_id, &successors).map(|next| {
                    enqueue(&mut seen, &mut queue, next);
                    next.to_string()
                });
                record.choices.push(ChoiceRecord {
                    text: choice.text.clone(),
                    response: choice.response.clone(),
                    next,
                    request_contact: choice.request_contact,
                });
            }
        }
        records.push(record);
    }

    log::info!(
        "Exported {} of {} questions starting at '{}'",
        records.len(),
        graph.question_count(),
        start.id
    );
    Ok(ScriptConfig {
        first_node_name: start.id.to_string(),
        nodes: records,
    })
}

/// The script schema carries a single `next` pointer; extra question edges are dropped.
fn first_question<'a>(from: &str, questions: &[&'a Node]) -> Option<&'a str> {
    if questions.len() > 1 {
        log::warn!(
            "'{}' leads to {} questions, only the first is exported as 'next'",
            from,
            questions.len()
        );
    }
    questions.first().map(|n| n.id.as_str())
}

fn enqueue<'a>(seen: &mut AHashSet<&'a str>, queue: &mut VecDeque<&'a str>, id: &'a str) {
    if seen.insert(id) {
        queue.push_back(id);
    }
}
