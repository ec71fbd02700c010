use super::schema::ScriptConfig;
use crate::error::ScriptError;
use crate::graph::{ChoiceData, FlowGraph, NodeData, NodeId, Position, QuestionData};
use ahash::AHashSet;

/// Rebuilds an editable graph from a persisted script.
///
/// Every reference is checked before anything is built, so an invalid script never
/// yields a partial graph. Question nodes keep their record names as ids; choice
/// nodes get fresh ids. Positions are left at the origin for the caller to lay out.
pub fn import_script(config: &ScriptConfig) -> Result<FlowGraph, ScriptError> {
    check_references(config)?;

    let mut graph = FlowGraph::new();
    for record in &config.nodes {
        graph.add_node_with_id(
            NodeId::from(record.name.as_str()),
            NodeData::Question(QuestionData {
                question: record.question.clone(),
                response: record.response.clone(),
                only_choices: record.only_choices,
                is_start_node: false,
            }),
            Position::default(),
        )?;
    }

    // Choices are added after every question so fresh ids cannot shadow a record name.
    for record in &config.nodes {
        if let Some(next) = &record.next {
            graph.add_edge(&record.name, next)?;
        }
        for choice in &record.choices {
            let choice_id = graph.add_node(
                NodeData::Choice(ChoiceData {
                    text: choice.text.clone(),
                    response: choice.response.clone(),
                    request_contact: choice.request_contact,
                }),
                Position::default(),
            );
            graph.add_edge(&record.name, choice_id.as_str())?;
            if let Some(next) = &choice.next {
                graph.add_edge(choice_id.as_str(), next)?;
            }
        }
    }

    graph.set_start_node(&config.first_node_name)?;
    log::info!(
        "Imported {} questions and {} edges, starting at '{}'",
        config.nodes.len(),
        graph.edges().len(),
        config.first_node_name
    );
    Ok(graph)
}

fn check_references(config: &ScriptConfig) -> Result<(), ScriptError> {
    let mut names: AHashSet<&str> = AHashSet::with_capacity(config.nodes.len());
    for record in &config.nodes {
        if !names.insert(record.name.as_str()) {
            return Err(ScriptError::DuplicateName(record.name.clone()));
        }
    }

    if !names.contains(config.first_node_name.as_str()) {
        return Err(ScriptError::UnknownStartNode(
            config.first_node_name.clone(),
        ));
    }

    let resolve = |referrer: String, target: &str| -> Result<(), ScriptError> {
        if names.contains(target) {
            Ok(())
        } else {
            Err(ScriptError::UnknownReference {
                referrer,
                missing: target.to_string(),
            })
        }
    };

    for record in &config.nodes {
        if record.next.is_some() && !record.choices.is_empty() {
            return Err(ScriptError::MixedContinuation(record.name.clone()));
        }
        if let Some(next) = &record.next {
            if *next == record.name {
                return Err(ScriptError::SelfReference(record.name.clone()));
            }
            resolve(record.name.clone(), next)?;
        }
        for (i, choice) in record.choices.iter().enumerate() {
            if let Some(next) = &choice.next {
                resolve(format!("{}.choices[{}]", record.name, i), next)?;
            }
        }
    }
    Ok(())
}
