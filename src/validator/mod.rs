//! Connection validation.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. `SELF_LOOP`: source and target are the same node.
//! 2. `CHOICE_TO_CHOICE`: both endpoints are choices.
//! 3. `MIXED_QUESTION_TARGETS`: question -> question while the source already leads to a choice.
//! 4. `MIXED_CHOICE_SOURCE_QUESTION`: question -> choice while the source already leads to a question.
//! 5. `CYCLE`: the edge would close a cycle.
//!
//! Everything here borrows the graph immutably, so it can run speculatively while a
//! connection is still being dragged.

use crate::error::ConnectError;
use crate::graph::{FlowGraph, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod cycle;

pub use cycle::{is_acyclic, reaches, would_create_cycle};

/// Why a proposed connection was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    SelfLoop,
    ChoiceToChoice,
    MixedQuestionTargets,
    MixedChoiceSourceQuestion,
    Cycle,
}

impl RejectReason {
    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::SelfLoop => "SELF_LOOP",
            RejectReason::ChoiceToChoice => "CHOICE_TO_CHOICE",
            RejectReason::MixedQuestionTargets => "MIXED_QUESTION_TARGETS",
            RejectReason::MixedChoiceSourceQuestion => "MIXED_CHOICE_SOURCE_QUESTION",
            RejectReason::Cycle => "CYCLE",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            RejectReason::SelfLoop => "a node cannot be connected to itself",
            RejectReason::ChoiceToChoice => {
                "answer choices cannot be connected to each other, only to questions"
            }
            RejectReason::MixedQuestionTargets => {
                "a question already connected to an answer choice cannot lead to another question"
            }
            RejectReason::MixedChoiceSourceQuestion => {
                "a question already connected to another question cannot offer answer choices"
            }
            RejectReason::Cycle => "the connection would create a loop in the script",
        };
        f.write_str(message)
    }
}

/// Checks whether `source -> target` may be added to `graph`.
pub fn validate_connection(
    graph: &FlowGraph,
    source: &str,
    target: &str,
) -> Result<(), ConnectError> {
    let source_kind = graph
        .kind(source)
        .ok_or_else(|| ConnectError::UnknownNode(source.to_string()))?;
    let target_kind = graph
        .kind(target)
        .ok_or_else(|| ConnectError::UnknownNode(target.to_string()))?;

    let reject = |reason: RejectReason| -> Result<(), ConnectError> {
        log::debug!("Rejecting {} -> {}: {}", source, target, reason.code());
        Err(ConnectError::Rejected {
            source_id: NodeId::from(source),
            target_id: NodeId::from(target),
            reason,
        })
    };

    if source == target {
        return reject(RejectReason::SelfLoop);
    }

    match (source_kind, target_kind) {
        (NodeKind::Choice, NodeKind::Choice) => return reject(RejectReason::ChoiceToChoice),
        (NodeKind::Question, NodeKind::Question)
            if graph.has_edge_to_kind(source, NodeKind::Choice) =>
        {
            return reject(RejectReason::MixedQuestionTargets);
        }
        (NodeKind::Question, NodeKind::Choice)
            if graph.has_edge_to_kind(source, NodeKind::Question) =>
        {
            return reject(RejectReason::MixedChoiceSourceQuestion);
        }
        _ => {}
    }

    if would_create_cycle(graph, source, target) {
        return reject(RejectReason::Cycle);
    }
    Ok(())
}

/// Convenience predicate for connection previews.
pub fn can_connect(graph: &FlowGraph, source: &str, target: &str) -> bool {
    validate_connection(graph, source, target).is_ok()
}
