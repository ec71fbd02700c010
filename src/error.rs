use crate::graph::{NodeId, NodeKind};
use crate::validator::RejectReason;
use thiserror::Error;

/// Errors raised by direct graph store operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' not found")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found")]
    EdgeNotFound(String),

    #[error("Node '{0}' already exists")]
    DuplicateNode(String),

    #[error("Edge '{0}' already exists")]
    DuplicateEdge(String),

    #[error("Questions '{first}' and '{second}' are both marked as the start node")]
    MultipleStartNodes { first: NodeId, second: NodeId },

    #[error("Node '{id}' is a {kind}, only questions can be the start node")]
    NotAQuestion { id: NodeId, kind: NodeKind },

    #[error("Node '{id}' is a {kind}, expected a choice")]
    NotAChoice { id: NodeId, kind: NodeKind },
}

/// A proposed connection that was not applied to the graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConnectError {
    #[error("Connection {source_id} -> {target_id} rejected [{code}]: {reason}", code = .reason.code())]
    Rejected {
        source_id: NodeId,
        target_id: NodeId,
        reason: RejectReason,
    },

    #[error("Connection references unknown node '{0}'")]
    UnknownNode(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ConnectError {
    /// The rejection reason, if the validator turned the connection down.
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            ConnectError::Rejected { reason, .. } => Some(*reason),
            ConnectError::UnknownNode(_) | ConnectError::Graph(_) => None,
        }
    }
}

/// Invariant violations raised while exporting or importing a script.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Failed to parse script JSON: {0}")]
    JsonParseError(String),

    #[error("Script has no questions to export")]
    NothingToExport,

    #[error("No start question is selected; choose one before exporting")]
    MissingStartNode,

    #[error("first_node_name '{0}' does not name any question")]
    UnknownStartNode(String),

    #[error("'{referrer}' points to unknown question '{missing}'")]
    UnknownReference { referrer: String, missing: String },

    #[error("Question name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("Question '{0}' has both a 'next' pointer and choices")]
    MixedContinuation(String),

    #[error("Question '{0}' names itself as 'next'")]
    SelfReference(String),

    #[error("Script produced an inconsistent graph: {0}")]
    Graph(#[from] GraphError),
}

/// Errors raised while saving or loading a document snapshot.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    #[error("Snapshot error: {0}")]
    Generic(String),

    #[error("Snapshot holds an inconsistent graph: {0}")]
    Corrupt(#[from] GraphError),
}

/// Non-fatal conditions. The operation that raised one has still completed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuralWarning {
    #[error("Start question '{0}' was removed; choose a new start question")]
    StartNodeRemoved(NodeId),
}
