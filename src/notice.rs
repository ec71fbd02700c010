use crate::error::{ConnectError, GraphError, ScriptError, SnapshotError, StructuralWarning};
use crate::validator::RejectReason;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A transient, user-facing message with a short title and a longer description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            title: title.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Capitalizes the first letter of a reason message for use as a sentence.
fn sentence(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>() + ".",
        None => String::new(),
    }
}

impl From<&ConnectError> for Notification {
    fn from(err: &ConnectError) -> Self {
        match err {
            ConnectError::Rejected { reason, .. } => {
                let title = match reason {
                    RejectReason::Cycle => "Loop not allowed",
                    _ => "Action not allowed",
                };
                Notification::error(title, sentence(&reason.to_string()))
            }
            ConnectError::UnknownNode(_) | ConnectError::Graph(_) => {
                Notification::error("Connection failed", err.to_string())
            }
        }
    }
}

impl From<&GraphError> for Notification {
    fn from(err: &GraphError) -> Self {
        Notification::error("Action not allowed", err.to_string())
    }
}

impl From<&ScriptError> for Notification {
    fn from(err: &ScriptError) -> Self {
        let title = match err {
            ScriptError::JsonParseError(_) => "Invalid script file",
            ScriptError::NothingToExport | ScriptError::MissingStartNode => "Cannot export script",
            _ => "Cannot import script",
        };
        Notification::error(title, err.to_string())
    }
}

impl From<&SnapshotError> for Notification {
    fn from(err: &SnapshotError) -> Self {
        Notification::error("Document could not be loaded", err.to_string())
    }
}

impl From<&StructuralWarning> for Notification {
    fn from(warning: &StructuralWarning) -> Self {
        match warning {
            StructuralWarning::StartNodeRemoved(_) => Notification::warning(
                "Be careful",
                "You removed the start question. Make sure to choose another question as the start.",
            ),
        }
    }
}
