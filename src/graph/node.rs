use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Defines an opaque, string-backed identifier type.
macro_rules! define_id {
    ( $( $(#[$meta:meta])* $name:ident ),* $(,)? ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(String);

            impl $name {
                pub fn new(id: impl Into<String>) -> Self {
                    Self(id.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.pad(&self.0)
                }
            }

            impl Borrow<str> for $name {
                fn borrow(&self) -> &str {
                    &self.0
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl From<&str> for $name {
                fn from(id: &str) -> Self {
                    Self(id.to_string())
                }
            }

            impl From<String> for $name {
                fn from(id: String) -> Self {
                    Self(id)
                }
            }

            impl PartialEq<str> for $name {
                fn eq(&self, other: &str) -> bool {
                    self.0 == other
                }
            }

            impl PartialEq<&str> for $name {
                fn eq(&self, other: &&str) -> bool {
                    self.0 == *other
                }
            }
        )*
    };
}

define_id! {
    /// Unique identifier of a node. For questions it doubles as the exported record name.
    NodeId,
    /// Unique identifier of an edge.
    EdgeId,
}

/// Top-left anchored display position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The side of a node a connection handle is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Presentation-only handle orientation: where incoming edges attach (`target`)
/// and where outgoing edges leave (`source`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handles {
    pub target: Side,
    pub source: Side,
}

impl Default for Handles {
    fn default() -> Self {
        Self {
            target: Side::Top,
            source: Side::Bottom,
        }
    }
}

/// A prompt the bot sends to the end user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionData {
    pub question: String,
    pub response: Option<String>,
    /// Stored flag. Only effective while the question has choice edges,
    /// see [`FlowGraph::effective_only_choices`](crate::graph::FlowGraph::effective_only_choices).
    pub only_choices: bool,
    pub is_start_node: bool,
}

impl Default for QuestionData {
    fn default() -> Self {
        Self {
            question: String::new(),
            response: None,
            only_choices: true,
            is_start_node: false,
        }
    }
}

/// A selectable answer option.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChoiceData {
    pub text: String,
    pub response: Option<String>,
    pub request_contact: bool,
}

/// Node payload, discriminated by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeData {
    Question(QuestionData),
    Choice(ChoiceData),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Question(_) => NodeKind::Question,
            NodeData::Choice(_) => NodeKind::Choice,
        }
    }

    pub fn response(&self) -> Option<&str> {
        match self {
            NodeData::Question(q) => q.response.as_deref(),
            NodeData::Choice(c) => c.response.as_deref(),
        }
    }
}

/// Field-less discriminant of [`NodeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Question,
    Choice,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Question => write!(f, "question"),
            NodeKind::Choice => write!(f, "choice"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub data: NodeData,
    pub position: Position,
    #[serde(default)]
    pub handles: Handles,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn is_question(&self) -> bool {
        matches!(self.data, NodeData::Question(_))
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.data, NodeData::Choice(_))
    }

    pub fn is_start_node(&self) -> bool {
        matches!(&self.data, NodeData::Question(q) if q.is_start_node)
    }

    pub fn as_question(&self) -> Option<&QuestionData> {
        match &self.data {
            NodeData::Question(q) => Some(q),
            NodeData::Choice(_) => None,
        }
    }

    pub fn as_choice(&self) -> Option<&ChoiceData> {
        match &self.data {
            NodeData::Choice(c) => Some(c),
            NodeData::Question(_) => None,
        }
    }
}

/// A directed "comes after" relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}
