//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the taiwa crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use taiwa::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/script.json")?;
//! let script = ScriptConfig::from_json(&json)?;
//!
//! let mut editor = Editor::new();
//! editor.import_config(&script)?;
//! println!("Loaded {} nodes", editor.nodes().len());
//! # Ok(())
//! # }
//! ```

// Editing facade
pub use crate::editor::{Editor, EditorBuilder, Feedback, Intent, Response};

// Graph model
pub use crate::graph::{
    ChoiceData, Edge, EdgeId, FlowGraph, Handles, Node, NodeData, NodeId, NodeKind, Position,
    QuestionData, Side,
};

// Validation and layout
pub use crate::layout::{Direction, Layout, LayoutConfig, NodePlacement, compute_layout};
pub use crate::validator::{RejectReason, can_connect, validate_connection};

// Script conversion and persistence
pub use crate::script::{ChoiceRecord, QuestionRecord, ScriptConfig, export_script, import_script};
pub use crate::snapshot::DocumentSnapshot;

// Error and notification types
pub use crate::error::{ConnectError, GraphError, ScriptError, SnapshotError, StructuralWarning};
pub use crate::notice::{Notification, Severity};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
