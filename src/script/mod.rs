//! Two-way translation between the editable graph and the persisted script schema.
//!
//! ```json
//! {
//!   "first_node_name": "q1",
//!   "nodes": [
//!     { "name": "q1", "question": "Ready?", "only_choices": true,
//!       "choices": [ { "text": "Yes", "request_contact": true },
//!                    { "text": "No", "next": "q1" } ] }
//!   ]
//! }
//! ```

mod export;
mod import;
pub mod schema;

pub use export::export_script;
pub use import::import_script;
pub use schema::{ChoiceRecord, QuestionRecord, ScriptConfig};

use crate::error::ScriptError;
use crate::graph::FlowGraph;

impl TryFrom<&FlowGraph> for ScriptConfig {
    type Error = ScriptError;

    fn try_from(graph: &FlowGraph) -> Result<Self, Self::Error> {
        export_script(graph)
    }
}

impl TryFrom<&ScriptConfig> for FlowGraph {
    type Error = ScriptError;

    fn try_from(config: &ScriptConfig) -> Result<Self, Self::Error> {
        import_script(config)
    }
}
