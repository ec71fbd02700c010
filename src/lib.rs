//! # Taiwa - Flow-Graph Engine for Conversational Bot Scripts
//!
//! **Taiwa** is the engine behind a visual bot-script editor. A script is a directed
//! graph of *questions* the bot asks and *answer choices* the user can pick. Taiwa keeps
//! that graph consistent while it is being edited, lays it out for display and converts
//! it to and from the flat JSON script a bot runtime consumes.
//!
//! ## Core Workflow
//!
//! 1.  **Edit**: Add questions and choices through an [`Editor`](editor::Editor). Every
//!     connection goes through the [`validator`] first, so the graph stays acyclic and
//!     every question either offers choices or continues to a single next question.
//! 2.  **Lay Out**: Run the hierarchical [`layout`] engine top-to-bottom or left-to-right.
//! 3.  **Export**: Serialize the part reachable from the start question as a
//!     [`ScriptConfig`](script::ScriptConfig).
//! 4.  **Import**: Load a script back into an editable graph. Invalid scripts are
//!     rejected as a whole.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use taiwa::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut editor = Editor::builder().with_direction(Direction::TopToBottom).build();
//!
//!     let greeting = editor.add_question_node();
//!     editor.update_question(greeting.as_str(), "Hi! Need help?".into(), None, true)?;
//!
//!     let yes = editor.add_choice_node();
//!     editor.update_choice(yes.as_str(), "Yes".into(), Some("Great".into()), true)?;
//!     editor.connect(greeting.as_str(), yes.as_str())?;
//!
//!     // A loop back to the greeting is rejected with a reason code.
//!     if let Err(e) = editor.connect(yes.as_str(), greeting.as_str()) {
//!         println!("{}", Notification::from(&e));
//!     }
//!
//!     editor.run_layout(Direction::LeftToRight)?;
//!     let script = editor.export_config()?;
//!     println!("{}", script.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod editor;
pub mod error;
pub mod graph;
pub mod layout;
pub mod notice;
pub mod prelude;
pub mod script;
pub mod snapshot;
pub mod validator;
