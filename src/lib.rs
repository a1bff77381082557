//! # Stratagraph - Strategy Graph Editing Engine
//!
//! **Stratagraph** is the editing core behind a visual trading-strategy editor. It keeps a
//! directed graph of typed strategy nodes (start, signals, entries, exits, retries, ...),
//! hands out collision-free identifiers for nodes, edges and every nested sub-object,
//! and implements clone, copy and paste with full id regeneration. A linear undo/redo
//! history records every structural change.
//!
//! ## Core Workflow
//!
//! The engine is UI-agnostic. The rendering layer sends user intents as
//! [`EditorCommand`](editor::EditorCommand)s and reads back plain node and edge lists:
//!
//! 1.  **Adopt a graph**: Import the stored strategy through the `IntoGraph` trait, or start empty.
//! 2.  **Edit**: Apply commands such as `AddNode`, `CloneSelection` or `Paste`. Each one is atomic.
//! 3.  **Check**: Read the validator flags (orphans, duplicate start nodes) to decorate nodes.
//! 4.  **Arrange**: When a command asks for it, run the layout adapter and apply the result
//!     if the graph has not moved on in the meantime.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stratagraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut editor = StrategyEditor::default();
//!
//!     // start-1 -> signal-1 -> entry-1
//!     let start = editor.apply(EditorCommand::AddNode { node_type: NodeType::Start, parent: None })?;
//!     let signal = editor.apply(EditorCommand::AddNode {
//!         node_type: NodeType::Signal,
//!         parent: start.created.first().cloned(),
//!     })?;
//!     editor.apply(EditorCommand::AddNode {
//!         node_type: NodeType::Entry,
//!         parent: signal.created.first().cloned(),
//!     })?;
//!
//!     // Copy the signal branch and paste it back below the start node.
//!     editor.apply(EditorCommand::Select(vec!["signal-1".into(), "entry-1".into()]))?;
//!     let clipboard = editor.copy_selection();
//!     let outcome = editor.apply(EditorCommand::Paste { clipboard, parent: "start-1".into() })?;
//!
//!     println!("Pasted: {:?}", outcome.created);
//!     assert!(outcome.flags.is_clean());
//!
//!     // Lay the result out with the built-in solver.
//!     let adapter = LayoutAdapter::new(LayeredSolver, editor.config().layout.clone());
//!     let ticket = editor.layout_ticket(LayoutPreset::SymmetricTree);
//!     let (nodes, _) = tokio_test::block_on(adapter.layout(
//!         ticket.graph.nodes,
//!         ticket.graph.edges,
//!         ticket.preset,
//!     ));
//!     editor.apply_layout(ticket.revision, &nodes);
//!
//!     editor.apply(EditorCommand::Undo)?;
//!     Ok(())
//! }
//! ```

pub mod clone;
pub mod config;
pub mod data;
pub mod editor;
pub mod error;
pub mod graph;
pub mod history;
pub mod ids;
pub mod import;
pub mod layout;
pub mod prelude;
pub mod validate;
