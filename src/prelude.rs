//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the stratagraph
//! crate. Import this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use stratagraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let document = GraphDocument::from_file("path/to/strategy.json")?;
//! let mut editor = StrategyEditor::with_graph(document, EditorConfig::default())?;
//!
//! let flags = editor.flags();
//! println!("Orphans: {:?}", flags.orphan_ids);
//!
//! editor.apply(EditorCommand::Select(vec!["signal-1".to_string()]))?;
//! editor.apply(EditorCommand::CloneSelection)?;
//! # Ok(())
//! # }
//! ```

// Editor and commands
pub use crate::editor::{EditOutcome, EditorCommand, LayoutTicket, StrategyEditor};

// Graph model
pub use crate::data::{ConditionGroup, ConditionNode, NodeData, Position, create_default_data};
pub use crate::graph::{Edge, Node, NodeType, StrategyGraph, XYPosition};

// Engines
pub use crate::clone::{Clipboard, CloneResult, PasteResult, clone_selection, prepare_paste};
pub use crate::history::{GraphSnapshot, History};
pub use crate::ids::IdAllocator;
pub use crate::validate::{GraphFlags, compute_flags};

// Layout
pub use crate::layout::{LayeredSolver, LayoutAdapter, LayoutPreset, LayoutSolver};

// Import and configuration
pub use crate::config::EditorConfig;
pub use crate::import::{GraphDocument, IntoGraph};

// Error types
pub use crate::error::{ConnectError, EditError, ImportError, LayoutError, PasteError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
