use crate::clone::Clipboard;
use crate::graph::{NodeType, StrategyGraph};
use crate::layout::LayoutPreset;
use crate::validate::GraphFlags;

/// User intents emitted by the rendering layer.
#[derive(Debug, Clone)]
pub enum EditorCommand {
    /// Adds a node with default data, wired below `parent` when given.
    AddNode {
        node_type: NodeType,
        parent: Option<String>,
    },
    Connect {
        source: String,
        target: String,
    },
    /// Replaces the selection. Not recorded in history.
    Select(Vec<String>),
    DeleteSelection,
    DeleteNodes(Vec<String>),
    DeleteEdges(Vec<String>),
    CloneSelection,
    /// Pastes `clipboard` below `parent`, which the user picked explicitly.
    Paste {
        clipboard: Clipboard,
        parent: String,
    },
    Undo,
    Redo,
    /// Adopts a whole graph and resets history.
    Import(StrategyGraph),
}

impl EditorCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::AddNode { .. } => "add-node",
            EditorCommand::Connect { .. } => "connect",
            EditorCommand::Select(_) => "select",
            EditorCommand::DeleteSelection => "delete-selection",
            EditorCommand::DeleteNodes(_) => "delete-nodes",
            EditorCommand::DeleteEdges(_) => "delete-edges",
            EditorCommand::CloneSelection => "clone-selection",
            EditorCommand::Paste { .. } => "paste",
            EditorCommand::Undo => "undo",
            EditorCommand::Redo => "redo",
            EditorCommand::Import(_) => "import",
        }
    }
}

/// What a command did, for the host to react to.
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// Whether the graph changed.
    pub changed: bool,
    /// Ids of nodes created by the command.
    pub created: Vec<String>,
    /// Layout the host should run next, if any.
    pub layout: Option<LayoutPreset>,
    /// Validator flags after the command.
    pub flags: GraphFlags,
}
