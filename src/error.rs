use thiserror::Error;

/// Reasons a paste request is refused. The host graph is left untouched in every case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasteError {
    #[error("Clipboard is empty, nothing to paste")]
    EmptyClipboard,

    #[error("Clipboard only holds start nodes, which cannot be pasted")]
    NothingPasteable,

    #[error("Paste parent '{0}' does not exist in the current graph")]
    ParentNotFound(String),

    #[error("Node '{node_id}' is a terminal '{node_type}' node and cannot be a paste parent")]
    TerminalParent { node_id: String, node_type: String },
}

/// Errors raised when a new edge between two nodes is requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error(
        "Node '{missing_node_id}' not found, which is required by a connection from node '{source_node_id}'"
    )]
    NodeNotFound {
        missing_node_id: String,
        source_node_id: String,
    },

    #[error("Node '{0}' cannot be connected to itself")]
    SelfLoop(String),

    #[error("Nodes '{source_id}' and '{target_id}' are already connected")]
    AlreadyConnected { source_id: String, target_id: String },

    #[error("Terminal node '{0}' cannot have outgoing connections")]
    TerminalSource(String),
}

/// Errors that can occur when adopting an externally supplied graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Failed to parse graph JSON: {0}")]
    JsonParseError(String),

    #[error("Node id '{0}' appears more than once")]
    DuplicateNodeId(String),

    #[error("Invalid graph data: {0}")]
    ValidationError(String),
}

/// Errors reported by a layout solver. The adapter never propagates these to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Layout solver failed: {0}")]
    Solver(String),

    #[error("Layout solver returned no position for node '{0}'")]
    MissingPosition(String),
}

/// Errors that can occur while loading an `EditorConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid config value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

/// Umbrella error for commands applied through the editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Paste(#[from] PasteError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Import(#[from] ImportError),
}
