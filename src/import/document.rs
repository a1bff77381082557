use crate::data::NodeData;
use crate::error::ImportError;
use crate::graph::{Edge, Node, NodeType, Size, XYPosition};
use serde::{Deserialize, Serialize};
use std::fs;

/// Node as exchanged with the renderer: `{ id, type, position, data, ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub position: XYPosition,
    pub data: serde_json::Value,
    #[serde(default)]
    pub selected: bool,
    #[serde(default, rename = "virtual", alias = "isVirtual")]
    pub is_virtual: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measured: Option<Size>,
}

impl TryFrom<NodeRecord> for Node {
    type Error = ImportError;

    fn try_from(record: NodeRecord) -> Result<Self, Self::Error> {
        let data = NodeData::from_json(record.node_type, record.data).map_err(|e| {
            ImportError::ValidationError(format!(
                "Node '{}' has invalid '{}' data: {}",
                record.id, record.node_type, e
            ))
        })?;
        Ok(Node {
            id: record.id,
            position: record.position,
            data,
            selected: record.selected,
            is_virtual: record.is_virtual,
            measured: record.measured,
        })
    }
}

impl From<Node> for NodeRecord {
    fn from(node: Node) -> Self {
        NodeRecord {
            node_type: node.node_type(),
            // Payload structs only hold string-keyed maps, so encoding cannot fail.
            data: node.data.to_json().unwrap_or_default(),
            id: node.id,
            position: node.position,
            selected: node.selected,
            is_virtual: node.is_virtual,
            measured: node.measured,
        }
    }
}

/// Complete graph as exchanged with the renderer or an external store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDocument {
    pub fn from_json_str(json: &str) -> Result<Self, ImportError> {
        serde_json::from_str(json).map_err(|e| ImportError::JsonParseError(e.to_string()))
    }

    /// Load a graph document from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ImportError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ImportError::ValidationError(format!("Could not read file '{}': {}", path, e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_graph(nodes: &[Node], edges: &[Edge]) -> Self {
        Self {
            nodes: nodes.iter().cloned().map(NodeRecord::from).collect(),
            edges: edges.to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
