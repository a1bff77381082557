use crate::data::{NodeData, create_default_data};
use crate::error::{ConnectError, ImportError};
use crate::ids::IdAllocator;
use crate::import::NodeRecord;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod node_type;

pub use node_type::NodeType;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct XYPosition {
    pub x: f64,
    pub y: f64,
}

impl XYPosition {
    pub const ORIGIN: XYPosition = XYPosition { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rendered size of a node as reported by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A strategy node. Its type is derived from the payload variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NodeRecord", into = "NodeRecord")]
pub struct Node {
    pub id: String,
    pub position: XYPosition,
    pub data: NodeData,
    pub selected: bool,
    /// Virtual/overview nodes are exempt from the orphan check.
    pub is_virtual: bool,
    pub measured: Option<Size>,
}

impl Node {
    pub fn new(id: impl Into<String>, data: NodeData) -> Self {
        Self {
            id: id.into(),
            position: XYPosition::ORIGIN,
            data,
            selected: false,
            is_virtual: false,
            measured: None,
        }
    }

    /// A node of `node_type` carrying the factory default payload.
    pub fn with_defaults(id: impl Into<String>, node_type: NodeType) -> Self {
        let id = id.into();
        let data = create_default_data(node_type, &id);
        Self::new(id, data)
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = XYPosition::new(x, y);
        self
    }

    pub fn node_type(&self) -> NodeType {
        self.data.node_type()
    }

    pub fn label(&self) -> &str {
        self.data.label()
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The (nodes, edges) pair the engine operates on. Also the unit stored by the history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl StrategyGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Adopts an external (nodes, edges) pair.
    ///
    /// Duplicate node ids are rejected. Edges pointing at unknown nodes are dropped so
    /// the adopted graph never holds a dangling edge.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, ImportError> {
        let mut seen = AHashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(ImportError::DuplicateNodeId(node.id.clone()));
            }
        }

        let total = edges.len();
        let edges: Vec<Edge> = edges
            .into_iter()
            .filter(|e| seen.contains(e.source.as_str()) && seen.contains(e.target.as_str()))
            .collect();
        if edges.len() < total {
            warn!(
                dropped = total - edges.len(),
                "Dropped edges referencing unknown nodes during import"
            );
        }

        Ok(Self { nodes, edges })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn selected_nodes(&self) -> Vec<Node> {
        self.nodes.iter().filter(|n| n.selected).cloned().collect()
    }

    /// Marks exactly the given nodes as selected.
    pub fn select(&mut self, ids: &[String]) {
        let wanted: AHashSet<&str> = ids.iter().map(String::as_str).collect();
        for node in &mut self.nodes {
            node.selected = wanted.contains(node.id.as_str());
        }
    }

    /// Adds a node with default data, optionally wired below `parent`.
    pub fn add_node(
        &mut self,
        allocator: &mut IdAllocator,
        node_type: NodeType,
        parent: Option<&str>,
    ) -> Result<String, ConnectError> {
        if let Some(parent_id) = parent {
            let parent_node = self
                .node(parent_id)
                .ok_or_else(|| ConnectError::NodeNotFound {
                    missing_node_id: parent_id.to_string(),
                    source_node_id: parent_id.to_string(),
                })?;
            if parent_node.node_type().is_terminal() {
                return Err(ConnectError::TerminalSource(parent_id.to_string()));
            }
        }

        let id = allocator.next_node_id(node_type);
        self.nodes.push(Node::with_defaults(id.clone(), node_type));
        if let Some(parent_id) = parent {
            let edge_id = allocator.next_edge_id();
            self.edges.push(Edge::new(edge_id, parent_id, id.clone()));
        }
        debug!(node_id = %id, node_type = %node_type, "Added node");
        Ok(id)
    }

    /// Validates and adds an edge `source -> target`.
    pub fn connect(
        &mut self,
        allocator: &mut IdAllocator,
        source: &str,
        target: &str,
    ) -> Result<String, ConnectError> {
        if source == target {
            return Err(ConnectError::SelfLoop(source.to_string()));
        }
        let source_node = self.node(source).ok_or_else(|| ConnectError::NodeNotFound {
            missing_node_id: source.to_string(),
            source_node_id: source.to_string(),
        })?;
        if source_node.node_type().is_terminal() {
            return Err(ConnectError::TerminalSource(source.to_string()));
        }
        if !self.contains_node(target) {
            return Err(ConnectError::NodeNotFound {
                missing_node_id: target.to_string(),
                source_node_id: source.to_string(),
            });
        }
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return Err(ConnectError::AlreadyConnected {
                source_id: source.to_string(),
                target_id: target.to_string(),
            });
        }

        let id = allocator.next_edge_id();
        self.edges.push(Edge::new(id.clone(), source, target));
        Ok(id)
    }

    /// Removes the given nodes and every edge touching them. Returns how many nodes went.
    pub fn remove_nodes(&mut self, ids: &[String]) -> usize {
        let doomed: AHashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.nodes.len();
        self.nodes.retain(|n| !doomed.contains(n.id.as_str()));
        self.edges.retain(|e| {
            !doomed.contains(e.source.as_str()) && !doomed.contains(e.target.as_str())
        });
        before - self.nodes.len()
    }

    pub fn remove_edges(&mut self, ids: &[String]) -> usize {
        let doomed: AHashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.edges.len();
        self.edges.retain(|e| !doomed.contains(e.id.as_str()));
        before - self.edges.len()
    }

    /// Number of incoming edges per node id. Nodes without incoming edges are absent.
    pub fn incoming_counts(&self) -> AHashMap<&str, usize> {
        incoming_counts(&self.edges)
    }

    /// True when every edge references nodes present in the graph.
    pub fn has_no_dangling_edges(&self) -> bool {
        let ids: AHashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .all(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
    }

    /// Replaces the positions of the given nodes, leaving every other field alone.
    pub fn set_positions(&mut self, positions: &AHashMap<String, XYPosition>) {
        for node in &mut self.nodes {
            if let Some(position) = positions.get(&node.id) {
                node.position = *position;
            }
        }
    }
}

pub(crate) fn incoming_counts(edges: &[Edge]) -> AHashMap<&str, usize> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for edge in edges {
        *counts.entry(edge.target.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Ids of the nodes in `subset` with no incoming edge from another member of `subset`.
pub fn subset_roots<'a>(subset: &'a [Node], edges: &[Edge]) -> Vec<&'a str> {
    let members: AHashSet<&str> = subset.iter().map(|n| n.id.as_str()).collect();
    let fed: AHashSet<&str> = edges
        .iter()
        .filter(|e| members.contains(e.source.as_str()) && members.contains(e.target.as_str()))
        .map(|e| e.target.as_str())
        .collect();
    subset
        .iter()
        .map(|n| n.id.as_str())
        .filter(|id| !fed.contains(id))
        .collect()
}
