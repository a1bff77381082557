//! Clipboard capture and paste with root reconnection.

use super::{cloneable_subset, deselected, regenerate_batch};
use crate::error::PasteError;
use crate::graph::{Edge, Node, StrategyGraph, subset_roots};
use crate::ids::IdAllocator;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A copied node subset together with the edges internal to it.
///
/// The clipboard is a plain value owned by whoever manages UI session state; the engine
/// keeps no clipboard of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clipboard {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Clipboard {
    /// Copies the nodes named in `selected_ids` and the edges running between them.
    pub fn capture(nodes: &[Node], edges: &[Edge], selected_ids: &[String]) -> Self {
        let wanted: AHashSet<&str> = selected_ids.iter().map(String::as_str).collect();
        let nodes: Vec<Node> = nodes
            .iter()
            .filter(|n| wanted.contains(n.id.as_str()))
            .cloned()
            .collect();
        let edges: Vec<Edge> = edges
            .iter()
            .filter(|e| wanted.contains(e.source.as_str()) && wanted.contains(e.target.as_str()))
            .cloned()
            .collect();
        debug!(nodes = nodes.len(), edges = edges.len(), "Captured clipboard");
        Self { nodes, edges }
    }

    /// Copies the currently selected nodes of `graph`.
    pub fn from_selection(graph: &StrategyGraph) -> Self {
        Self::capture(&graph.nodes, &graph.edges, &graph.selected_ids())
    }

    /// The "has clipboard data" flag exposed to the renderer.
    pub fn has_data(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Outcome of a paste. `nodes`/`edges` hold the complete host graph after the operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PasteResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Clipboard node id -> pasted node id.
    pub id_map: AHashMap<String, String>,
    /// The synthesized `parent -> pasted root` edges.
    pub root_edges: Vec<Edge>,
    /// Clipboard edges left out because one endpoint was not pasted (a start node).
    pub dropped_edges: usize,
}

impl PasteResult {
    pub fn pasted_ids(&self) -> Vec<String> {
        let new_ids: AHashSet<&str> = self.id_map.values().map(String::as_str).collect();
        self.nodes
            .iter()
            .filter(|n| new_ids.contains(n.id.as_str()))
            .map(|n| n.id.clone())
            .collect()
    }
}

/// Nodes the user may pick as a paste parent: everything that is neither terminal nor virtual.
pub fn selectable_parents(nodes: &[Node]) -> Vec<&Node> {
    nodes
        .iter()
        .filter(|n| !n.node_type().is_terminal() && !n.is_virtual)
        .collect()
}

/// Pastes `clipboard` into the host graph below `chosen_parent_id`.
///
/// Ids are scoped against the host graph and the clipboard itself.
pub fn prepare_paste(
    clipboard: &Clipboard,
    host_nodes: &[Node],
    host_edges: &[Edge],
    chosen_parent_id: &str,
) -> Result<PasteResult, PasteError> {
    let mut allocator = IdAllocator::seeded(
        host_nodes.iter().chain(clipboard.nodes()),
        host_edges.iter().chain(clipboard.edges()),
    );
    prepare_paste_with(
        &mut allocator,
        clipboard,
        host_nodes,
        host_edges,
        chosen_parent_id,
    )
}

/// Same as [`prepare_paste`], drawing ids from a caller-owned allocator.
///
/// Every clipboard root (a pasteable node with no incoming edge from another pasteable
/// clipboard node) receives exactly one edge from the chosen parent, so no pasted node
/// is left orphaned.
pub fn prepare_paste_with(
    allocator: &mut IdAllocator,
    clipboard: &Clipboard,
    host_nodes: &[Node],
    host_edges: &[Edge],
    chosen_parent_id: &str,
) -> Result<PasteResult, PasteError> {
    if !clipboard.has_data() {
        return Err(PasteError::EmptyClipboard);
    }
    let parent = host_nodes
        .iter()
        .find(|n| n.id == chosen_parent_id)
        .ok_or_else(|| PasteError::ParentNotFound(chosen_parent_id.to_string()))?;
    if parent.node_type().is_terminal() {
        return Err(PasteError::TerminalParent {
            node_id: parent.id.clone(),
            node_type: parent.node_type().to_string(),
        });
    }

    let pasteable = cloneable_subset(clipboard.nodes());
    if pasteable.is_empty() {
        return Err(PasteError::NothingPasteable);
    }

    allocator.observe_all(host_nodes, host_edges);
    let roots: Vec<String> = subset_roots(&pasteable, clipboard.edges())
        .into_iter()
        .map(str::to_string)
        .collect();
    let batch = regenerate_batch(allocator, &pasteable, clipboard.edges());
    if batch.dropped_edges > 0 {
        warn!(
            dropped = batch.dropped_edges,
            "Clipboard edges to start nodes were not pasted"
        );
    }

    let mut root_edges = Vec::with_capacity(roots.len());
    for root in &roots {
        if let Some(new_root) = batch.id_map.get(root) {
            let id = allocator.next_edge_id();
            root_edges.push(Edge::new(id, chosen_parent_id, new_root.clone()));
        }
    }
    debug!(
        pasted = batch.nodes.len(),
        roots = root_edges.len(),
        parent = chosen_parent_id,
        "Prepared paste"
    );

    let mut nodes = deselected(host_nodes);
    nodes.extend(batch.nodes);
    let mut edges = host_edges.to_vec();
    edges.extend(batch.edges);
    edges.extend(root_edges.iter().cloned());

    Ok(PasteResult {
        nodes,
        edges,
        id_map: batch.id_map,
        root_edges,
        dropped_edges: batch.dropped_edges,
    })
}
