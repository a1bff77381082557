//! Clone engine.
//!
//! Copies a node subset with new identifiers at every nesting level: node ids, position
//! vpis and owner back-references, condition ids, indicator ids. Edges internal to the
//! subset are carried over and remapped; edges crossing the subset boundary are dropped.

use crate::data::{NodeData, defaults::default_label};
use crate::graph::{Edge, Node, NodeType, XYPosition};
use crate::ids::{self, IdAllocator};
use ahash::{AHashMap, AHashSet};
use tracing::{debug, warn};

pub mod paste;

pub use paste::{Clipboard, PasteResult, prepare_paste, prepare_paste_with, selectable_parents};

/// Outcome of a clone. `nodes`/`edges` hold the complete graph after the operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CloneResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Original node id -> cloned node id.
    pub id_map: AHashMap<String, String>,
    /// Edges with exactly one endpoint inside the selection, which were not copied.
    pub dropped_edges: usize,
}

impl CloneResult {
    /// True when nothing was cloned and the inputs came back unchanged.
    pub fn is_noop(&self) -> bool {
        self.id_map.is_empty()
    }

    /// Ids of the newly created nodes.
    pub fn cloned_ids(&self) -> Vec<String> {
        let new_ids: AHashSet<&str> = self.id_map.values().map(String::as_str).collect();
        self.nodes
            .iter()
            .filter(|n| new_ids.contains(n.id.as_str()))
            .map(|n| n.id.clone())
            .collect()
    }
}

/// Nodes and edges regenerated from a subset, before they are merged into a host graph.
#[derive(Debug, Default)]
pub(crate) struct RegeneratedBatch {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub id_map: AHashMap<String, String>,
    pub dropped_edges: usize,
}

/// Clones `selection` into the graph formed by `all_nodes` and `all_edges`.
///
/// Start nodes are never cloned. Fresh ids are scoped against `all_nodes ∪ selection`.
pub fn clone_selection(all_nodes: &[Node], all_edges: &[Edge], selection: &[Node]) -> CloneResult {
    let mut allocator = IdAllocator::seeded(all_nodes.iter().chain(selection), all_edges);
    clone_selection_with(&mut allocator, all_nodes, all_edges, selection)
}

/// Same as [`clone_selection`], drawing ids from a caller-owned allocator.
pub fn clone_selection_with(
    allocator: &mut IdAllocator,
    all_nodes: &[Node],
    all_edges: &[Edge],
    selection: &[Node],
) -> CloneResult {
    allocator.observe_all(all_nodes, all_edges);
    let cloneable = cloneable_subset(selection);
    if cloneable.is_empty() {
        debug!("Clone skipped: selection holds no cloneable nodes");
        return CloneResult {
            nodes: all_nodes.to_vec(),
            edges: all_edges.to_vec(),
            id_map: AHashMap::new(),
            dropped_edges: 0,
        };
    }

    let batch = regenerate_batch(allocator, &cloneable, all_edges);
    if batch.dropped_edges > 0 {
        warn!(
            dropped = batch.dropped_edges,
            "Edges crossing the clone selection were not copied"
        );
    }
    debug!(
        cloned = batch.nodes.len(),
        edges = batch.edges.len(),
        "Cloned selection"
    );

    let mut nodes = deselected(all_nodes);
    nodes.extend(batch.nodes);
    let mut edges = all_edges.to_vec();
    edges.extend(batch.edges);

    CloneResult {
        nodes,
        edges,
        id_map: batch.id_map,
        dropped_edges: batch.dropped_edges,
    }
}

/// The selection without start nodes, and without repeated ids.
pub(crate) fn cloneable_subset(selection: &[Node]) -> Vec<Node> {
    let mut seen = AHashSet::new();
    selection
        .iter()
        .filter(|n| n.node_type() != NodeType::Start)
        .filter(|n| seen.insert(n.id.clone()))
        .cloned()
        .collect()
}

pub(crate) fn deselected(nodes: &[Node]) -> Vec<Node> {
    nodes
        .iter()
        .cloned()
        .map(|mut n| {
            n.selected = false;
            n
        })
        .collect()
}

/// Copies `subset` with fresh ids and carries over the edges of `edges` internal to it.
pub(crate) fn regenerate_batch(
    allocator: &mut IdAllocator,
    subset: &[Node],
    edges: &[Edge],
) -> RegeneratedBatch {
    let mut batch = RegeneratedBatch::default();
    let mut vpi_map: AHashMap<String, String> = AHashMap::new();

    for original in subset {
        let node_type = original.node_type();
        let new_id = allocator.next_node_id(node_type);

        let mut copy = original.clone();
        if copy.label() == default_label(node_type, &original.id) {
            copy.data.set_label(default_label(node_type, &new_id));
        }
        vpi_map.extend(regenerate_nested_ids(&mut copy.data, &new_id));
        copy.id = new_id.clone();
        copy.position = XYPosition::ORIGIN;
        copy.selected = true;

        batch.id_map.insert(original.id.clone(), new_id);
        batch.nodes.push(copy);
    }

    // Exit/modify nodes bound to a position copied in the same batch follow the copy.
    for node in &mut batch.nodes {
        if let Some(Some(target)) = node.data.position_ref_mut() {
            if let Some(new_vpi) = vpi_map.get(target.as_str()) {
                *target = new_vpi.clone();
            }
        }
    }

    for edge in edges {
        let source = batch.id_map.get(&edge.source);
        let target = batch.id_map.get(&edge.target);
        match (source, target) {
            (Some(source), Some(target)) => {
                let id = allocator.next_edge_id();
                batch.edges.push(Edge::new(id, source.clone(), target.clone()));
            }
            (Some(_), None) | (None, Some(_)) => batch.dropped_edges += 1,
            (None, None) => {}
        }
    }

    batch
}

/// Rewrites every nested identifier of `data` for a node now called `node_id`.
///
/// Returns the old -> new vpi mapping of the node's positions.
pub fn regenerate_nested_ids(data: &mut NodeData, node_id: &str) -> AHashMap<String, String> {
    let mut vpi_map = AHashMap::new();

    if let Some(positions) = data.positions_mut() {
        for (index, position) in positions.iter_mut().enumerate() {
            let new_vpi = ids::position_vpi(node_id, index + 1);
            let old_vpi = std::mem::replace(&mut position.vpi, new_vpi.clone());
            vpi_map.insert(old_vpi, new_vpi);
            position.source_node_id = node_id.to_string();
        }
    }
    if let Some(conditions) = data.conditions_mut() {
        conditions.regenerate_ids();
    }
    if let Some(indicators) = data.indicators_mut() {
        for indicator in indicators.values_mut() {
            indicator.id = ids::next_indicator_id();
        }
    }

    data.touch();
    vpi_map
}
