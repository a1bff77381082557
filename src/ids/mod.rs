//! Identifier generation.
//!
//! Node and edge ids are high-water-mark sequences: `{prefix}-{n}` where `n` is one past
//! the largest suffix ever seen for that prefix. Nested condition and indicator ids are
//! not scanned, so they carry a millisecond timestamp and a random suffix instead.

use crate::graph::{Edge, Node, NodeType};
use ahash::AHashMap;
use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;

pub const EDGE_PREFIX: &str = "edge";
pub const CONDITION_PREFIX: &str = "cond";
pub const INDICATOR_PREFIX: &str = "ind";

const RANDOM_SUFFIX_LEN: usize = 6;

/// Extracts `n` from `{prefix}-{n}`. Anything else after the prefix yields `None`.
pub fn numeric_suffix(id: &str, prefix: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Largest suffix among `ids` for `prefix`, 0 if none match.
fn high_water_mark<'a>(ids: impl IntoIterator<Item = &'a str>, prefix: &str) -> u64 {
    ids.into_iter()
        .filter_map(|id| numeric_suffix(id, prefix))
        .max()
        .unwrap_or(0)
}

/// Next id for a node of `node_type`, scanning `existing_nodes`.
pub fn next_node_id(existing_nodes: &[Node], node_type: NodeType) -> String {
    let prefix = node_type.id_prefix();
    let max = high_water_mark(existing_nodes.iter().map(|n| n.id.as_str()), prefix);
    format!("{}-{}", prefix, max + 1)
}

/// Next edge id, scanning `existing_edges`.
pub fn next_edge_id(existing_edges: &[Edge]) -> String {
    let max = high_water_mark(existing_edges.iter().map(|e| e.id.as_str()), EDGE_PREFIX);
    format!("{}-{}", EDGE_PREFIX, max + 1)
}

/// Visual position identifier of the `index`-th (1-based) position of `node_id`.
pub fn position_vpi(node_id: &str, index: usize) -> String {
    format!("{}-pos{}", node_id, index)
}

pub fn next_condition_id() -> String {
    random_scoped_id(CONDITION_PREFIX)
}

pub fn next_indicator_id() -> String {
    random_scoped_id(INDICATOR_PREFIX)
}

fn random_scoped_id(prefix: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), suffix)
}

/// Batch-scoped id allocator.
///
/// Keeps a high-water mark per node-type prefix and one for edges. Marks only ever
/// grow: observing a smaller id or forgetting a node never lowers them, so an id handed
/// out once is never handed out again by the same allocator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    node_marks: AHashMap<NodeType, u64>,
    edge_mark: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an allocator from every node and edge id in the given sets.
    pub fn seeded<'a>(
        nodes: impl IntoIterator<Item = &'a Node>,
        edges: impl IntoIterator<Item = &'a Edge>,
    ) -> Self {
        let mut allocator = Self::new();
        for node in nodes {
            allocator.observe_node(node);
        }
        for edge in edges {
            allocator.observe_edge_id(&edge.id);
        }
        allocator
    }

    pub fn observe_node(&mut self, node: &Node) {
        self.observe_node_id(&node.id);
    }

    /// Raises the mark of whichever sequence `id` belongs to.
    ///
    /// The sequence is picked from the id's stem, not from the node carrying it, so an
    /// imported `signal-2` that holds an alert still blocks `signal-2` for new signals.
    pub fn observe_node_id(&mut self, id: &str) {
        let Some((stem, _)) = id.rsplit_once('-') else {
            return;
        };
        let Some(node_type) = NodeType::from_wire_name(stem) else {
            return;
        };
        if let Some(n) = numeric_suffix(id, node_type.id_prefix()) {
            let mark = self.node_marks.entry(node_type).or_insert(0);
            *mark = (*mark).max(n);
        }
    }

    pub fn observe_edge_id(&mut self, id: &str) {
        if let Some(n) = numeric_suffix(id, EDGE_PREFIX) {
            self.edge_mark = self.edge_mark.max(n);
        }
    }

    /// Folds in every node and edge of a graph state.
    pub fn observe_all(&mut self, nodes: &[Node], edges: &[Edge]) {
        for node in nodes {
            self.observe_node(node);
        }
        for edge in edges {
            self.observe_edge_id(&edge.id);
        }
    }

    pub fn next_node_id(&mut self, node_type: NodeType) -> String {
        let mark = self.node_marks.entry(node_type).or_insert(0);
        *mark += 1;
        format!("{}-{}", node_type.id_prefix(), mark)
    }

    pub fn next_edge_id(&mut self) -> String {
        self.edge_mark += 1;
        format!("{}-{}", EDGE_PREFIX, self.edge_mark)
    }

    /// Current mark for `node_type`; the next id uses this plus one.
    pub fn node_watermark(&self, node_type: NodeType) -> u64 {
        self.node_marks.get(&node_type).copied().unwrap_or(0)
    }

    pub fn edge_watermark(&self) -> u64 {
        self.edge_mark
    }
}
