//! Orphan/invariant validator.
//!
//! Flags are recomputed from scratch on every call. The validator only reports; it never
//! deletes or reconnects anything.

use crate::graph::{Edge, Node, NodeType, incoming_counts};
use ahash::AHashSet;
use tracing::debug;

/// Structural violations found in a graph state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphFlags {
    /// Non-start, non-virtual nodes with zero incoming edges.
    pub orphan_ids: AHashSet<String>,
    /// Every start node after the first one in node order.
    pub extra_start_ids: AHashSet<String>,
}

impl GraphFlags {
    /// Whether the renderer should draw an error marker on `node_id`.
    pub fn is_flagged(&self, node_id: &str) -> bool {
        self.orphan_ids.contains(node_id) || self.extra_start_ids.contains(node_id)
    }

    pub fn is_clean(&self) -> bool {
        self.orphan_ids.is_empty() && self.extra_start_ids.is_empty()
    }
}

pub fn compute_flags(nodes: &[Node], edges: &[Edge]) -> GraphFlags {
    let incoming = incoming_counts(edges);
    let mut flags = GraphFlags::default();
    let mut seen_start = false;

    for node in nodes {
        if node.node_type() == NodeType::Start {
            if seen_start {
                flags.extra_start_ids.insert(node.id.clone());
            }
            seen_start = true;
            continue;
        }
        if !node.is_virtual && !incoming.contains_key(node.id.as_str()) {
            flags.orphan_ids.insert(node.id.clone());
        }
    }

    if !flags.is_clean() {
        debug!(
            orphans = flags.orphan_ids.len(),
            extra_starts = flags.extra_start_ids.len(),
            "Graph has structural violations"
        );
    }
    flags
}
