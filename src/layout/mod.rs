//! Layout adapter.
//!
//! The engine does not place nodes itself. It hands node sizes and edge endpoints to a
//! [`LayoutSolver`] and writes the returned positions back. Solver failures are logged
//! and swallowed: the caller always gets a usable graph, at worst with its old positions.

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::graph::{Edge, Node, XYPosition};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, warn};

mod layered;

pub use layered::LayeredSolver;

/// Named solver configurations. Presets only differ in their parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    /// Used after clone and paste.
    SymmetricTree,
    /// Used for a general auto-arrange.
    Hierarchical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    #[serde(rename = "TB")]
    TopBottom,
    #[serde(rename = "LR")]
    LeftRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetParams {
    pub direction: LayoutDirection,
    /// Gap between neighbours in the same rank.
    pub node_spacing: f64,
    /// Gap between consecutive ranks.
    pub rank_spacing: f64,
    /// Order each rank by the position of its parents so subtrees sit under them.
    pub center_parents: bool,
}

impl PresetParams {
    pub fn symmetric_tree() -> Self {
        Self {
            direction: LayoutDirection::TopBottom,
            node_spacing: 60.0,
            rank_spacing: 100.0,
            center_parents: true,
        }
    }

    pub fn hierarchical() -> Self {
        Self {
            direction: LayoutDirection::TopBottom,
            node_spacing: 40.0,
            rank_spacing: 80.0,
            center_parents: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Solver input: node sizes, connectivity and preset parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub params: PresetParams,
}

/// Solver output: the top-left corner of every requested node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResponse {
    pub positions: AHashMap<String, XYPosition>,
}

/// Contract of an external graph-layout solver.
pub trait LayoutSolver {
    fn solve(
        &self,
        request: LayoutRequest,
    ) -> impl Future<Output = Result<LayoutResponse, LayoutError>> + Send;
}

/// Translates graph state into solver requests and writes the answers back.
#[derive(Debug, Clone)]
pub struct LayoutAdapter<S> {
    solver: S,
    config: LayoutConfig,
}

impl<S: LayoutSolver> LayoutAdapter<S> {
    pub fn new(solver: S, config: LayoutConfig) -> Self {
        Self { solver, config }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Builds the solver input, using the configured default size for unmeasured nodes.
    pub fn request_for(&self, nodes: &[Node], edges: &[Edge], preset: LayoutPreset) -> LayoutRequest {
        LayoutRequest {
            nodes: nodes
                .iter()
                .map(|n| {
                    let (width, height) = n.measured.map_or(
                        (self.config.default_node_width, self.config.default_node_height),
                        |size| (size.width, size.height),
                    );
                    LayoutNode {
                        id: n.id.clone(),
                        width,
                        height,
                    }
                })
                .collect(),
            edges: edges
                .iter()
                .map(|e| LayoutEdge {
                    id: e.id.clone(),
                    source: e.source.clone(),
                    target: e.target.clone(),
                })
                .collect(),
            params: self.config.params(preset).clone(),
        }
    }

    /// Lays out the graph. Only `position` changes; on any solver failure the input is
    /// returned untouched.
    pub async fn layout(
        &self,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        preset: LayoutPreset,
    ) -> (Vec<Node>, Vec<Edge>) {
        if nodes.is_empty() {
            return (nodes, edges);
        }

        let request = self.request_for(&nodes, &edges, preset);
        let outcome = self
            .solver
            .solve(request)
            .await
            .and_then(|response| apply_positions(nodes.clone(), &response));

        match outcome {
            Ok(laid_out) => {
                debug!(nodes = laid_out.len(), ?preset, "Applied layout");
                (laid_out, edges)
            }
            Err(e) => {
                warn!(error = %e, ?preset, "Layout failed, keeping previous positions");
                (nodes, edges)
            }
        }
    }
}

/// Writes solver positions onto `nodes`. Fails if any node has no position.
fn apply_positions(mut nodes: Vec<Node>, response: &LayoutResponse) -> Result<Vec<Node>, LayoutError> {
    if let Some(missing) = nodes
        .iter()
        .find(|n| !response.positions.contains_key(&n.id))
    {
        return Err(LayoutError::MissingPosition(missing.id.clone()));
    }
    for node in &mut nodes {
        if let Some(position) = response.positions.get(&node.id) {
            node.position = *position;
        }
    }
    Ok(nodes)
}
