//! Direct import of externally owned graphs.
//!
//! The engine does not define a persistence format. Stores and exporters hand it a plain
//! (nodes, edges) pair, either by implementing [`IntoGraph`] on their own structures or
//! through the renderer's JSON shape ([`GraphDocument`]).

mod document;

pub use document::*;

use crate::error::ImportError;
use crate::graph::StrategyGraph;

/// A trait for external graph models that can be adopted wholesale by the editor.
///
/// # Example
///
/// ```rust,no_run
/// use stratagraph::prelude::*;
///
/// struct SavedStrategy { nodes: Vec<Node>, edges: Vec<Edge> }
///
/// impl IntoGraph for SavedStrategy {
///     fn into_graph(self) -> std::result::Result<StrategyGraph, ImportError> {
///         StrategyGraph::from_parts(self.nodes, self.edges)
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a graph the editor can adopt.
    fn into_graph(self) -> Result<StrategyGraph, ImportError>;
}

impl IntoGraph for StrategyGraph {
    fn into_graph(self) -> Result<StrategyGraph, ImportError> {
        StrategyGraph::from_parts(self.nodes, self.edges)
    }
}

impl IntoGraph for GraphDocument {
    fn into_graph(self) -> Result<StrategyGraph, ImportError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(crate::graph::Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        StrategyGraph::from_parts(nodes, self.edges)
    }
}
