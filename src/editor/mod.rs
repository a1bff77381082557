//! The editor façade.
//!
//! `StrategyEditor` owns the graph, its history, the id watermarks and a revision
//! counter. Every structural command is applied to a working copy first and committed
//! in one step, so nodes, edges, history and revision always move together.

use crate::clone::{self, Clipboard};
use crate::config::EditorConfig;
use crate::error::EditError;
use crate::graph::{Edge, Node, NodeType, StrategyGraph};
use crate::history::History;
use crate::ids::IdAllocator;
use crate::import::IntoGraph;
use crate::layout::{LayoutAdapter, LayoutPreset, LayoutSolver};
use crate::validate::{GraphFlags, compute_flags};
use ahash::AHashMap;
use tracing::{debug, info, warn};

mod command;

pub use command::{EditOutcome, EditorCommand};

/// A snapshot of the graph handed to an asynchronous layout run.
///
/// The result may only be applied while the editor is still at `revision`.
#[derive(Debug, Clone)]
pub struct LayoutTicket {
    pub revision: u64,
    pub preset: LayoutPreset,
    pub graph: StrategyGraph,
}

#[derive(Debug, Clone)]
pub struct StrategyEditor {
    graph: StrategyGraph,
    history: History,
    allocator: IdAllocator,
    revision: u64,
    config: EditorConfig,
}

impl Default for StrategyEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl StrategyEditor {
    /// An editor over an empty graph.
    pub fn new(config: EditorConfig) -> Self {
        let graph = StrategyGraph::default();
        Self {
            history: History::with_base(graph.clone()).with_limit(config.max_history_entries),
            graph,
            allocator: IdAllocator::new(),
            revision: 0,
            config,
        }
    }

    /// An editor adopting `source` as its initial graph.
    pub fn with_graph(source: impl IntoGraph, config: EditorConfig) -> Result<Self, EditError> {
        let mut editor = Self::new(config);
        editor.import(source)?;
        Ok(editor)
    }

    pub fn graph(&self) -> &StrategyGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Bumped by every structural change, undo and redo.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Validator flags for the current graph.
    pub fn flags(&self) -> GraphFlags {
        compute_flags(&self.graph.nodes, &self.graph.edges)
    }

    /// Copies the current selection into a new clipboard value.
    pub fn copy_selection(&self) -> Clipboard {
        Clipboard::from_selection(&self.graph)
    }

    /// Nodes that may be offered as paste parents.
    pub fn selectable_parents(&self) -> Vec<&Node> {
        clone::selectable_parents(&self.graph.nodes)
    }

    /// Applies one command. On error the editor is left exactly as it was.
    pub fn apply(&mut self, command: EditorCommand) -> Result<EditOutcome, EditError> {
        debug!(command = command.name(), revision = self.revision, "Applying command");
        match command {
            EditorCommand::AddNode { node_type, parent } => self.add_node(node_type, parent),
            EditorCommand::Connect { source, target } => {
                let mut allocator = self.allocator.clone();
                let mut working = self.graph.clone();
                working.connect(&mut allocator, &source, &target)?;
                self.allocator = allocator;
                Ok(self.commit(working, Vec::new(), None))
            }
            EditorCommand::Select(ids) => {
                self.graph.select(&ids);
                Ok(self.unchanged())
            }
            EditorCommand::DeleteSelection => {
                let ids = self.graph.selected_ids();
                Ok(self.delete_nodes(&ids))
            }
            EditorCommand::DeleteNodes(ids) => Ok(self.delete_nodes(&ids)),
            EditorCommand::DeleteEdges(ids) => {
                let mut working = self.graph.clone();
                if working.remove_edges(&ids) == 0 {
                    return Ok(self.unchanged());
                }
                Ok(self.commit(working, Vec::new(), None))
            }
            EditorCommand::CloneSelection => Ok(self.clone_selection()),
            EditorCommand::Paste { clipboard, parent } => self.paste(&clipboard, &parent),
            EditorCommand::Undo => Ok(self.undo()),
            EditorCommand::Redo => Ok(self.redo()),
            EditorCommand::Import(graph) => self.import(graph),
        }
    }

    fn add_node(
        &mut self,
        node_type: NodeType,
        parent: Option<String>,
    ) -> Result<EditOutcome, EditError> {
        let mut allocator = self.allocator.clone();
        let mut working = self.graph.clone();
        let id = working.add_node(&mut allocator, node_type, parent.as_deref())?;
        self.allocator = allocator;
        Ok(self.commit(working, vec![id], None))
    }

    fn delete_nodes(&mut self, ids: &[String]) -> EditOutcome {
        let mut working = self.graph.clone();
        let removed = working.remove_nodes(ids);
        if removed == 0 {
            return self.unchanged();
        }
        debug!(removed, "Deleted nodes");
        self.commit(working, Vec::new(), None)
    }

    fn clone_selection(&mut self) -> EditOutcome {
        let selection = self.graph.selected_nodes();
        let result = clone::clone_selection_with(
            &mut self.allocator,
            &self.graph.nodes,
            &self.graph.edges,
            &selection,
        );
        if result.is_noop() {
            return self.unchanged();
        }
        let created = result.cloned_ids();
        let working = StrategyGraph::new(result.nodes, result.edges);
        self.commit(working, created, Some(LayoutPreset::SymmetricTree))
    }

    fn paste(&mut self, clipboard: &Clipboard, parent: &str) -> Result<EditOutcome, EditError> {
        let mut allocator = self.allocator.clone();
        let result = clone::prepare_paste_with(
            &mut allocator,
            clipboard,
            &self.graph.nodes,
            &self.graph.edges,
            parent,
        )?;
        self.allocator = allocator;
        let created = result.pasted_ids();
        let working = StrategyGraph::new(result.nodes, result.edges);
        Ok(self.commit(working, created, Some(LayoutPreset::SymmetricTree)))
    }

    fn undo(&mut self) -> EditOutcome {
        match self.history.undo() {
            Some(snapshot) => self.restore(snapshot),
            None => self.unchanged(),
        }
    }

    fn redo(&mut self) -> EditOutcome {
        match self.history.redo() {
            Some(snapshot) => self.restore(snapshot),
            None => self.unchanged(),
        }
    }

    /// Replaces the whole graph and resets history to a single entry.
    pub fn import(&mut self, source: impl IntoGraph) -> Result<EditOutcome, EditError> {
        let graph = source.into_graph()?;
        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "Imported graph"
        );
        self.allocator = IdAllocator::seeded(&graph.nodes, &graph.edges);
        self.history.reset(graph.clone());
        self.graph = graph;
        self.revision += 1;
        Ok(EditOutcome {
            changed: true,
            created: Vec::new(),
            layout: Some(LayoutPreset::Hierarchical),
            flags: self.flags(),
        })
    }

    fn commit(
        &mut self,
        working: StrategyGraph,
        created: Vec<String>,
        layout: Option<LayoutPreset>,
    ) -> EditOutcome {
        self.allocator.observe_all(&working.nodes, &working.edges);
        self.history.record(working.clone());
        self.graph = working;
        self.revision += 1;
        EditOutcome {
            changed: true,
            created,
            layout,
            flags: self.flags(),
        }
    }

    fn restore(&mut self, snapshot: StrategyGraph) -> EditOutcome {
        self.allocator.observe_all(&snapshot.nodes, &snapshot.edges);
        self.graph = snapshot;
        self.revision += 1;
        EditOutcome {
            changed: true,
            created: Vec::new(),
            layout: None,
            flags: self.flags(),
        }
    }

    fn unchanged(&self) -> EditOutcome {
        EditOutcome {
            changed: false,
            created: Vec::new(),
            layout: None,
            flags: self.flags(),
        }
    }

    /// Captures the current graph for an asynchronous layout run.
    pub fn layout_ticket(&self, preset: LayoutPreset) -> LayoutTicket {
        LayoutTicket {
            revision: self.revision,
            preset,
            graph: self.graph.clone(),
        }
    }

    /// Writes laid-out positions back, unless the graph changed since `revision`.
    ///
    /// Stale results are discarded. Applied positions amend the current history entry
    /// instead of adding an undo step. Returns whether the positions were applied.
    pub fn apply_layout(&mut self, revision: u64, laid_out: &[Node]) -> bool {
        if revision != self.revision {
            warn!(
                ticket = revision,
                current = self.revision,
                "Discarding stale layout result"
            );
            return false;
        }
        let positions: AHashMap<String, _> = laid_out
            .iter()
            .map(|n| (n.id.clone(), n.position))
            .collect();
        self.graph.set_positions(&positions);
        self.history.amend_current(self.graph.clone());
        info!(nodes = positions.len(), "Applied layout positions");
        true
    }

    /// Runs `adapter` over the current graph and applies the result.
    pub async fn auto_arrange<S: LayoutSolver>(
        &mut self,
        adapter: &LayoutAdapter<S>,
        preset: LayoutPreset,
    ) -> bool {
        let ticket = self.layout_ticket(preset);
        let (nodes, _) = adapter
            .layout(ticket.graph.nodes, ticket.graph.edges, ticket.preset)
            .await;
        self.apply_layout(ticket.revision, &nodes)
    }
}
