//! Linear undo/redo history over full graph snapshots.

use crate::graph::StrategyGraph;
use tracing::debug;

/// An immutable (nodes, edges) pair stored by the history.
pub type GraphSnapshot = StrategyGraph;

/// Append-only snapshot list with a cursor.
///
/// Recording truncates everything after the cursor before appending, so there is no
/// redo tree: undoing and then recording discards the undone future. With a limit set,
/// the oldest entries are dropped once the list grows past it.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<GraphSnapshot>,
    index: usize,
    limit: Option<usize>,
}

impl History {
    /// An empty history. The first `record` becomes the base entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A history holding only `snapshot`.
    pub fn with_base(snapshot: GraphSnapshot) -> Self {
        Self {
            entries: vec![snapshot],
            index: 0,
            limit: None,
        }
    }

    /// Caps the number of stored entries. `None` keeps everything.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn record(&mut self, snapshot: GraphSnapshot) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;
        self.enforce_limit();
        debug!(entries = self.entries.len(), "Recorded history entry");
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        let excess = self.entries.len().saturating_sub(limit);
        if excess > 0 {
            self.entries.drain(..excess);
            self.index = self.index.saturating_sub(excess);
            debug!(dropped = excess, "Dropped oldest history entries");
        }
    }

    /// Steps back one entry. `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<GraphSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).cloned()
    }

    /// Steps forward one entry. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<GraphSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&GraphSnapshot> {
        self.entries.get(self.index)
    }

    /// Drops every entry and starts over from `snapshot`. The limit is kept.
    pub fn reset(&mut self, snapshot: GraphSnapshot) {
        self.entries = vec![snapshot];
        self.index = 0;
    }

    /// Replaces the entry under the cursor without adding an undo step.
    pub fn amend_current(&mut self, snapshot: GraphSnapshot) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = snapshot,
            None => self.record(snapshot),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
