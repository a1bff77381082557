//! Tests for the undo/redo history.
mod common;
use common::*;
use stratagraph::prelude::*;

fn snapshot_with(count: usize) -> GraphSnapshot {
    let nodes = (1..=count)
        .map(|n| Node::with_defaults(format!("signal-{}", n), NodeType::Signal))
        .collect();
    StrategyGraph::new(nodes, Vec::new())
}

#[test]
fn test_undo_redo_round_trip() {
    let mut history = History::with_base(snapshot_with(0));
    history.record(snapshot_with(1));
    history.record(snapshot_with(2));

    assert_eq!(history.undo().map(|s| s.nodes.len()), Some(1));
    assert_eq!(history.undo().map(|s| s.nodes.len()), Some(0));
    assert_eq!(history.undo(), None);

    assert_eq!(history.redo().map(|s| s.nodes.len()), Some(1));
    assert_eq!(history.redo().map(|s| s.nodes.len()), Some(2));
    assert_eq!(history.redo(), None);
}

#[test]
fn test_record_truncates_redo_tail() {
    let mut history = History::with_base(snapshot_with(0));
    history.record(snapshot_with(1));
    history.record(snapshot_with(2));
    history.undo();
    history.undo();

    history.record(snapshot_with(5));

    assert!(!history.can_redo());
    assert_eq!(history.len(), 2);
    assert_eq!(history.current().map(|s| s.nodes.len()), Some(5));
    assert_eq!(history.undo().map(|s| s.nodes.len()), Some(0));
}

#[test]
fn test_boundaries_and_reset() {
    let mut history = History::new();
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo(), None);

    history.record(snapshot_with(1));
    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());

    history.record(snapshot_with(2));
    history.reset(snapshot_with(3));
    assert_eq!(history.len(), 1);
    assert_eq!(history.index(), 0);
    assert_eq!(history.current().map(|s| s.nodes.len()), Some(3));
}

#[test]
fn test_amend_current_does_not_add_a_step() {
    let mut history = History::with_base(snapshot_with(0));
    history.record(snapshot_with(1));

    let mut moved = snapshot_with(1);
    moved.nodes[0].position = XYPosition::new(40.0, 80.0);
    history.amend_current(moved.clone());

    assert_eq!(history.len(), 2);
    assert_eq!(history.current(), Some(&moved));
}

#[test]
fn test_editor_undo_redo_restores_exact_states() {
    let mut editor = scenario_editor();
    let base = editor.graph().clone();

    editor
        .apply(EditorCommand::AddNode {
            node_type: NodeType::Exit,
            parent: Some("entry-1".to_string()),
        })
        .unwrap();
    let with_exit = editor.graph().clone();
    editor
        .apply(EditorCommand::DeleteNodes(ids(&["signal-1"])))
        .unwrap();
    let after_delete = editor.graph().clone();

    editor.apply(EditorCommand::Undo).unwrap();
    assert_eq!(editor.graph(), &with_exit);
    editor.apply(EditorCommand::Undo).unwrap();
    assert_eq!(editor.graph(), &base);

    let outcome = editor.apply(EditorCommand::Undo).unwrap();
    assert!(!outcome.changed);
    assert_eq!(editor.graph(), &base);

    editor.apply(EditorCommand::Redo).unwrap();
    editor.apply(EditorCommand::Redo).unwrap();
    assert_eq!(editor.graph(), &after_delete);

    let outcome = editor.apply(EditorCommand::Redo).unwrap();
    assert!(!outcome.changed);
}

#[test]
fn test_selection_is_not_an_undo_step() {
    let mut editor = scenario_editor();
    let revision = editor.revision();

    let outcome = editor
        .apply(EditorCommand::Select(ids(&["entry-1"])))
        .unwrap();

    assert!(!outcome.changed);
    assert_eq!(editor.revision(), revision);
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.graph().selected_ids(), ids(&["entry-1"]));
}

#[test]
fn test_limit_drops_oldest_entries() {
    let mut history = History::with_base(snapshot_with(0)).with_limit(Some(3));
    for count in 1..=4 {
        history.record(snapshot_with(count));
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.current().map(|s| s.nodes.len()), Some(4));
    assert_eq!(history.undo().map(|s| s.nodes.len()), Some(3));
    assert_eq!(history.undo().map(|s| s.nodes.len()), Some(2));
    assert!(!history.can_undo());
    assert_eq!(history.redo().map(|s| s.nodes.len()), Some(3));

    history.reset(snapshot_with(0));
    assert_eq!(history.limit(), Some(3));
    assert_eq!(history.len(), 1);
}

#[test]
fn test_editor_history_respects_configured_limit() {
    let config = EditorConfig {
        max_history_entries: Some(2),
        ..EditorConfig::default()
    };
    let mut editor = StrategyEditor::with_graph(scenario_graph(), config).unwrap();
    for _ in 0..3 {
        editor
            .apply(EditorCommand::AddNode {
                node_type: NodeType::Alert,
                parent: Some("entry-1".to_string()),
            })
            .unwrap();
    }

    assert_eq!(editor.history().len(), 2);
    assert!(editor.apply(EditorCommand::Undo).unwrap().changed);
    assert!(!editor.apply(EditorCommand::Undo).unwrap().changed);
    assert!(editor.graph().contains_node("alert-2"));
    assert!(!editor.graph().contains_node("alert-3"));
}
