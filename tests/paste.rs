//! Tests for clipboard capture and paste reconnection.
mod common;
use common::*;
use stratagraph::clone::selectable_parents;
use stratagraph::prelude::*;

fn scenario_clipboard() -> Clipboard {
    let graph = scenario_graph();
    Clipboard::capture(&graph.nodes, &graph.edges, &ids(&["signal-1", "entry-1"]))
}

#[test]
fn test_capture_keeps_internal_edges_only() {
    let clipboard = scenario_clipboard();

    assert!(clipboard.has_data());
    assert_eq!(clipboard.nodes().len(), 2);
    assert_eq!(clipboard.edges().len(), 1);
    assert_eq!(clipboard.edges()[0].id, "edge-2");
    assert!(!Clipboard::default().has_data());
}

#[test]
fn test_paste_reference_scenario() {
    let graph = scenario_graph();
    let clipboard = scenario_clipboard();

    let result = prepare_paste(&clipboard, &graph.nodes, &graph.edges, "start-1").unwrap();

    assert_eq!(result.pasted_ids(), vec!["signal-2".to_string(), "entry-2".to_string()]);
    assert_eq!(result.root_edges.len(), 1);
    let root_edge = &result.root_edges[0];
    assert_eq!(root_edge.source, "start-1");
    assert_eq!(root_edge.target, "signal-2");
    assert_eq!(root_edge.id, "edge-4");

    let new_edges: Vec<&Edge> = result.edges.iter().skip(graph.edges.len()).collect();
    assert_eq!(new_edges.len(), 2);
    assert_eq!(new_edges[0].id, "edge-3");
    assert_eq!(
        (new_edges[0].source.as_str(), new_edges[0].target.as_str()),
        ("signal-2", "entry-2")
    );

    let flags = compute_flags(&result.nodes, &result.edges);
    assert!(flags.is_clean());
}

#[test]
fn test_every_root_gets_one_parent_edge() {
    let mut graph = scenario_graph();
    graph.nodes.push(Node::with_defaults("alert-1", NodeType::Alert));
    graph.nodes.push(Node::with_defaults("exit-1", NodeType::Exit));
    graph.edges.push(Edge::new("edge-3", "entry-1", "exit-1"));
    graph.edges.push(Edge::new("edge-4", "signal-1", "alert-1"));

    // Two roots: signal-1 (feeding alert-1) and exit-1, whose parent stays behind.
    let clipboard = Clipboard::capture(
        &graph.nodes,
        &graph.edges,
        &ids(&["signal-1", "alert-1", "exit-1"]),
    );
    let result = prepare_paste(&clipboard, &graph.nodes, &graph.edges, "entry-1").unwrap();

    let mut root_targets: Vec<&str> = result
        .root_edges
        .iter()
        .map(|e| e.target.as_str())
        .collect();
    root_targets.sort_unstable();
    assert_eq!(root_targets, vec!["exit-2", "signal-2"]);
    assert!(result.root_edges.iter().all(|e| e.source == "entry-1"));

    let after = StrategyGraph::new(result.nodes.clone(), result.edges.clone());
    let incoming = after.incoming_counts();
    for id in result.pasted_ids() {
        assert!(incoming.get(id.as_str()).copied().unwrap_or(0) >= 1, "'{}' is orphaned", id);
    }
    assert!(after.has_no_dangling_edges());
}

#[test]
fn test_start_nodes_in_clipboard_are_not_pasted() {
    let graph = scenario_graph();
    let clipboard = Clipboard::capture(
        &graph.nodes,
        &graph.edges,
        &ids(&["start-1", "signal-1", "entry-1"]),
    );

    let result = prepare_paste(&clipboard, &graph.nodes, &graph.edges, "entry-1").unwrap();

    assert_eq!(result.pasted_ids().len(), 2);
    assert_eq!(result.dropped_edges, 1);
    assert_eq!(result.root_edges.len(), 1);
    assert_eq!(result.root_edges[0].target, "signal-2");
    assert!(compute_flags(&result.nodes, &result.edges).is_clean());
}

#[test]
fn test_paste_preconditions() {
    let graph = scenario_graph();

    let err = prepare_paste(&Clipboard::default(), &graph.nodes, &graph.edges, "start-1");
    assert_eq!(err, Err(PasteError::EmptyClipboard));

    let err = prepare_paste(&scenario_clipboard(), &graph.nodes, &graph.edges, "signal-9");
    assert_eq!(err, Err(PasteError::ParentNotFound("signal-9".to_string())));

    let only_start = Clipboard::capture(&graph.nodes, &graph.edges, &ids(&["start-1"]));
    let err = prepare_paste(&only_start, &graph.nodes, &graph.edges, "signal-1");
    assert_eq!(err, Err(PasteError::NothingPasteable));

    let mut with_end = graph.clone();
    with_end.nodes.push(Node::with_defaults("end-1", NodeType::End));
    with_end.edges.push(Edge::new("edge-3", "entry-1", "end-1"));
    let err = prepare_paste(&scenario_clipboard(), &with_end.nodes, &with_end.edges, "end-1");
    assert!(matches!(err, Err(PasteError::TerminalParent { .. })));
}

#[test]
fn test_failed_paste_leaves_editor_unchanged() {
    let mut editor = scenario_editor();
    let before = editor.graph().clone();
    let revision = editor.revision();

    let err = editor
        .apply(EditorCommand::Paste {
            clipboard: scenario_clipboard(),
            parent: "missing-1".to_string(),
        })
        .unwrap_err();

    assert_eq!(err, EditError::Paste(PasteError::ParentNotFound("missing-1".to_string())));
    assert_eq!(editor.graph(), &before);
    assert_eq!(editor.revision(), revision);
    assert_eq!(editor.history().len(), 1);

    // Ids reserved by the failed attempt are not burned.
    let outcome = editor
        .apply(EditorCommand::Paste {
            clipboard: scenario_clipboard(),
            parent: "start-1".to_string(),
        })
        .unwrap();
    assert_eq!(outcome.created, vec!["signal-2".to_string(), "entry-2".to_string()]);
}

#[test]
fn test_selectable_parents_exclude_terminal_and_virtual() {
    let mut graph = scenario_graph();
    graph.nodes.push(Node::with_defaults("end-1", NodeType::End));
    let mut overview = Node::with_defaults("alert-1", NodeType::Alert);
    overview.is_virtual = true;
    graph.nodes.push(overview);

    let parents: Vec<&str> = selectable_parents(&graph.nodes)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();

    assert_eq!(parents, vec!["start-1", "signal-1", "entry-1"]);
}

#[test]
fn test_clipboard_json_round_trip_pastes_the_same() {
    let graph = scenario_graph();
    let json = scenario_clipboard().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"][0]["type"], "signal");
    assert_eq!(value["nodes"][1]["data"]["positions"][0]["vpi"], "entry-1-pos1");

    let restored = Clipboard::from_json(&json).unwrap();
    let result = prepare_paste(&restored, &graph.nodes, &graph.edges, "start-1").unwrap();
    assert_eq!(result.pasted_ids(), vec!["signal-2".to_string(), "entry-2".to_string()]);
}

#[test]
fn test_editor_paste_is_one_undo_step() {
    let mut editor = scenario_editor();
    editor
        .apply(EditorCommand::Select(ids(&["signal-1", "entry-1"])))
        .unwrap();
    let clipboard = editor.copy_selection();

    editor
        .apply(EditorCommand::Paste {
            clipboard: clipboard.clone(),
            parent: "start-1".to_string(),
        })
        .unwrap();
    assert_eq!(editor.nodes().len(), 5);

    editor.apply(EditorCommand::Undo).unwrap();
    assert_eq!(editor.nodes().len(), 3);
    assert_eq!(editor.edges().len(), 2);

    // The same clipboard can be pasted again after undo.
    let outcome = editor
        .apply(EditorCommand::Paste {
            clipboard,
            parent: "entry-1".to_string(),
        })
        .unwrap();
    assert_eq!(outcome.created, vec!["signal-3".to_string(), "entry-3".to_string()]);
}
