//! Tests for the layout adapter and the built-in layered solver.
mod common;
use common::*;
use std::future::{Future, ready};
use stratagraph::config::LayoutConfig;
use stratagraph::graph::Size;
use stratagraph::layout::{LayoutRequest, LayoutResponse};
use stratagraph::prelude::*;

/// A solver that always fails.
struct FailingSolver;

impl LayoutSolver for FailingSolver {
    fn solve(
        &self,
        _request: LayoutRequest,
    ) -> impl Future<Output = std::result::Result<LayoutResponse, LayoutError>> + Send {
        ready(Err(LayoutError::Solver("engine unavailable".to_string())))
    }
}

/// A solver that forgets the last requested node.
struct ForgetfulSolver;

impl LayoutSolver for ForgetfulSolver {
    fn solve(
        &self,
        request: LayoutRequest,
    ) -> impl Future<Output = std::result::Result<LayoutResponse, LayoutError>> + Send {
        let mut response = LayoutResponse::default();
        let keep = request.nodes.len().saturating_sub(1);
        for (index, node) in request.nodes.iter().take(keep).enumerate() {
            response
                .positions
                .insert(node.id.clone(), XYPosition::new(index as f64, 1.0));
        }
        ready(Ok(response))
    }
}

#[test]
fn test_layered_solver_ranks_top_to_bottom() {
    let graph = scenario_graph();
    let adapter = LayoutAdapter::new(LayeredSolver, LayoutConfig::default());

    let (nodes, edges) = tokio_test::block_on(adapter.layout(
        graph.nodes.clone(),
        graph.edges.clone(),
        LayoutPreset::SymmetricTree,
    ));

    assert_eq!(edges, graph.edges);
    let y = |id: &str| nodes.iter().find(|n| n.id == id).unwrap().position.y;
    assert_eq!(y("start-1"), 0.0);
    assert_eq!(y("signal-1"), 164.0);
    assert_eq!(y("entry-1"), 328.0);
    assert!(nodes.iter().all(|n| n.position.x == -90.0));
}

#[test]
fn test_layout_only_changes_positions() {
    let mut graph = scenario_graph();
    graph.select(&ids(&["signal-1"]));
    let adapter = LayoutAdapter::new(LayeredSolver, LayoutConfig::default());

    let (nodes, _) = tokio_test::block_on(adapter.layout(
        graph.nodes.clone(),
        graph.edges.clone(),
        LayoutPreset::Hierarchical,
    ));

    for (before, after) in graph.nodes.iter().zip(&nodes) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.data, after.data);
        assert_eq!(before.selected, after.selected);
    }
}

#[test]
fn test_siblings_share_a_rank() {
    let mut graph = scenario_graph();
    graph.nodes.push(Node::with_defaults("alert-1", NodeType::Alert));
    graph.edges.push(Edge::new("edge-3", "signal-1", "alert-1"));
    let adapter = LayoutAdapter::new(LayeredSolver, LayoutConfig::default());

    let (nodes, _) = tokio_test::block_on(adapter.layout(
        graph.nodes.clone(),
        graph.edges.clone(),
        LayoutPreset::SymmetricTree,
    ));

    let entry = nodes.iter().find(|n| n.id == "entry-1").unwrap().position;
    let alert = nodes.iter().find(|n| n.id == "alert-1").unwrap().position;
    assert_eq!(entry.y, alert.y);
    // Two 180-wide nodes with 60 between them, centred on zero.
    assert_eq!(entry.x, -210.0);
    assert_eq!(alert.x, 30.0);
}

#[test]
fn test_measured_size_is_used_in_request() {
    let mut graph = scenario_graph();
    graph.nodes[1].measured = Some(Size {
        width: 250.0,
        height: 90.0,
    });
    let adapter = LayoutAdapter::new(LayeredSolver, LayoutConfig::default());

    let request = adapter.request_for(&graph.nodes, &graph.edges, LayoutPreset::Hierarchical);

    assert_eq!(request.nodes[0].width, 180.0);
    assert_eq!(request.nodes[1].width, 250.0);
    assert_eq!(request.nodes[1].height, 90.0);
    assert_eq!(request.params.node_spacing, 40.0);
}

#[test]
fn test_solver_failure_keeps_positions() {
    let graph = scenario_graph();
    let adapter = LayoutAdapter::new(FailingSolver, LayoutConfig::default());

    let (nodes, edges) = tokio_test::block_on(adapter.layout(
        graph.nodes.clone(),
        graph.edges.clone(),
        LayoutPreset::SymmetricTree,
    ));

    assert_eq!(nodes, graph.nodes);
    assert_eq!(edges, graph.edges);
}

#[test]
fn test_missing_position_keeps_positions() {
    let graph = scenario_graph();
    let adapter = LayoutAdapter::new(ForgetfulSolver, LayoutConfig::default());

    let (nodes, _) = tokio_test::block_on(adapter.layout(
        graph.nodes.clone(),
        graph.edges.clone(),
        LayoutPreset::SymmetricTree,
    ));

    assert_eq!(nodes, graph.nodes);
}

#[test]
fn test_stale_layout_is_discarded() {
    let mut editor = scenario_editor();
    let adapter = LayoutAdapter::new(LayeredSolver, editor.config().layout.clone());
    let ticket = editor.layout_ticket(LayoutPreset::Hierarchical);

    editor
        .apply(EditorCommand::AddNode {
            node_type: NodeType::Alert,
            parent: Some("signal-1".to_string()),
        })
        .unwrap();
    let current = editor.graph().clone();

    let (nodes, _) = tokio_test::block_on(adapter.layout(
        ticket.graph.nodes,
        ticket.graph.edges,
        ticket.preset,
    ));

    assert!(!editor.apply_layout(ticket.revision, &nodes));
    assert_eq!(editor.graph(), &current);
}

#[test]
fn test_applied_layout_amends_history() {
    let mut editor = scenario_editor();
    let adapter = LayoutAdapter::new(LayeredSolver, editor.config().layout.clone());

    let applied = tokio_test::block_on(editor.auto_arrange(&adapter, LayoutPreset::Hierarchical));

    assert!(applied);
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.history().current(), Some(editor.graph()));
    let signal = editor.graph().node("signal-1").unwrap();
    assert_eq!(signal.position.y, 144.0);
}
