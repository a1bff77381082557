//! Common test utilities for building strategy graphs.
use stratagraph::data::{Comparator, Condition, ConditionGroup, ConditionNode, GroupLogic, Position};
use stratagraph::prelude::*;

/// The reference graph: `start-1 -> signal-1 -> entry-1`.
///
/// Edges are `edge-1` (start-1 -> signal-1) and `edge-2` (signal-1 -> entry-1).
#[allow(dead_code)]
pub fn scenario_graph() -> StrategyGraph {
    StrategyGraph::new(
        vec![
            Node::with_defaults("start-1", NodeType::Start),
            Node::with_defaults("signal-1", NodeType::Signal).at(0.0, 120.0),
            Node::with_defaults("entry-1", NodeType::Entry).at(0.0, 240.0),
        ],
        vec![
            Edge::new("edge-1", "start-1", "signal-1"),
            Edge::new("edge-2", "signal-1", "entry-1"),
        ],
    )
}

/// An editor that has imported [`scenario_graph`].
#[allow(dead_code)]
pub fn scenario_editor() -> StrategyEditor {
    StrategyEditor::with_graph(scenario_graph(), EditorConfig::default())
        .expect("scenario graph should import")
}

/// Ids as owned strings, for selection commands.
#[allow(dead_code)]
pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Borrows the nodes named in `wanted` from `graph`, in graph order.
#[allow(dead_code)]
pub fn nodes_named(graph: &StrategyGraph, wanted: &[&str]) -> Vec<Node> {
    graph
        .nodes
        .iter()
        .filter(|n| wanted.contains(&n.id.as_str()))
        .cloned()
        .collect()
}

/// An entry node carrying `count` positions.
#[allow(dead_code)]
pub fn entry_with_positions(id: &str, count: usize) -> Node {
    let mut node = Node::with_defaults(id, NodeType::Entry);
    if let Some(positions) = node.data.positions_mut() {
        positions.clear();
        for index in 1..=count {
            positions.push(Position::new(format!("{}-pos{}", id, index), id));
        }
    }
    node
}

/// A signal node whose condition tree holds `leaves` comparisons split over a nested OR group.
#[allow(dead_code)]
pub fn signal_with_conditions(id: &str, leaves: usize) -> Node {
    let mut node = Node::with_defaults(id, NodeType::Signal);
    if let Some(root) = node.data.conditions_mut() {
        let mut nested = ConditionGroup::empty(GroupLogic::Or);
        for index in 0..leaves {
            let leaf = ConditionNode::Leaf(Condition {
                id: format!("cond-fixture-{}-{}", id, index),
                lhs: "close".to_string(),
                operator: Comparator::Gt,
                rhs: format!("ema_{}", 10 * (index + 1)),
            });
            if index % 2 == 0 {
                root.conditions.push(leaf);
            } else {
                nested.conditions.push(leaf);
            }
        }
        root.conditions.push(ConditionNode::Group(nested));
    }
    node
}

/// Every nested identifier of `node`: position vpis, condition ids and indicator ids.
#[allow(dead_code)]
pub fn nested_ids(node: &Node) -> Vec<String> {
    let mut out: Vec<String> = node.data.positions().iter().map(|p| p.vpi.clone()).collect();
    if let Some(conditions) = node.data.conditions() {
        conditions.collect_ids(&mut out);
    }
    if let Some(indicators) = node.data.indicators() {
        out.extend(indicators.values().map(|i| i.id.clone()));
    }
    out
}

#[allow(dead_code)]
pub fn edge_pairs(edges: &[Edge]) -> Vec<(String, String)> {
    edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect()
}
