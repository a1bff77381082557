//! Tests for the default payload of freshly created nodes.
use stratagraph::data::defaults::{DEFAULT_EXCHANGE, DEFAULT_SYMBOL, default_label};
use stratagraph::data::{GroupLogic, ReEntryPolicy};
use stratagraph::prelude::*;

#[test]
fn test_every_type_gets_matching_payload_and_label() {
    for &node_type in NodeType::ALL {
        let id = format!("{}-4", node_type.id_prefix());
        let data = create_default_data(node_type, &id);

        assert_eq!(data.node_type(), node_type);
        assert_eq!(data.label(), format!("{} 4", node_type.display_name()));
    }
}

#[test]
fn test_label_falls_back_to_one() {
    assert_eq!(default_label(NodeType::Entry, "entry"), "Entry 1");
    assert_eq!(default_label(NodeType::ExitSignal, "custom-id"), "Exit Signal 1");
    // The suffix is read against the node's own prefix only.
    assert_eq!(default_label(NodeType::Entry, "entry-signal-3"), "Entry 1");
    assert_eq!(default_label(NodeType::ForceEnd, "force-end-12"), "Force End 12");
}

#[test]
fn test_start_defaults() {
    let data = create_default_data(NodeType::Start, "start-1");
    let NodeData::Start(start) = &data else {
        panic!("expected start payload, got {:?}", data);
    };

    assert_eq!(start.label, "Start 1");
    assert_eq!(start.symbol, DEFAULT_SYMBOL);
    assert_eq!(start.exchange, DEFAULT_EXCHANGE);
    assert!(!start.timeframe.is_empty());
    assert!(!start.trading_type.is_empty());

    let indicators = data.indicators().unwrap();
    assert_eq!(indicators.len(), 1);
    let indicator = indicators.values().next().unwrap();
    assert!(indicator.id.starts_with("ind-"));
    assert!(!indicator.kind.is_empty());
}

#[test]
fn test_order_nodes_seed_one_position() {
    for (node_type, id) in [(NodeType::Entry, "entry-3"), (NodeType::Action, "action-2")] {
        let data = create_default_data(node_type, id);
        let positions = data.positions();

        assert_eq!(positions.len(), 1, "{:?}", node_type);
        assert_eq!(positions[0].vpi, format!("{}-pos1", id));
        assert_eq!(positions[0].source_node_id, id);
        assert_eq!(positions[0].quantity, 1);
    }

    assert!(create_default_data(NodeType::Exit, "exit-1").positions().is_empty());
}

#[test]
fn test_condition_types_seed_empty_and_root() {
    let condition_types: Vec<NodeType> = NodeType::ALL
        .iter()
        .copied()
        .filter(|t| t.has_conditions())
        .collect();
    assert!(condition_types.contains(&NodeType::Signal));
    assert!(condition_types.contains(&NodeType::ReEntrySignal));

    for node_type in condition_types {
        let data = create_default_data(node_type, "x-1");
        let root = data.conditions().unwrap();

        assert_eq!(root.logic, GroupLogic::And, "{:?}", node_type);
        assert!(root.is_empty());
        assert!(root.id.starts_with("cond-"));
    }

    assert!(create_default_data(NodeType::Alert, "alert-1").conditions().is_none());
}

#[test]
fn test_re_entry_types_seed_retry_policy() {
    for node_type in [NodeType::Retry, NodeType::ReEntrySignal] {
        let data = create_default_data(node_type, "retry-1");
        let policy = match &data {
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => d.retry_config,
            other => panic!("unexpected payload {:?}", other),
        };
        assert_eq!(
            policy,
            ReEntryPolicy {
                group_number: 1,
                max_re_entries: 1
            }
        );

        let json = data.to_json().unwrap();
        assert_eq!(json["retryConfig"]["groupNumber"], 1);
        assert_eq!(json["retryConfig"]["maxReEntries"], 1);
    }
}

#[test]
fn test_nested_ids_are_fresh_per_call() {
    let first = create_default_data(NodeType::Signal, "signal-1");
    let second = create_default_data(NodeType::Signal, "signal-1");

    assert_ne!(
        first.conditions().unwrap().id,
        second.conditions().unwrap().id
    );
}
