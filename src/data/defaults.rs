//! Default Node Factory.
//!
//! Produces the canonical initial payload for a freshly created node. The output only
//! depends on the node type and id, apart from the `lastUpdated` stamp and the random
//! part of condition and indicator ids.

use super::*;
use crate::graph::NodeType;
use crate::ids;

pub const DEFAULT_SYMBOL: &str = "NIFTY";
pub const DEFAULT_EXCHANGE: &str = "NSE";
pub const DEFAULT_TIMEFRAME: &str = "5m";
pub const DEFAULT_TRADING_TYPE: &str = "intraday";

/// Builds the default payload for a node of `node_type` with id `node_id`.
pub fn create_default_data(node_type: NodeType, node_id: &str) -> NodeData {
    let label = default_label(node_type, node_id);
    let last_updated = Utc::now();

    match node_type {
        NodeType::Start => NodeData::Start(StartData {
            label,
            symbol: DEFAULT_SYMBOL.to_string(),
            exchange: DEFAULT_EXCHANGE.to_string(),
            timeframe: DEFAULT_TIMEFRAME.to_string(),
            trading_type: DEFAULT_TRADING_TYPE.to_string(),
            indicators: default_indicators(),
            last_updated,
        }),
        NodeType::Signal => NodeData::Signal(empty_signal(label, last_updated)),
        NodeType::EntrySignal => NodeData::EntrySignal(empty_signal(label, last_updated)),
        NodeType::ExitSignal => NodeData::ExitSignal(empty_signal(label, last_updated)),
        NodeType::Action => NodeData::Action(seeded_order(label, node_id, last_updated)),
        NodeType::Entry => NodeData::Entry(seeded_order(label, node_id, last_updated)),
        NodeType::Exit => NodeData::Exit(ExitData {
            label,
            target_vpi: None,
            exit_mode: ExitMode::All,
            last_updated,
        }),
        NodeType::Modify => NodeData::Modify(ModifyData {
            label,
            target_vpi: None,
            new_quantity: None,
            new_stop_loss: None,
            last_updated,
        }),
        NodeType::Alert => NodeData::Alert(AlertData {
            label,
            channel: "in-app".to_string(),
            message: String::new(),
            last_updated,
        }),
        NodeType::End => NodeData::End(TerminalData {
            label,
            last_updated,
        }),
        NodeType::ForceEnd => NodeData::ForceEnd(TerminalData {
            label,
            last_updated,
        }),
        NodeType::Retry => NodeData::Retry(empty_re_entry(label, last_updated)),
        NodeType::ReEntrySignal => NodeData::ReEntrySignal(empty_re_entry(label, last_updated)),
        NodeType::SquareOff => NodeData::SquareOff(SquareOffData {
            label,
            close_all: true,
            last_updated,
        }),
    }
}

/// `"{Display name} {n}"` where `n` is the node's numeric suffix, or 1 when it has none.
pub fn default_label(node_type: NodeType, node_id: &str) -> String {
    let number = ids::numeric_suffix(node_id, node_type.id_prefix()).unwrap_or(1);
    format!("{} {}", node_type.display_name(), number)
}

fn empty_signal(label: String, last_updated: DateTime<Utc>) -> SignalData {
    SignalData {
        label,
        conditions: ConditionGroup::empty(GroupLogic::And),
        last_updated,
    }
}

fn empty_re_entry(label: String, last_updated: DateTime<Utc>) -> ReEntryData {
    ReEntryData {
        label,
        conditions: ConditionGroup::empty(GroupLogic::And),
        retry_config: ReEntryPolicy::default(),
        last_updated,
    }
}

fn seeded_order(label: String, node_id: &str, last_updated: DateTime<Utc>) -> OrderData {
    OrderData {
        label,
        positions: vec![Position::new(ids::position_vpi(node_id, 1), node_id)],
        last_updated,
    }
}

fn default_indicators() -> AHashMap<String, Indicator> {
    let mut params = AHashMap::new();
    params.insert("period".to_string(), serde_json::json!(20));
    let mut indicators = AHashMap::new();
    indicators.insert(
        "ema_20".to_string(),
        Indicator {
            id: ids::next_indicator_id(),
            kind: "ema".to_string(),
            params,
        },
    );
    indicators
}
