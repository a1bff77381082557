//! Typed node payloads.
//!
//! `NodeData` is a tagged union keyed by node type. Every nested identifier family
//! (positions, position references, condition trees, indicators) is declared on the
//! variants that own it, and the accessors below match exhaustively so the clone engine
//! cannot miss a variant when it rewrites ids.

use crate::graph::NodeType;
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod condition;
pub mod defaults;
mod position;

pub use condition::*;
pub use defaults::create_default_data;
pub use position::*;

/// A technical indicator configured on the start node, keyed by name in `StartData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub params: AHashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartData {
    pub label: String,
    pub symbol: String,
    pub exchange: String,
    pub timeframe: String,
    pub trading_type: String,
    #[serde(default)]
    pub indicators: AHashMap<String, Indicator>,
    pub last_updated: DateTime<Utc>,
}

/// Payload of `signal`, `entry-signal` and `exit-signal` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalData {
    pub label: String,
    pub conditions: ConditionGroup,
    pub last_updated: DateTime<Utc>,
}

/// Payload of `action` and `entry` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub label: String,
    #[serde(default)]
    pub positions: Vec<Position>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum ExitMode {
    #[default]
    All,
    Partial {
        quantity: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitData {
    pub label: String,
    /// vpi of the position this exit closes, if bound to one.
    #[serde(default)]
    pub target_vpi: Option<String>,
    #[serde(default)]
    pub exit_mode: ExitMode,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyData {
    pub label: String,
    #[serde(default)]
    pub target_vpi: Option<String>,
    #[serde(default)]
    pub new_quantity: Option<u32>,
    #[serde(default)]
    pub new_stop_loss: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertData {
    pub label: String,
    pub channel: String,
    #[serde(default)]
    pub message: String,
    pub last_updated: DateTime<Utc>,
}

/// Payload of `end` and `force-end` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalData {
    pub label: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReEntryPolicy {
    pub group_number: u32,
    pub max_re_entries: u32,
}

impl Default for ReEntryPolicy {
    fn default() -> Self {
        Self {
            group_number: 1,
            max_re_entries: 1,
        }
    }
}

/// Payload of `retry` and `re-entry-signal` nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReEntryData {
    pub label: String,
    pub conditions: ConditionGroup,
    #[serde(default)]
    pub retry_config: ReEntryPolicy,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareOffData {
    pub label: String,
    #[serde(default = "default_true")]
    pub close_all: bool,
    pub last_updated: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Node payload, one variant per `NodeType`.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Start(StartData),
    Signal(SignalData),
    EntrySignal(SignalData),
    ExitSignal(SignalData),
    Action(OrderData),
    Entry(OrderData),
    Exit(ExitData),
    Modify(ModifyData),
    Alert(AlertData),
    End(TerminalData),
    ForceEnd(TerminalData),
    Retry(ReEntryData),
    ReEntrySignal(ReEntryData),
    SquareOff(SquareOffData),
}

impl NodeData {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeData::Start(_) => NodeType::Start,
            NodeData::Signal(_) => NodeType::Signal,
            NodeData::EntrySignal(_) => NodeType::EntrySignal,
            NodeData::ExitSignal(_) => NodeType::ExitSignal,
            NodeData::Action(_) => NodeType::Action,
            NodeData::Entry(_) => NodeType::Entry,
            NodeData::Exit(_) => NodeType::Exit,
            NodeData::Modify(_) => NodeType::Modify,
            NodeData::Alert(_) => NodeType::Alert,
            NodeData::End(_) => NodeType::End,
            NodeData::ForceEnd(_) => NodeType::ForceEnd,
            NodeData::Retry(_) => NodeType::Retry,
            NodeData::ReEntrySignal(_) => NodeType::ReEntrySignal,
            NodeData::SquareOff(_) => NodeType::SquareOff,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeData::Start(d) => &d.label,
            NodeData::Signal(d) | NodeData::EntrySignal(d) | NodeData::ExitSignal(d) => &d.label,
            NodeData::Action(d) | NodeData::Entry(d) => &d.label,
            NodeData::Exit(d) => &d.label,
            NodeData::Modify(d) => &d.label,
            NodeData::Alert(d) => &d.label,
            NodeData::End(d) | NodeData::ForceEnd(d) => &d.label,
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => &d.label,
            NodeData::SquareOff(d) => &d.label,
        }
    }

    pub fn set_label(&mut self, label: String) {
        match self {
            NodeData::Start(d) => d.label = label,
            NodeData::Signal(d) | NodeData::EntrySignal(d) | NodeData::ExitSignal(d) => {
                d.label = label
            }
            NodeData::Action(d) | NodeData::Entry(d) => d.label = label,
            NodeData::Exit(d) => d.label = label,
            NodeData::Modify(d) => d.label = label,
            NodeData::Alert(d) => d.label = label,
            NodeData::End(d) | NodeData::ForceEnd(d) => d.label = label,
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => d.label = label,
            NodeData::SquareOff(d) => d.label = label,
        }
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        match self {
            NodeData::Start(d) => d.last_updated,
            NodeData::Signal(d) | NodeData::EntrySignal(d) | NodeData::ExitSignal(d) => {
                d.last_updated
            }
            NodeData::Action(d) | NodeData::Entry(d) => d.last_updated,
            NodeData::Exit(d) => d.last_updated,
            NodeData::Modify(d) => d.last_updated,
            NodeData::Alert(d) => d.last_updated,
            NodeData::End(d) | NodeData::ForceEnd(d) => d.last_updated,
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => d.last_updated,
            NodeData::SquareOff(d) => d.last_updated,
        }
    }

    /// Stamps the payload with the current time.
    pub fn touch(&mut self) {
        let now = Utc::now();
        match self {
            NodeData::Start(d) => d.last_updated = now,
            NodeData::Signal(d) | NodeData::EntrySignal(d) | NodeData::ExitSignal(d) => {
                d.last_updated = now
            }
            NodeData::Action(d) | NodeData::Entry(d) => d.last_updated = now,
            NodeData::Exit(d) => d.last_updated = now,
            NodeData::Modify(d) => d.last_updated = now,
            NodeData::Alert(d) => d.last_updated = now,
            NodeData::End(d) | NodeData::ForceEnd(d) => d.last_updated = now,
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => d.last_updated = now,
            NodeData::SquareOff(d) => d.last_updated = now,
        }
    }

    pub fn positions(&self) -> &[Position] {
        match self {
            NodeData::Action(d) | NodeData::Entry(d) => &d.positions,
            NodeData::Start(_)
            | NodeData::Signal(_)
            | NodeData::EntrySignal(_)
            | NodeData::ExitSignal(_)
            | NodeData::Exit(_)
            | NodeData::Modify(_)
            | NodeData::Alert(_)
            | NodeData::End(_)
            | NodeData::ForceEnd(_)
            | NodeData::Retry(_)
            | NodeData::ReEntrySignal(_)
            | NodeData::SquareOff(_) => &[],
        }
    }

    pub fn positions_mut(&mut self) -> Option<&mut Vec<Position>> {
        match self {
            NodeData::Action(d) | NodeData::Entry(d) => Some(&mut d.positions),
            NodeData::Start(_)
            | NodeData::Signal(_)
            | NodeData::EntrySignal(_)
            | NodeData::ExitSignal(_)
            | NodeData::Exit(_)
            | NodeData::Modify(_)
            | NodeData::Alert(_)
            | NodeData::End(_)
            | NodeData::ForceEnd(_)
            | NodeData::Retry(_)
            | NodeData::ReEntrySignal(_)
            | NodeData::SquareOff(_) => None,
        }
    }

    /// The vpi of a position owned by another node that this node acts upon.
    pub fn position_ref_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            NodeData::Exit(d) => Some(&mut d.target_vpi),
            NodeData::Modify(d) => Some(&mut d.target_vpi),
            NodeData::Start(_)
            | NodeData::Signal(_)
            | NodeData::EntrySignal(_)
            | NodeData::ExitSignal(_)
            | NodeData::Action(_)
            | NodeData::Entry(_)
            | NodeData::Alert(_)
            | NodeData::End(_)
            | NodeData::ForceEnd(_)
            | NodeData::Retry(_)
            | NodeData::ReEntrySignal(_)
            | NodeData::SquareOff(_) => None,
        }
    }

    pub fn conditions(&self) -> Option<&ConditionGroup> {
        match self {
            NodeData::Signal(d) | NodeData::EntrySignal(d) | NodeData::ExitSignal(d) => {
                Some(&d.conditions)
            }
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => Some(&d.conditions),
            NodeData::Start(_)
            | NodeData::Action(_)
            | NodeData::Entry(_)
            | NodeData::Exit(_)
            | NodeData::Modify(_)
            | NodeData::Alert(_)
            | NodeData::End(_)
            | NodeData::ForceEnd(_)
            | NodeData::SquareOff(_) => None,
        }
    }

    pub fn conditions_mut(&mut self) -> Option<&mut ConditionGroup> {
        match self {
            NodeData::Signal(d) | NodeData::EntrySignal(d) | NodeData::ExitSignal(d) => {
                Some(&mut d.conditions)
            }
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => Some(&mut d.conditions),
            NodeData::Start(_)
            | NodeData::Action(_)
            | NodeData::Entry(_)
            | NodeData::Exit(_)
            | NodeData::Modify(_)
            | NodeData::Alert(_)
            | NodeData::End(_)
            | NodeData::ForceEnd(_)
            | NodeData::SquareOff(_) => None,
        }
    }

    pub fn indicators(&self) -> Option<&AHashMap<String, Indicator>> {
        match self {
            NodeData::Start(d) => Some(&d.indicators),
            NodeData::Signal(_)
            | NodeData::EntrySignal(_)
            | NodeData::ExitSignal(_)
            | NodeData::Action(_)
            | NodeData::Entry(_)
            | NodeData::Exit(_)
            | NodeData::Modify(_)
            | NodeData::Alert(_)
            | NodeData::End(_)
            | NodeData::ForceEnd(_)
            | NodeData::Retry(_)
            | NodeData::ReEntrySignal(_)
            | NodeData::SquareOff(_) => None,
        }
    }

    pub fn indicators_mut(&mut self) -> Option<&mut AHashMap<String, Indicator>> {
        match self {
            NodeData::Start(d) => Some(&mut d.indicators),
            NodeData::Signal(_)
            | NodeData::EntrySignal(_)
            | NodeData::ExitSignal(_)
            | NodeData::Action(_)
            | NodeData::Entry(_)
            | NodeData::Exit(_)
            | NodeData::Modify(_)
            | NodeData::Alert(_)
            | NodeData::End(_)
            | NodeData::ForceEnd(_)
            | NodeData::Retry(_)
            | NodeData::ReEntrySignal(_)
            | NodeData::SquareOff(_) => None,
        }
    }

    /// Decodes a payload from its wire JSON given the node type it belongs to.
    pub fn from_json(node_type: NodeType, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match node_type {
            NodeType::Start => NodeData::Start(serde_json::from_value(value)?),
            NodeType::Signal => NodeData::Signal(serde_json::from_value(value)?),
            NodeType::EntrySignal => NodeData::EntrySignal(serde_json::from_value(value)?),
            NodeType::ExitSignal => NodeData::ExitSignal(serde_json::from_value(value)?),
            NodeType::Action => NodeData::Action(serde_json::from_value(value)?),
            NodeType::Entry => NodeData::Entry(serde_json::from_value(value)?),
            NodeType::Exit => NodeData::Exit(serde_json::from_value(value)?),
            NodeType::Modify => NodeData::Modify(serde_json::from_value(value)?),
            NodeType::Alert => NodeData::Alert(serde_json::from_value(value)?),
            NodeType::End => NodeData::End(serde_json::from_value(value)?),
            NodeType::ForceEnd => NodeData::ForceEnd(serde_json::from_value(value)?),
            NodeType::Retry => NodeData::Retry(serde_json::from_value(value)?),
            NodeType::ReEntrySignal => NodeData::ReEntrySignal(serde_json::from_value(value)?),
            NodeType::SquareOff => NodeData::SquareOff(serde_json::from_value(value)?),
        })
    }

    /// Encodes the payload without its type tag.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            NodeData::Start(d) => serde_json::to_value(d),
            NodeData::Signal(d) | NodeData::EntrySignal(d) | NodeData::ExitSignal(d) => {
                serde_json::to_value(d)
            }
            NodeData::Action(d) | NodeData::Entry(d) => serde_json::to_value(d),
            NodeData::Exit(d) => serde_json::to_value(d),
            NodeData::Modify(d) => serde_json::to_value(d),
            NodeData::Alert(d) => serde_json::to_value(d),
            NodeData::End(d) | NodeData::ForceEnd(d) => serde_json::to_value(d),
            NodeData::Retry(d) | NodeData::ReEntrySignal(d) => serde_json::to_value(d),
            NodeData::SquareOff(d) => serde_json::to_value(d),
        }
    }
}
