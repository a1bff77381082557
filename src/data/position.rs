use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Market,
    Limit,
}

/// A trade position owned by an entry or action node.
///
/// `vpi` ties the position to its owning node and slot (`{nodeId}-pos{index}`), and
/// `source_node_id` points back at the owner. Both must change together with the node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub vpi: String,
    pub source_node_id: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<f64>,
}

fn default_quantity() -> u32 {
    1
}

impl Position {
    pub fn new(vpi: String, source_node_id: &str) -> Self {
        Self {
            vpi,
            source_node_id: source_node_id.to_string(),
            side: Side::default(),
            order_type: OrderType::default(),
            quantity: default_quantity(),
            limit_price: None,
        }
    }
}
