use serde::{Deserialize, Serialize};
use std::fmt;

/// Master macro to define every node type, its wire name, id prefix and display name.
///
/// Wire names double as id prefixes. The suffix pattern used by the id generator is
/// anchored at both ends, so `entry-signal-3` never counts towards the `entry` sequence.
macro_rules! define_node_types {
    ( $( ($variant:ident, $wire:literal, $display:literal) ),* $(,)? ) => {
        /// The closed set of strategy node types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum NodeType {
            $(
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl NodeType {
            /// Every node type, in declaration order.
            pub const ALL: &'static [NodeType] = &[ $( NodeType::$variant, )* ];

            /// The name used on the wire (`"entry-signal"`, `"force-end"`, ...).
            pub fn wire_name(self) -> &'static str {
                match self {
                    $( NodeType::$variant => $wire, )*
                }
            }

            /// Human readable name used for default labels.
            pub fn display_name(self) -> &'static str {
                match self {
                    $( NodeType::$variant => $display, )*
                }
            }

            /// Looks a node type up by its wire name.
            pub fn from_wire_name(name: &str) -> Option<NodeType> {
                match name {
                    $( $wire => Some(NodeType::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

define_node_types! {
    (Start, "start", "Start"),
    (Signal, "signal", "Signal"),
    (EntrySignal, "entry-signal", "Entry Signal"),
    (ExitSignal, "exit-signal", "Exit Signal"),
    (Action, "action", "Action"),
    (Entry, "entry", "Entry"),
    (Exit, "exit", "Exit"),
    (Modify, "modify", "Modify"),
    (Alert, "alert", "Alert"),
    (End, "end", "End"),
    (ForceEnd, "force-end", "Force End"),
    (Retry, "retry", "Retry"),
    (ReEntrySignal, "re-entry-signal", "Re-Entry Signal"),
    (SquareOff, "square-off", "Square Off"),
}

impl NodeType {
    /// Prefix of this type's node id sequence.
    pub fn id_prefix(self) -> &'static str {
        self.wire_name()
    }

    /// Terminal nodes end a strategy path and never act as a parent.
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeType::End | NodeType::ForceEnd)
    }

    /// Whether nodes of this type carry a condition tree.
    pub fn has_conditions(self) -> bool {
        matches!(
            self,
            NodeType::Signal
                | NodeType::EntrySignal
                | NodeType::ExitSignal
                | NodeType::Retry
                | NodeType::ReEntrySignal
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
