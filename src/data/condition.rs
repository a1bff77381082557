use crate::ids;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupLogic {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Neq,
    CrossesAbove,
    CrossesBelow,
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Comparator::Gt => ">",
            Comparator::Gte => ">=",
            Comparator::Lt => "<",
            Comparator::Lte => "<=",
            Comparator::Eq => "==",
            Comparator::Neq => "!=",
            Comparator::CrossesAbove => "crosses above",
            Comparator::CrossesBelow => "crosses below",
        };
        write!(f, "{}", symbol)
    }
}

/// A single comparison. Operands are opaque expressions owned by the node editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    pub lhs: String,
    pub operator: Comparator,
    pub rhs: String,
}

/// A group of conditions combined with one logic operator. Groups nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    pub id: String,
    #[serde(default)]
    pub logic: GroupLogic,
    #[serde(default)]
    pub conditions: Vec<ConditionNode>,
}

/// An entry of a condition tree: either a leaf comparison or a nested group.
///
/// Leaves are tried first: a group's fields all have defaults apart from `id`, so a leaf
/// would otherwise decode as an empty group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    Leaf(Condition),
    Group(ConditionGroup),
}

impl ConditionNode {
    pub fn id(&self) -> &str {
        match self {
            ConditionNode::Group(group) => &group.id,
            ConditionNode::Leaf(leaf) => &leaf.id,
        }
    }
}

impl ConditionGroup {
    /// An empty group with a fresh id.
    pub fn empty(logic: GroupLogic) -> Self {
        Self {
            id: ids::next_condition_id(),
            logic,
            conditions: Vec::new(),
        }
    }

    /// Assigns a fresh id to this group and to every group and leaf below it.
    pub fn regenerate_ids(&mut self) {
        self.id = ids::next_condition_id();
        for child in &mut self.conditions {
            match child {
                ConditionNode::Group(group) => group.regenerate_ids(),
                ConditionNode::Leaf(leaf) => leaf.id = ids::next_condition_id(),
            }
        }
    }

    /// Collects the ids of the whole tree, this group included, in depth-first order.
    pub fn collect_ids(&self, out: &mut Vec<String>) {
        out.push(self.id.clone());
        for child in &self.conditions {
            match child {
                ConditionNode::Group(group) => group.collect_ids(out),
                ConditionNode::Leaf(leaf) => out.push(leaf.id.clone()),
            }
        }
    }

    /// Number of groups and leaves in the tree, this group included.
    pub fn node_count(&self) -> usize {
        1 + self
            .conditions
            .iter()
            .map(|child| match child {
                ConditionNode::Group(group) => group.node_count(),
                ConditionNode::Leaf(_) => 1,
            })
            .sum::<usize>()
    }

    /// True when the group holds no children.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
