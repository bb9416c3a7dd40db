//! Query tree node types

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::QueryError;
use crate::query::id::NodeId;

/// Shared handle to a query node
///
/// Trees are persistent. An edit rebuilds the nodes on the path to the
/// changed node and reuses every other `Arc`, so `Arc::ptr_eq` tells whether
/// a subtree was touched.
pub type Query = Arc<QueryNode>;

/// Boolean operator of a group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOp {
    /// Every child must match ("All")
    #[default]
    And,
    /// At least one child must match ("Any")
    Or,
}

impl BoolOp {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            BoolOp::And => BoolOp::Or,
            BoolOp::Or => BoolOp::And,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOp {
    /// Equals (=)
    Eq,
    /// Contains (:)
    Contains,
    /// Does not equal (≠)
    Neq,
    /// Greater than (>)
    Gt,
    /// Greater than or equals (≥)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equals (≤)
    Lte,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 7] = [
        ComparisonOp::Eq,
        ComparisonOp::Contains,
        ComparisonOp::Neq,
        ComparisonOp::Gt,
        ComparisonOp::Gte,
        ComparisonOp::Lt,
        ComparisonOp::Lte,
    ];

    /// Wire name used by the backend
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "eq",
            ComparisonOp::Contains => "contains",
            ComparisonOp::Neq => "neq",
            ComparisonOp::Gt => "gt",
            ComparisonOp::Gte => "gte",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Lte => "lte",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "equals",
            ComparisonOp::Contains => "contains",
            ComparisonOp::Neq => "does not equal",
            ComparisonOp::Gt => "is greater than",
            ComparisonOp::Gte => "is greater than or equals",
            ComparisonOp::Lt => "is less than",
            ComparisonOp::Lte => "is less than or equals",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Contains => ":",
            ComparisonOp::Neq => "≠",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => "≥",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "≤",
        }
    }
}

impl FromStr for ComparisonOp {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComparisonOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| QueryError::UnknownOperator(s.to_string()))
    }
}

/// AND/OR group of child filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanNode {
    pub id: NodeId,
    pub op: BoolOp,
    /// Never empty once an operation has completed
    pub children: Arc<[Query]>,
}

impl BooleanNode {
    /// Create a group with a fresh id
    pub fn new(op: BoolOp, children: Vec<Query>) -> Self {
        Self {
            id: NodeId::next(),
            op,
            children: children.into(),
        }
    }

    /// Same id and operator, different children
    pub fn with_children(&self, children: Vec<Query>) -> Self {
        Self {
            id: self.id.clone(),
            op: self.op,
            children: children.into(),
        }
    }

    /// Same id and operator with the child at `index` swapped out
    pub fn with_child(&self, index: usize, child: Query) -> Self {
        let mut children = self.children.to_vec();
        children[index] = child;
        self.with_children(children)
    }

    /// Same id and children, different operator. The children slice is shared.
    pub fn with_op(&self, op: BoolOp) -> Self {
        Self {
            id: self.id.clone(),
            op,
            children: Arc::clone(&self.children),
        }
    }
}

/// Single field/operator/value comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueNode {
    pub id: NodeId,
    pub key: String,
    pub op: ComparisonOp,
    pub value: String,
}

impl ValueNode {
    /// Create a leaf with a fresh id
    pub fn new(key: impl Into<String>, op: ComparisonOp, value: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            key: key.into(),
            op,
            value: value.into(),
        }
    }
}

/// Node of a query tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    Boolean(BooleanNode),
    Value(ValueNode),
}

impl QueryNode {
    #[inline]
    pub fn id(&self) -> &NodeId {
        match self {
            QueryNode::Boolean(group) => &group.id,
            QueryNode::Value(leaf) => &leaf.id,
        }
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, QueryNode::Boolean(_))
    }

    /// Operator of a group, `None` for a leaf
    #[inline]
    pub fn bool_op(&self) -> Option<BoolOp> {
        match self {
            QueryNode::Boolean(group) => Some(group.op),
            QueryNode::Value(_) => None,
        }
    }

    /// Children of a group, empty for a leaf
    #[inline]
    pub fn children(&self) -> &[Query] {
        match self {
            QueryNode::Boolean(group) => &group.children,
            QueryNode::Value(_) => &[],
        }
    }

    #[inline]
    pub fn as_value(&self) -> Option<&ValueNode> {
        match self {
            QueryNode::Value(leaf) => Some(leaf),
            QueryNode::Boolean(_) => None,
        }
    }

    /// Shallow copy under a new id; children are shared, not copied
    pub fn with_id(&self, id: NodeId) -> QueryNode {
        match self {
            QueryNode::Boolean(group) => QueryNode::Boolean(BooleanNode {
                id,
                op: group.op,
                children: Arc::clone(&group.children),
            }),
            QueryNode::Value(leaf) => QueryNode::Value(ValueNode {
                id,
                ..leaf.clone()
            }),
        }
    }

    /// Pre-order traversal of this node and its descendants
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: smallvec![self],
        }
    }

    /// Leaves in left-to-right order
    pub fn leaves(&self) -> impl Iterator<Item = &ValueNode> + '_ {
        self.nodes().filter_map(QueryNode::as_value)
    }

    /// Ids of this node and its descendants in pre-order
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes().map(QueryNode::id)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Whether this node or one of its descendants has the given id
    pub fn contains_id(&self, id: &NodeId) -> bool {
        self.nodes().any(|node| node.id() == id)
    }
}

impl From<BooleanNode> for QueryNode {
    fn from(group: BooleanNode) -> Self {
        QueryNode::Boolean(group)
    }
}

impl From<ValueNode> for QueryNode {
    fn from(leaf: ValueNode) -> Self {
        QueryNode::Value(leaf)
    }
}

/// Pre-order iterator over a tree
pub struct Nodes<'a> {
    stack: SmallVec<[&'a QueryNode; 16]>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a QueryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| child.as_ref()));
        Some(node)
    }
}

/// Client-side shape with ids: `{"id", "and": [...]}` or `{"id", "key", "op", "value"}`
impl Serialize for QueryNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryNode::Boolean(group) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("id", &group.id)?;
                map.serialize_entry(group.op.as_str(), &*group.children)?;
                map.end()
            }
            QueryNode::Value(leaf) => leaf.serialize(serializer),
        }
    }
}
