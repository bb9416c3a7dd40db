//! Conversion to and from the backend query format
//!
//! The backend takes nested JSON: `{"and": [...]}` / `{"or": [...]}` for
//! groups and `{"key", "op", "value"}` for leaves. Node ids are a client-side
//! concern and never leave the process.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{QueryError, Result};
use crate::query::ast::{BoolOp, BooleanNode, ComparisonOp, Query, QueryNode, ValueNode};

/// Query in the backend wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackendQuery {
    And { and: Vec<BackendQuery> },
    Or { or: Vec<BackendQuery> },
    Value {
        key: String,
        op: ComparisonOp,
        value: String,
    },
}

impl From<&QueryNode> for BackendQuery {
    fn from(node: &QueryNode) -> Self {
        to_backend(node)
    }
}

/// Strip ids and convert to the backend shape
pub fn to_backend(node: &QueryNode) -> BackendQuery {
    match node {
        QueryNode::Boolean(group) => {
            let children = group
                .children
                .iter()
                .map(|child| to_backend(child))
                .collect();
            match group.op {
                BoolOp::And => BackendQuery::And { and: children },
                BoolOp::Or => BackendQuery::Or { or: children },
            }
        }
        QueryNode::Value(leaf) => BackendQuery::Value {
            key: leaf.key.clone(),
            op: leaf.op,
            value: leaf.value.clone(),
        },
    }
}

/// Build a tree from the backend shape, assigning fresh ids
pub fn from_backend(query: &BackendQuery) -> Result<Query> {
    let (op, children) = match query {
        BackendQuery::Value { key, op, value } => {
            return Ok(Arc::new(ValueNode::new(key.as_str(), *op, value.as_str()).into()));
        }
        BackendQuery::And { and } => (BoolOp::And, and),
        BackendQuery::Or { or } => (BoolOp::Or, or),
    };

    if children.is_empty() {
        return Err(QueryError::InvalidQuery(format!(
            "Empty {} group",
            op.as_str()
        )));
    }

    let children = children
        .iter()
        .map(from_backend)
        .collect::<Result<Vec<_>>>()?;
    Ok(Arc::new(BooleanNode::new(op, children).into()))
}

/// Serialize a tree to backend JSON
pub fn to_json(node: &QueryNode) -> Result<String> {
    Ok(serde_json::to_string(&to_backend(node))?)
}

/// Parse backend JSON into a tree with fresh ids
pub fn from_json(json: &str) -> Result<Query> {
    let query: BackendQuery = serde_json::from_str(json)?;
    from_backend(&query)
}
