//! Leaf filter construction

use std::sync::Arc;

use crate::error::{QueryError, Result};
use crate::query::ast::{BoolOp, BooleanNode, ComparisonOp, Query, ValueNode};

/// Build the node for a filter typed by the user
///
/// The value is trimmed. With a `separator`, a value such as
/// `"dogs or cats"` (separator `" or "`) becomes an OR group of one leaf per
/// segment sharing `key` and `op`; a single segment stays a plain leaf.
pub fn new_filter(
    key: &str,
    op: ComparisonOp,
    value: &str,
    separator: Option<&str>,
) -> Result<Query> {
    let key = key.trim();
    if key.is_empty() {
        return Err(QueryError::InvalidFilter("Empty field".to_string()));
    }

    let value = value.trim();
    if value.is_empty() {
        return Err(QueryError::InvalidFilter(format!(
            "Empty value for field: {}",
            key
        )));
    }

    let segments: Vec<&str> = match separator.filter(|sep| !sep.is_empty()) {
        Some(sep) => value
            .split(sep)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect(),
        None => vec![value],
    };

    let leaf = |value: &str| -> Query { Arc::new(ValueNode::new(key, op, value).into()) };

    Ok(match segments.as_slice() {
        [] => leaf(value),
        [single] => leaf(*single),
        many => Arc::new(
            BooleanNode::new(BoolOp::Or, many.iter().map(|segment| leaf(*segment)).collect())
                .into(),
        ),
    })
}
