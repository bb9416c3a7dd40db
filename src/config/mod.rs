//! Configuration module for the query builder vocabulary
//!
//! Fields and operators are data handed in by the host, usually as JSON.
//! The tree algorithms never look at them; only filter construction and
//! rendering do.

mod active;
mod field;
mod operator;

pub use active::*;
pub use field::*;
pub use operator::*;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::query::{new_filter, BoolOp, ComparisonOp, Query};

/// Query builder configuration
///
/// Every key is optional in JSON; missing vocabularies fall back to the
/// catalog defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldConfig>,
    #[serde(default = "default_operators")]
    pub operators: Vec<OperatorConfig>,
    /// Token that splits one typed value into an OR of several filters
    #[serde(default)]
    pub value_separator: Option<String>,
    /// Operator of a group created when a filter is added to a selected leaf
    #[serde(default)]
    pub default_operator: BoolOp,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            operators: default_operators(),
            value_separator: None,
            default_operator: BoolOp::And,
        }
    }
}

impl QueryConfig {
    /// Load a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn operator(&self, op: ComparisonOp) -> Option<&OperatorConfig> {
        self.operators.iter().find(|operator| operator.name == op)
    }

    /// Resolve an operator name offered by this configuration
    pub fn operator_named(&self, name: &str) -> Result<ComparisonOp> {
        let op: ComparisonOp = name.parse()?;
        self.operator(op)
            .map(|operator| operator.name)
            .ok_or_else(|| QueryError::UnknownOperator(name.to_string()))
    }

    /// Configured symbol, falling back to the built-in one
    pub fn symbol(&self, op: ComparisonOp) -> &str {
        self.operator(op)
            .map(|operator| operator.symbol.as_str())
            .unwrap_or_else(|| op.symbol())
    }

    /// Build a filter node after checking `key` and `op` against the vocabulary
    pub fn new_filter(&self, key: &str, op: &str, value: &str) -> Result<Query> {
        let key = key.trim();
        if self.field(key).is_none() {
            return Err(QueryError::UnknownField(key.to_string()));
        }
        let op = self.operator_named(op.trim())?;
        new_filter(key, op, value, self.value_separator.as_deref())
    }
}
