//! Comparison operator vocabulary

use serde::{Deserialize, Serialize};

use crate::query::ComparisonOp;

/// Comparison operator offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorConfig {
    pub name: ComparisonOp,
    pub label: String,
    /// Short form used when a filter is rendered, e.g. "≠"
    pub symbol: String,
}

impl From<ComparisonOp> for OperatorConfig {
    fn from(op: ComparisonOp) -> Self {
        Self {
            name: op,
            label: op.label().to_string(),
            symbol: op.symbol().to_string(),
        }
    }
}

pub(crate) fn default_operators() -> Vec<OperatorConfig> {
    ComparisonOp::ALL.into_iter().map(OperatorConfig::from).collect()
}
