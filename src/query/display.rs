//! Human-readable rendering of a query
//!
//! `title : dogs and (author = Smith or author = Jones)`

use std::fmt::{self, Write};

use crate::config::QueryConfig;
use crate::query::ast::{ComparisonOp, QueryNode};

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self, &|op| op.symbol(), false)
    }
}

/// Node rendered with the operator symbols of a configuration
struct Described<'a> {
    node: &'a QueryNode,
    config: &'a QueryConfig,
}

impl fmt::Display for Described<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(f, self.node, &|op| self.config.symbol(op), false)
    }
}

/// Render with the operator symbols of `config`
pub fn describe(node: &QueryNode, config: &QueryConfig) -> String {
    Described { node, config }.to_string()
}

fn render<'a, W: Write>(
    out: &mut W,
    node: &QueryNode,
    symbol: &dyn Fn(ComparisonOp) -> &'a str,
    nested: bool,
) -> fmt::Result {
    match node {
        QueryNode::Value(leaf) => write!(out, "{} {} {}", leaf.key, symbol(leaf.op), leaf.value),
        QueryNode::Boolean(group) => {
            if nested {
                out.write_char('(')?;
            }
            for (index, child) in group.children.iter().enumerate() {
                if index > 0 {
                    write!(out, " {} ", group.op)?;
                }
                render(out, child, symbol, true)?;
            }
            if nested {
                out.write_char(')')?;
            }
            Ok(())
        }
    }
}
