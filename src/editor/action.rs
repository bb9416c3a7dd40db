//! Gestures forwarded by the presentation layer

use crate::query::{NodeId, Query};

/// One user gesture on a query builder
#[derive(Debug, Clone)]
pub enum EditorAction {
    /// A new leaf (or OR group of leaves) from the filter input
    Add(Query),
    /// A subtree edited in place, matched by its id
    Change(Query),
    /// Drag-and-drop of `source` onto `target`
    Move { source: NodeId, target: NodeId },
    Remove(NodeId),
    Select(NodeId),
    Deselect,
    /// Toggle a group between "All" and "Any"
    Flip(NodeId),
    /// Discard the whole query
    Reset,
}
