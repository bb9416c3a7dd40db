//! QueryEditor - one query under construction plus its insertion point

use std::sync::Arc;

use crate::config::{self, QueryConfig};
use crate::editor::action::EditorAction;
use crate::error::Result;
use crate::query::{
    add_descendant_with_outcome, describe, find_descendant, flip_operator, from_backend,
    move_descendant, remove_descendant, replace_descendant, set_operator, BackendQuery, BoolOp,
    BooleanNode, NodeId, Query,
};

/// Immutable view of an editor, cheap to clone and keep for undo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSnapshot {
    pub query: Option<Query>,
    pub selected: Option<NodeId>,
}

/// Query tree being edited and the node new filters attach to
///
/// Selection rules:
/// - the first filter of an empty query becomes the selection, unless it is
///   an OR group, so that the next filter is ANDed with it;
/// - adding with nothing selected wraps the query and the new filter in a new
///   top-level AND group, which becomes the selection;
/// - adding to a selected leaf promotes it to a group, which becomes the
///   selection;
/// - removal and moves update the selection as described in
///   [`crate::query::remove_descendant`] and [`crate::query::move_descendant`].
///
/// Ids that are not in the query are ignored.
#[derive(Debug, Clone)]
pub struct QueryEditor {
    query: Option<Query>,
    selected: Option<NodeId>,
    config: Arc<QueryConfig>,
}

impl Default for QueryEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEditor {
    /// Create an empty editor using the active configuration
    pub fn new() -> Self {
        Self::with_config(config::current())
    }

    pub fn with_config(config: Arc<QueryConfig>) -> Self {
        Self {
            query: None,
            selected: None,
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none()
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            query: self.query.clone(),
            selected: self.selected.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: EditorSnapshot) {
        self.query = snapshot.query;
        self.selected = snapshot.selected;
    }

    /// Apply one gesture from the presentation layer
    pub fn apply(&mut self, action: EditorAction) {
        match action {
            EditorAction::Add(node) => self.add(node),
            EditorAction::Change(node) => self.change(node),
            EditorAction::Move { source, target } => self.move_node(&source, &target),
            EditorAction::Remove(id) => self.remove(&id),
            EditorAction::Select(id) => self.select(&id),
            EditorAction::Deselect => self.deselect(),
            EditorAction::Flip(id) => self.flip(&id),
            EditorAction::Reset => self.reset(),
        }
    }

    /// Attach a new node at the insertion point
    pub fn add(&mut self, node: Query) {
        let Some(current) = self.query.as_ref() else {
            self.selected = match node.bool_op() {
                Some(BoolOp::Or) => None,
                _ => Some(node.id().clone()),
            };
            self.query = Some(node);
            return;
        };

        match self.selected.clone() {
            None => {
                let group = BooleanNode::new(BoolOp::And, vec![Arc::clone(current), node]);
                self.selected = Some(group.id.clone());
                self.query = Some(Arc::new(group.into()));
            }
            Some(target) => {
                let addition = add_descendant_with_outcome(
                    Some(current),
                    &target,
                    node,
                    self.config.default_operator,
                );
                if Arc::ptr_eq(&addition.tree, current) {
                    tracing::debug!(id = %target, "selected node not in query, add ignored");
                    return;
                }
                if let Some(group_id) = addition.promoted {
                    self.selected = Some(group_id);
                }
                self.query = Some(addition.tree);
            }
        }
    }

    /// Build a filter from user input and add it; returns the new node's id
    pub fn add_filter(&mut self, key: &str, op: &str, value: &str) -> Result<NodeId> {
        let node = self.config.new_filter(key, op, value)?;
        let id = node.id().clone();
        self.add(node);
        Ok(id)
    }

    /// Replace the subtree carrying `node`'s id
    ///
    /// If the selected node disappears with the old subtree, the selection
    /// moves to the replacement.
    pub fn change(&mut self, node: Query) {
        let Some(current) = self.query.as_ref() else {
            return;
        };

        let updated = replace_descendant(current, Arc::clone(&node));
        if Arc::ptr_eq(&updated, current) {
            tracing::debug!(id = %node.id(), "changed node not in query, change ignored");
            return;
        }

        if let Some(selected) = &self.selected {
            if find_descendant(&updated, selected).is_none() {
                self.selected = Some(node.id().clone());
            }
        }
        self.query = Some(updated);
    }

    pub fn remove(&mut self, id: &NodeId) {
        let Some(current) = self.query.as_ref() else {
            return;
        };

        let edit = remove_descendant(current, id, self.selected.as_ref());
        if edit.tree.as_ref().is_some_and(|tree| Arc::ptr_eq(tree, current)) {
            tracing::debug!(id = %id, "node not in query, remove ignored");
            return;
        }

        self.query = edit.tree;
        self.selected = edit.selection;
    }

    pub fn select(&mut self, id: &NodeId) {
        match self.query.as_ref() {
            Some(query) if find_descendant(query, id).is_some() => {
                self.selected = Some(id.clone());
            }
            _ => tracing::debug!(id = %id, "node not in query, select ignored"),
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Drag-and-drop relocation of `source` under `target`
    pub fn move_node(&mut self, source: &NodeId, target: &NodeId) {
        let Some(current) = self.query.as_ref() else {
            return;
        };

        let edit = move_descendant(
            current,
            source,
            target,
            self.config.default_operator,
            self.selected.as_ref(),
        );
        if edit.tree.as_ref().is_some_and(|tree| Arc::ptr_eq(tree, current)) {
            tracing::debug!(source = %source, target = %target, "move ignored");
            return;
        }

        self.query = edit.tree;
        self.selected = edit.selection;
    }

    /// Toggle a group between AND and OR; the selection does not change
    pub fn flip(&mut self, id: &NodeId) {
        let Some(current) = self.query.as_ref() else {
            return;
        };

        let updated = flip_operator(current, id);
        if Arc::ptr_eq(&updated, current) {
            tracing::debug!(id = %id, "group not in query, flip ignored");
            return;
        }
        self.query = Some(updated);
    }

    pub fn set_operator(&mut self, id: &NodeId, op: BoolOp) {
        let Some(current) = self.query.as_ref() else {
            return;
        };

        let updated = set_operator(current, id, op);
        if Arc::ptr_eq(&updated, current) {
            tracing::debug!(id = %id, op = %op, "operator unchanged");
            return;
        }
        self.query = Some(updated);
    }

    /// Discard the query and the selection
    pub fn reset(&mut self) {
        self.query = None;
        self.selected = None;
    }

    /// Replace the query with one received from the backend
    pub fn load(&mut self, query: &BackendQuery) -> Result<()> {
        self.query = Some(from_backend(query)?);
        self.selected = None;
        Ok(())
    }

    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let query: BackendQuery = serde_json::from_str(json)?;
        self.load(&query)
    }

    /// Backend form of the query, `None` when empty
    pub fn to_backend(&self) -> Option<BackendQuery> {
        self.query.as_deref().map(BackendQuery::from)
    }

    pub fn to_json(&self) -> Result<Option<String>> {
        self.to_backend()
            .map(|query| serde_json::to_string(&query))
            .transpose()
            .map_err(Into::into)
    }

    /// Query with ids, for hosts that render the tree
    pub fn tree_json(&self) -> Result<Option<String>> {
        self.query
            .as_deref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(Into::into)
    }

    /// Human-readable form using the configured symbols
    pub fn describe(&self) -> Option<String> {
        self.query
            .as_deref()
            .map(|query| describe(query, &self.config))
    }
}
