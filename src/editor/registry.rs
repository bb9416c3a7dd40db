//! Editors keyed by builder name

use ahash::AHashMap;
use std::sync::Arc;

use crate::config::{self, QueryConfig};
use crate::editor::action::EditorAction;
use crate::editor::session::QueryEditor;
use crate::query::{NodeId, Query};

/// One [`QueryEditor`] per named builder on a page
///
/// Each builder ("advanced", "custom_list", ...) has its own query and
/// selection; an action on one never touches another. Editors are created
/// on first use with the registry's configuration.
#[derive(Debug)]
pub struct EditorRegistry {
    config: Arc<QueryConfig>,
    editors: AHashMap<String, QueryEditor>,
}

impl Default for EditorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::with_config(config::current())
    }

    pub fn with_config(config: Arc<QueryConfig>) -> Self {
        Self {
            config,
            editors: AHashMap::with_capacity(4),
        }
    }

    pub fn editor(&self, name: &str) -> Option<&QueryEditor> {
        self.editors.get(name)
    }

    /// Editor for `name`, created empty if needed
    pub fn editor_mut(&mut self, name: &str) -> &mut QueryEditor {
        let config = &self.config;
        self.editors
            .entry(name.to_string())
            .or_insert_with(|| QueryEditor::with_config(Arc::clone(config)))
    }

    pub fn dispatch(&mut self, name: &str, action: EditorAction) {
        tracing::trace!(builder = name, action = ?action, "dispatch");
        self.editor_mut(name).apply(action);
    }

    pub fn add_query(&mut self, name: &str, node: Query) {
        self.dispatch(name, EditorAction::Add(node));
    }

    pub fn update_query(&mut self, name: &str, node: Query) {
        self.dispatch(name, EditorAction::Change(node));
    }

    pub fn move_query(&mut self, name: &str, source: NodeId, target: NodeId) {
        self.dispatch(name, EditorAction::Move { source, target });
    }

    pub fn remove_query(&mut self, name: &str, id: NodeId) {
        self.dispatch(name, EditorAction::Remove(id));
    }

    pub fn select_query(&mut self, name: &str, id: Option<NodeId>) {
        let action = match id {
            Some(id) => EditorAction::Select(id),
            None => EditorAction::Deselect,
        };
        self.dispatch(name, action);
    }

    /// Names of the builders created so far, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.editors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn remove_editor(&mut self, name: &str) -> Option<QueryEditor> {
        self.editors.remove(name)
    }
}
