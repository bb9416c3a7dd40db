//! Python bindings
//!
//! Exposes the editor to a Python host as the `advanced_search_core`
//! extension module.

use pyo3::prelude::*;

use crate::config::{self, QueryConfig};
use crate::editor::QueryEditor;
use crate::query::NodeId;
use crate::search::SearchParams;

// ============================================================================
// Python Functions
// ============================================================================

/// Install the query builder vocabulary (call once at startup)
///
/// # Arguments
/// * `config_json` - JSON object with optional `fields`, `operators`,
///   `value_separator` and `default_operator` keys
///
/// Editors created afterwards use this configuration. Calling it again
/// replaces the previous one.
#[pyfunction]
fn init_config(config_json: &str) -> PyResult<()> {
    let config = QueryConfig::from_json(config_json)?;
    config::install(config);
    Ok(())
}

/// Check if config is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    config::is_installed()
}

/// Build the catalog search URL for `library`
#[pyfunction]
#[pyo3(signature = (library, terms, entry_point=None, sort=None, language=None))]
fn search_url(
    library: &str,
    terms: &str,
    entry_point: Option<String>,
    sort: Option<String>,
    language: Option<String>,
) -> String {
    let mut params = SearchParams::new(terms);
    if let Some(entry_point) = entry_point {
        params.entry_point = entry_point;
    }
    params.sort = sort;
    if language.is_some() {
        params.language = language;
    }
    params.search_url(library)
}

// ============================================================================
// QueryEditor class
// ============================================================================

/// Query under construction, seen from Python
#[pyclass(name = "QueryEditor")]
pub struct PyQueryEditor {
    inner: QueryEditor,
}

#[pymethods]
impl PyQueryEditor {
    #[new]
    fn new() -> Self {
        Self {
            inner: QueryEditor::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Getter Properties
    // ------------------------------------------------------------------------

    /// Id of the node new filters attach to, or None
    #[getter]
    fn selected_id(&self) -> Option<String> {
        self.inner.selected_id().map(|id| id.as_str().to_string())
    }

    #[getter]
    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    /// Add a filter at the insertion point and return its node id
    ///
    /// # Raises
    /// KeyError for a field or operator outside the vocabulary,
    /// ValueError for an empty value
    fn add_filter(&mut self, key: &str, op: &str, value: &str) -> PyResult<String> {
        let id = self.inner.add_filter(key, op, value)?;
        Ok(id.as_str().to_string())
    }

    fn remove(&mut self, id: &str) {
        self.inner.remove(&NodeId::from(id));
    }

    fn select(&mut self, id: &str) {
        self.inner.select(&NodeId::from(id));
    }

    fn deselect(&mut self) {
        self.inner.deselect();
    }

    fn move_node(&mut self, source: &str, target: &str) {
        self.inner
            .move_node(&NodeId::from(source), &NodeId::from(target));
    }

    /// Toggle a group between "and" and "or"
    fn flip(&mut self, id: &str) {
        self.inner.flip(&NodeId::from(id));
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    /// Backend JSON without ids, or None when empty
    fn to_json(&self) -> PyResult<Option<String>> {
        Ok(self.inner.to_json()?)
    }

    /// JSON with node ids, or None when empty
    fn tree_json(&self) -> PyResult<Option<String>> {
        Ok(self.inner.tree_json()?)
    }

    /// Replace the query with backend JSON; clears the selection
    fn load_json(&mut self, json: &str) -> PyResult<()> {
        Ok(self.inner.load_json(json)?)
    }

    fn describe(&self) -> Option<String> {
        self.inner.describe()
    }

    fn __repr__(&self) -> String {
        match self.inner.describe() {
            Some(text) => format!("QueryEditor({})", text),
            None => "QueryEditor(<empty>)".to_string(),
        }
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn advanced_search_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(search_url, m)?)?;
    m.add_class::<PyQueryEditor>()?;
    Ok(())
}
