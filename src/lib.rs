//! Advanced Search Core - Boolean search-query builder engine
//!
//! This crate holds the query tree behind a library catalog's advanced
//! search: AND/OR groups of field filters that a user builds up, rearranges
//! and trims one gesture at a time. Trees are immutable and structurally
//! shared, so every edit is cheap and every old tree stays valid.
//!
//! With the `python` feature the editor is also available to Python via PyO3.
//!
//! ```
//! use std::sync::Arc;
//! use advanced_search_core::{QueryConfig, QueryEditor};
//!
//! let mut editor = QueryEditor::with_config(Arc::new(QueryConfig::default()));
//! editor.add_filter("title", "contains", "dogs").unwrap();
//! editor.add_filter("author", "eq", "Smith").unwrap();
//! assert_eq!(editor.describe().unwrap(), "title : dogs and author = Smith");
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod query;
pub mod search;

#[cfg(feature = "python")]
mod python;

pub use config::QueryConfig;
pub use editor::{EditorAction, EditorRegistry, QueryEditor};
pub use error::{QueryError, Result};
pub use query::{BoolOp, ComparisonOp, NodeId, Query, QueryNode};
pub use search::SearchParams;
