//! Query tree model and edits
//!
//! This module holds the recursive AND/OR filter tree, the pure functions
//! that edit it, and its conversions to the backend format and to text.

mod ast;
pub mod backend;
pub mod display;
pub mod filter;
mod id;
pub mod tree;

#[cfg(test)]
mod property_tests;

pub use ast::*;
pub use backend::{from_backend, from_json, to_backend, to_json, BackendQuery};
pub use display::describe;
pub use filter::new_filter;
pub use id::NodeId;
pub use tree::*;
