//! Interactive query editing
//!
//! A [`QueryEditor`] owns one query tree and the node the user selected as
//! the insertion point, and applies [`EditorAction`]s to them. An
//! [`EditorRegistry`] keeps one editor per named builder.

mod action;
mod registry;
mod session;


pub use action::EditorAction;
pub use registry::EditorRegistry;
pub use session::{EditorSnapshot, QueryEditor};
