//! Searchable field vocabulary

use serde::{Deserialize, Serialize};

/// Field a filter can compare against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Key sent to the backend
    pub name: String,
    /// Text shown to the user
    pub label: String,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

pub(crate) fn default_fields() -> Vec<FieldConfig> {
    [
        ("genre", "Genre"),
        ("language", "Language"),
        ("audience", "Audience"),
        ("author", "Author"),
        ("title", "Title"),
    ]
    .into_iter()
    .map(|(name, label)| FieldConfig::new(name, label))
    .collect()
}
