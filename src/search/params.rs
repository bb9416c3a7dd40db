//! Search parameters and the catalog search URL

use serde::{Deserialize, Serialize};

/// Entry point that searches every media type; never sent to the server
pub const ALL_ENTRY_POINTS: &str = "All";

/// Parameters of a catalog search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Media type, e.g. "Book" or "Audio"
    pub entry_point: String,
    pub terms: String,
    /// Sort order; `None` keeps the server's relevance order
    pub sort: Option<String>,
    pub language: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            entry_point: ALL_ENTRY_POINTS.to_string(),
            terms: String::new(),
            sort: None,
            language: Some("all".to_string()),
        }
    }
}

impl SearchParams {
    pub fn new(terms: impl Into<String>) -> Self {
        Self {
            terms: terms.into(),
            ..Self::default()
        }
    }

    /// Path and query string of the search endpoint for `library`
    ///
    /// `/{library}/search?q=..&entrypoint=..&order=..&language=..`, where the
    /// entry point is left out when it is [`ALL_ENTRY_POINTS`] and empty sort
    /// or language values are left out.
    pub fn search_url(&self, library: &str) -> String {
        let mut url = format!("/{}/search?q={}", library, urlencoding::encode(&self.terms));

        let optional = [
            ("entrypoint", Some(self.entry_point.as_str()).filter(|e| *e != ALL_ENTRY_POINTS)),
            ("order", self.sort.as_deref()),
            ("language", self.language.as_deref()),
        ];
        for (name, value) in optional {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                url.push_str(&format!("&{}={}", name, urlencoding::encode(value)));
            }
        }

        url
    }
}
