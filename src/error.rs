//! Error types for the advanced search core engine

use thiserror::Error;

/// Main error type for the advanced search core engine
///
/// Tree operations never fail; a node id that is not in the tree is a no-op.
/// These variants cover input that arrives from outside the tree: filter
/// values typed by a user, vocabulary configuration and backend JSON.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(feature = "python")]
impl From<QueryError> for pyo3::PyErr {
    fn from(err: QueryError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyValueError};

        match err {
            QueryError::UnknownField(name) => {
                PyKeyError::new_err(format!("Unknown field: {}", name))
            }
            QueryError::UnknownOperator(name) => {
                PyKeyError::new_err(format!("Unknown operator: {}", name))
            }
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// Result type alias for the advanced search core engine
pub type Result<T> = std::result::Result<T, QueryError>;
