//! # Error Types
//!
//! Structured error handling for filter validation and query compilation,
//! using thiserror for typed errors instead of `Box<dyn Error>` patterns.

use thiserror::Error;

use crate::filters::FilterKind;

/// Errors surfaced by filter registration and query compilation
#[derive(Error, Debug)]
pub enum ListerError {
    #[error("Field {field} must be set for a {kind} filter to work")]
    MissingFilterField {
        field: &'static str,
        kind: FilterKind,
    },

    #[error("Cannot sort by unknown field: {field}")]
    UnknownSortField { field: String },

    #[error("Database query error: {message}")]
    Database { message: String },

    #[error("Row hydration error: {message}")]
    Hydration { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl From<sqlx::Error> for ListerError {
    fn from(error: sqlx::Error) -> Self {
        Self::Database {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ListerError {
    fn from(error: serde_json::Error) -> Self {
        Self::Hydration {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ListerError>;
