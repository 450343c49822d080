//! Error types for the csvlint library.
//!
//! Validation findings are never errors: they are reported as
//! [`Diagnostics`](crate::validation::Diagnostics). The variants here cover
//! failures to read data, parse documents, or build a schema.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for csvlint operations.
#[derive(Debug, Error)]
pub enum CsvlintError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no header to validate.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error for a `pattern` constraint.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// HTTP error while fetching a schema document.
    #[error("HTTP error for '{uri}': {message}")]
    Http { uri: String, message: String },

    /// A schema reference that is not a usable URI or path.
    #[error("Invalid URI '{uri}': {source}")]
    Url {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// Schema document is structurally invalid.
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for csvlint operations.
pub type Result<T> = std::result::Result<T, CsvlintError>;
