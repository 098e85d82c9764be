//! Error types for the converter.
//!
//! Every error here is raised while building a [`MappingRegistry`](crate::registry::MappingRegistry).
//! Lookups never fail: a character without a mapping simply resolves to itself.

use std::path::PathBuf;

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading mapping tables.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Table file could not be read
    #[error("Failed to read table {}: {source}", .path.display())]
    Io {
        /// Path of the table file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Pre-structured table is not valid JSON
    #[error("Failed to parse table '{table}': {source}")]
    Json {
        /// Table name
        table: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// JSON parsed, but is not an array of flat objects
    #[error("Invalid shape for table '{table}': {reason}")]
    InvalidTableShape {
        /// Table name
        table: String,
        /// What was wrong with it
        reason: String,
    },

    /// Row-oriented table declared without a column header
    #[error("Table '{table}' is row-oriented but declares no header")]
    MissingHeader {
        /// Table name
        table: String,
    },

    /// Unknown table format name
    #[error("Unsupported table format: {0}")]
    UnsupportedFormat(String),

    /// Table descriptor manifest could not be parsed
    #[error("Invalid table manifest: {0}")]
    InvalidManifest(String),
}
