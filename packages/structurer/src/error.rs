//! Error types for the structurer.
//!
//! Only document-level failures are errors. Heuristic misses (a title that
//! cannot be found, a date pattern that does not match) degrade to sentinel
//! values and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the structurer library.
#[derive(Debug, Error)]
pub enum StructurerError {
    /// The text source could not open or read a document.
    #[error("Failed to read source document {}: {source}", .path.display())]
    SourceAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid command-line or batch input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for structurer operations.
pub type Result<T> = std::result::Result<T, StructurerError>;
