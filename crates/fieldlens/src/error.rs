//! Error types for the fieldlens library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fieldlens operations.
#[derive(Debug, Error)]
pub enum FieldLensError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration invariant violation (detected at load time).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for fieldlens operations.
pub type Result<T> = std::result::Result<T, FieldLensError>;
