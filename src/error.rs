//! Unified error types for gridmarks
//!
//! The reactive core never fails; errors only surface at the edges where
//! configuration is loaded or exported views are (de)serialized.

use std::path::PathBuf;

/// Unified error type for gridmarks operations
#[derive(Debug, thiserror::Error)]
pub enum GridmarksError {
    /// I/O errors (reading config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse errors
    #[error("Config error: {path} - {reason}")]
    Config { path: PathBuf, reason: String },

    /// Exported view (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type using GridmarksError
pub type Result<T> = std::result::Result<T, GridmarksError>;

impl GridmarksError {
    /// Create a Config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
