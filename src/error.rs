//! Error types for flying-shuttle
//!
//! All modules use `ShuttleResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shuttle operations
pub type ShuttleResult<T> = Result<T, ShuttleError>;

/// All errors that can occur while fingerprinting or storing a shuttle
#[derive(Error, Debug)]
pub enum ShuttleError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid tool version {version:?}: {reason}")]
    InvalidToolVersion { version: String, reason: String },

    // Snapshot errors
    #[error("Failed to parse route manifest {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ShuttleError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::PathNotFound(_) => Some("Run a full build first so the dist directory exists"),
            Self::ConfigNotFound(_) => Some("Pass --config <FILE> or create ./shuttle.toml"),
            Self::ManifestParse { .. } => {
                Some("The build output looks corrupt; rerun a full, non-incremental build")
            }
            Self::InvalidToolVersion { .. } => Some("Use a semantic version such as 14.2.0"),
            _ => None,
        }
    }
}
