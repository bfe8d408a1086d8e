//! Error types for StudyDesk.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for StudyDesk operations.
#[derive(Error, Debug)]
pub enum StudyDeskError {
    // Client errors
    #[error("{0}")]
    MissingField(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{0}")]
    NotFound(String),

    // Storage failures
    #[error("Collection file {path} is corrupt: {reason}")]
    StorageCorrupt { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Startup
    #[error("Config error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(String),
}

impl StudyDeskError {
    /// True for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidBody(_) | Self::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StudyDeskError>;
