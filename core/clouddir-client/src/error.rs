//! Directory client error types.

use thiserror::Error;

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Errors that can occur while talking to the directory service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("connection setup failed: {0}")]
    Connection(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("object already exists: {0}")]
    Conflict(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("workflow step out of order: {0}")]
    Workflow(String),

    #[error("client is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DirectoryError {
    /// Returns true if the service rejected a create because the link exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, DirectoryError::Conflict(_))
    }

    /// Returns true if an expected resource or list entry was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}
