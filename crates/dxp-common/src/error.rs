//! Error types for DXP

use thiserror::Error;

/// Result type alias for DXP operations
pub type Result<T> = std::result::Result<T, DxpError>;

/// Main error type for DXP
#[derive(Error, Debug)]
pub enum DxpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Pending-file source error: {0}")]
    Source(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Worker invocation error: {0}")]
    Worker(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
