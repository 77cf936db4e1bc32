//! Error types for VQB

use thiserror::Error;

/// Core error type for VQB operations
#[derive(Error, Debug)]
pub enum VqbError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for VQB operations
pub type Result<T> = std::result::Result<T, VqbError>;
