//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid registration token: {0}")]
    InvalidToken(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
