//! Error types for the admin connection layer.

use thiserror::Error;

/// Admin connection layer error type.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("admin API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("unexpected admin response shape: {0}")]
    Shape(String),
}

/// Result type alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
