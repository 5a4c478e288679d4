//! Error types for Hub integration.

use thiserror::Error;

/// Hub integration error type.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(
        "username cannot be empty; if you don't have an account, create one at {}",
        crate::endpoints::SUBSCRIPTION_URL
    )]
    EmptyUsername,

    #[error("access token not found in response")]
    TokenMissing,

    #[error("access token cannot be sent as a header: {0}")]
    MalformedToken(String),

    #[error("no organization is associated with this account")]
    NoOrganization,

    #[error("invalid choice of organization '{0}'; please run the command again")]
    InvalidSelection(String),

    #[error("request failed with code {status}: {body}")]
    Http { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed registry response: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Admin(#[from] silo_admin::AdminError),

    #[error(transparent)]
    Core(#[from] silo_core::Error),

    #[error("terminal input error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Hub operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
