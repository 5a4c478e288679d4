//! Hub registry integration for the Silo administration toolkit.
//!
//! Covers the credential-resolution chain (cluster config, local config,
//! interactive login), the interactive login flow itself (with MFA and
//! multi-organization disambiguation), and the registration submission.

pub mod endpoints;
pub mod error;
pub mod http;
pub mod login;
pub mod prompt;
pub mod register;
pub mod resolver;

pub use endpoints::{
    DEVELOPMENT_BASE_URL, Endpoints, PRODUCTION_BASE_URL, SUBSCRIPTION_URL,
};
pub use error::{RegistryError, Result};
pub use http::{RESPONSE_BODY_LIMIT, RegistryHttp, auth_headers};
pub use login::{LoginFlow, Organization};
pub use prompt::{Prompt, TerminalPrompt};
pub use register::{extract_api_key, register_cluster};
pub use resolver::{
    API_KEY_CONFIG_KEY, Authorization, CONFIG_SUBSYSTEM, CredentialKind, LICENSE_CONFIG_KEY,
    StoredCredentials, authorize_url, cluster_config_value, cluster_supports_hub,
    resolve_credential,
};
