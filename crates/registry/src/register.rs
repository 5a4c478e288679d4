//! Cluster registration submission.

use crate::error::Result;
use crate::http::RegistryHttp;
use crate::resolver::Authorization;
use serde::Serialize;
use serde_json::Value;
use silo_core::{ClusterRegistrationInfo, encode_registration_token};

#[derive(Serialize)]
struct RegistrationRequest {
    token: String,
}

/// Submit a registration token to the already-authorized register URL and
/// return the raw response body.
pub fn register_cluster(
    http: &RegistryHttp,
    auth: &Authorization,
    info: &ClusterRegistrationInfo,
) -> Result<String> {
    let token = encode_registration_token(info)?;
    http.post_json(&auth.url, &RegistrationRequest { token }, &auth.headers)
}

/// Pull the API key out of a registration response, if the Hub issued one.
pub fn extract_api_key(response: &str) -> Option<String> {
    let value: Value = serde_json::from_str(response).ok()?;
    value["api_key"]
        .as_str()
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}
