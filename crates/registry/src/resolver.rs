//! Credential resolution across the three authoritative sources: cluster
//! config, local alias config, interactive login.

use crate::endpoints::Endpoints;
use crate::error::Result;
use crate::http::{RegistryHttp, auth_headers};
use crate::login::LoginFlow;
use crate::prompt::Prompt;
use reqwest::Url;
use reqwest::header::HeaderMap;
use silo_admin::client::AdminApi;
use silo_admin::kv;

/// Name of the cluster config subsystem that stores Hub credentials.
pub const CONFIG_SUBSYSTEM: &str = "hub";

pub const API_KEY_CONFIG_KEY: &str = "api_key";
pub const LICENSE_CONFIG_KEY: &str = "license";

/// Which credential a caller is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    ApiKey,
    License,
}

impl CredentialKind {
    pub fn config_key(self) -> &'static str {
        match self {
            CredentialKind::ApiKey => API_KEY_CONFIG_KEY,
            CredentialKind::License => LICENSE_CONFIG_KEY,
        }
    }
}

/// Hub credentials stored in the local alias record. License and API key
/// are mutually exclusive in normal use; the API key is preferred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
    pub api_key: Option<String>,
    pub license: Option<String>,
}

/// Capability probe: does this cluster expose the Hub config subsystem?
///
/// Failure to fetch the schema is fatal for the current operation; a
/// misconfigured cluster must not silently fall back to local credentials.
pub fn cluster_supports_hub(admin: &dyn AdminApi) -> Result<bool> {
    let schema = admin.config_schema()?;
    Ok(schema.has_subsystem(CONFIG_SUBSYSTEM))
}

/// Read one key from the cluster's Hub config subsystem. `Some("")` means
/// the key is present but empty, which still counts as server-held.
pub fn cluster_config_value(admin: &dyn AdminApi, key: &str) -> Result<Option<String>> {
    let raw = admin.get_config(CONFIG_SUBSYSTEM)?;
    Ok(kv::lookup(&raw, key))
}

/// Resolve a credential with strict precedence: a value held by the cluster
/// wins outright (verbatim, even when empty); otherwise the local record's
/// field is returned unconditionally. Absence is not an error.
pub fn resolve_credential(
    admin: &dyn AdminApi,
    local: &StoredCredentials,
    kind: CredentialKind,
) -> Result<Option<String>> {
    if cluster_supports_hub(admin)? {
        if let Some(value) = cluster_config_value(admin, kind.config_key())? {
            tracing::debug!(key = kind.config_key(), "credential resolved from cluster config");
            return Ok(Some(value));
        }
    }
    Ok(match kind {
        CredentialKind::ApiKey => local.api_key.clone(),
        CredentialKind::License => local.license.clone(),
    })
}

/// A Hub URL with whatever authentication it needs attached.
#[derive(Debug)]
pub struct Authorization {
    pub url: String,
    pub headers: HeaderMap,
}

/// Attach authentication to `url` using exactly one of three mutually
/// exclusive strategies, in order: API key query parameter; license query
/// parameter; interactive login yielding a bearer header plus an account-ID
/// parameter.
pub fn authorize_url(
    http: &RegistryHttp,
    endpoints: &Endpoints,
    prompt: &mut dyn Prompt,
    url: &str,
    api_key: Option<String>,
    license: Option<String>,
) -> Result<Authorization> {
    let api_key = api_key.filter(|v| !v.is_empty());
    let license = license.filter(|v| !v.is_empty());

    if let Some(api_key) = api_key {
        return Ok(Authorization {
            url: with_query_param(url, "api_key", &api_key)?,
            headers: HeaderMap::new(),
        });
    }
    if let Some(license) = license {
        return Ok(Authorization {
            url: with_query_param(url, "license", &license)?,
            headers: HeaderMap::new(),
        });
    }

    // No stored credential anywhere: ask the operator to log in.
    let flow = LoginFlow::new(http, endpoints);
    let token = flow.login(prompt)?;
    let account_id = flow.account_id(prompt, &token)?;
    Ok(Authorization {
        url: with_query_param(url, "aid", &account_id)?,
        headers: auth_headers(&token)?,
    })
}

fn with_query_param(url: &str, name: &str, value: &str) -> Result<String> {
    let mut url = Url::parse(url).map_err(|e| silo_admin::AdminError::InvalidEndpoint {
        endpoint: url.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair(name, value);
    Ok(url.into())
}
