//! Admin API client for the administered cluster.

use crate::config::ConnectionConfig;
use crate::error::{AdminError, Result};
use crate::transport::{HttpTransport, REQUEST_TIMEOUT, build_client};
use reqwest::Url;
use reqwest::blocking::RequestBuilder;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use silo_core::ClusterStatus;
use std::fmt;

/// The operations this layer needs from an administered cluster. Split out
/// as a trait so the credential resolver can be exercised against a fake.
pub trait AdminApi {
    /// Fetch the config help schema. Reports which subsystems exist.
    fn config_schema(&self) -> Result<ConfigSchema>;

    /// Read a subsystem's raw key-value configuration text.
    fn get_config(&self, subsystem: &str) -> Result<String>;

    /// Write a key-value configuration string, e.g. `hub api_key=...`.
    fn set_config(&self, kv: &str) -> Result<()>;

    /// Fetch the cluster status snapshot.
    fn status(&self) -> Result<ClusterStatus>;
}

/// Help schema for the cluster's key-value configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub keys: Vec<ConfigKeyHelp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigKeyHelp {
    pub key: String,
    #[serde(default)]
    pub description: String,
}

impl ConfigSchema {
    /// Whether a named configuration subsystem exists on this cluster.
    pub fn has_subsystem(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k.key == name)
    }
}

/// A live connection to one cluster's admin API. Built through
/// [`crate::ConnectionCache`], one instance per distinct identity.
pub struct AdminClient {
    transport: HttpTransport,
    base_url: Url,
    access_key: String,
    secret_key: String,
    user_agent: String,
    use_tls: bool,
}

impl AdminClient {
    pub(crate) fn connect(config: &ConnectionConfig, base_url: Url, use_tls: bool) -> Result<Self> {
        let client = build_client(
            use_tls,
            config.insecure,
            config.proxy_url.as_deref(),
            REQUEST_TIMEOUT,
        )?;
        Ok(Self {
            transport: HttpTransport::new(client, config.debug),
            base_url,
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
            user_agent: format!("{}/{}", config.app_name, config.app_version),
            use_tls,
        })
    }

    pub fn uses_tls(&self) -> bool {
        self.use_tls
    }

    pub fn endpoint(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AdminError::InvalidEndpoint {
                endpoint: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    fn send(&self, request: RequestBuilder) -> Result<String> {
        let request = request
            .basic_auth(&self.access_key, Some(&self.secret_key))
            .header(USER_AGENT, &self.user_agent)
            .build()?;
        let response = self.transport.execute(request)?;
        let status = response.status();
        let body = response.text().unwrap_or_default();
        if !status.is_success() {
            return Err(AdminError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let body = self.send(self.transport.client().get(url))?;
        serde_json::from_str(&body).map_err(|e| AdminError::Shape(e.to_string()))
    }
}

// The secret key must never leak through diagnostics.
impl fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminClient")
            .field("base_url", &self.base_url.as_str())
            .field("access_key", &self.access_key)
            .field("use_tls", &self.use_tls)
            .finish_non_exhaustive()
    }
}

impl AdminApi for AdminClient {
    fn config_schema(&self) -> Result<ConfigSchema> {
        self.get_json("/v1/admin/config/schema")
    }

    fn get_config(&self, subsystem: &str) -> Result<String> {
        let url = self.url(&format!("/v1/admin/config/{subsystem}"))?;
        self.send(self.transport.client().get(url))
    }

    fn set_config(&self, kv: &str) -> Result<()> {
        let url = self.url("/v1/admin/config")?;
        self.send(self.transport.client().put(url).body(kv.to_string()))?;
        Ok(())
    }

    fn status(&self) -> Result<ClusterStatus> {
        self.get_json("/v1/admin/status")
    }
}
