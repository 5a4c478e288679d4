//! Alias-keyed client configuration: endpoint, keys, and any stored Hub
//! credentials per cluster alias.

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub aliases: BTreeMap<String, AliasConfig>,
}

/// One configured cluster alias.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AliasConfig {
    pub url: String,
    pub access_key: String,
    pub secret_key: String,
    #[serde(default)]
    pub insecure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

pub fn config_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = std::env::var_os("SILO_CLIENT_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(path) => PathBuf::from(path),
        None => {
            let home = std::env::var_os("HOME")
                .ok_or_else(|| anyhow::anyhow!("HOME not set; set SILO_CLIENT_CONFIG"))?;
            PathBuf::from(home).join(".config")
        }
    };

    Ok(base.join("silo").join("client.toml"))
}

pub fn load_client_config(path: &Path) -> Result<ClientConfig> {
    let mut figment = Figment::new();

    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("SILO_").split("__"));

    match figment.extract() {
        Ok(config) => Ok(config),
        Err(_) if !path.exists() => Ok(ClientConfig::default()),
        Err(err) => Err(anyhow::anyhow!(err).context("failed to load client configuration")),
    }
}

pub fn save_client_config(path: &Path, config: &ClientConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;

    // Restrictive permissions: the file holds secret keys and credentials.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}
