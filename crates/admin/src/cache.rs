//! Connection cache keyed by a fingerprint of the target identity.

use crate::client::AdminClient;
use crate::config::ConnectionConfig;
use crate::error::{AdminError, Result};
use reqwest::Url;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// 32-bit FNV-1a. Fast, deterministic, non-cryptographic; used purely for
/// cache keying, so collisions are an accepted approximation.
fn fnv1a32(bytes: &[u8]) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, b| (hash ^ u32::from(*b)).wrapping_mul(PRIME))
}

/// Memoizes admin connections per distinct (host, access key, secret key)
/// identity for the lifetime of the process. Entries are never evicted; the
/// universe of identities in one invocation is bounded by operator input.
#[derive(Default)]
pub struct ConnectionCache {
    inner: Mutex<HashMap<u32, Arc<AdminClient>>>,
}

impl ConnectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached connection for this identity, or build, store, and
    /// return a new one. The whole lookup-or-insert runs under one lock so
    /// no two callers can construct two live connections for the same
    /// identity.
    pub fn get_or_create(&self, config: &ConnectionConfig) -> Result<Arc<AdminClient>> {
        let url = Url::parse(&config.endpoint_url).map_err(|e| AdminError::InvalidEndpoint {
            endpoint: config.endpoint_url.clone(),
            reason: e.to_string(),
        })?;

        // HTTPS unless the scheme is explicitly non-secure.
        let use_tls = url.scheme() != "http";
        let key = fingerprint(&url, config);

        let mut cache = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = cache.get(&key) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(AdminClient::connect(config, url, use_tls)?);
        cache.insert(key, Arc::clone(&client));
        Ok(client)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn fingerprint(url: &Url, config: &ConnectionConfig) -> u32 {
    let host = authority(url);
    let mut material = Vec::with_capacity(
        host.len() + config.access_key.len() + config.secret_key.len(),
    );
    material.extend_from_slice(host.as_bytes());
    material.extend_from_slice(config.access_key.as_bytes());
    material.extend_from_slice(config.secret_key.as_bytes());
    fnv1a32(&material)
}

fn authority(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
