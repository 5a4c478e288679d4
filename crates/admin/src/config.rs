//! Connection parameters for one administered cluster.

/// Everything needed to build an admin connection. Created per call from
/// alias resolution; never persisted.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Cluster admin endpoint, e.g. `https://cluster.example.com:9000`.
    pub endpoint_url: String,
    pub access_key: String,
    pub secret_key: String,
    /// Skip TLS certificate verification. Operator opt-in only.
    pub insecure: bool,
    /// Optional outbound proxy for admin requests.
    pub proxy_url: Option<String>,
    /// Log every request and response through the transport.
    pub debug: bool,
    pub app_name: String,
    pub app_version: String,
}

impl ConnectionConfig {
    pub fn new(endpoint_url: &str, access_key: &str, secret_key: &str) -> Self {
        Self {
            endpoint_url: endpoint_url.to_string(),
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            insecure: false,
            proxy_url: None,
            debug: false,
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
