//! HTTP transport construction for admin connections.

use crate::error::{AdminError, Result};
use reqwest::blocking::{Client, Request, Response};
use std::time::Duration;

/// Fixed connect/response deadline applied to every admin and Hub request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a blocking HTTP client for the given security settings.
///
/// TLS verification is on whenever `use_tls` is set; `insecure` disables
/// certificate verification and must only ever come from an explicit
/// operator flag. No network activity happens here.
pub fn build_client(
    use_tls: bool,
    insecure: bool,
    proxy_url: Option<&str>,
    timeout: Duration,
) -> Result<Client> {
    let mut builder = Client::builder().timeout(timeout);

    if use_tls && insecure {
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(proxy) = proxy_url {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| AdminError::InvalidEndpoint {
            endpoint: proxy.to_string(),
            reason: e.to_string(),
        })?;
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

/// A client wrapper that can trace every request/response pair.
///
/// Tracing is a decorator over execution: it never alters the request, it
/// only observes it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    trace: bool,
}

impl HttpTransport {
    pub fn new(client: Client, trace: bool) -> Self {
        Self { client, trace }
    }

    pub fn execute(&self, request: Request) -> reqwest::Result<Response> {
        if self.trace {
            tracing::debug!(method = %request.method(), url = %request.url(), "admin request");
        }
        let response = self.client.execute(request)?;
        if self.trace {
            tracing::debug!(status = %response.status(), url = %response.url(), "admin response");
        }
        Ok(response)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
