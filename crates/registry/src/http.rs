//! Generic authenticated request layer for the Hub.

use crate::error::{RegistryError, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use silo_admin::REQUEST_TIMEOUT;
use std::io::Read;

/// Response bodies are capped at 1 MiB; bytes beyond the cap are discarded
/// without error.
pub const RESPONSE_BODY_LIMIT: u64 = 1 << 20;

/// Bearer-token headers for authenticated Hub calls.
pub fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| RegistryError::MalformedToken(e.to_string()))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Synchronous HTTP client for the Hub. One optional outbound proxy applies
/// to every request made through it.
pub struct RegistryHttp {
    client: Client,
}

impl RegistryHttp {
    pub fn new(proxy_url: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy) = proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn get(&self, url: &str, headers: &HeaderMap) -> Result<String> {
        self.dispatch(self.client.get(url), headers)
    }

    pub fn post_json<T: Serialize>(
        &self,
        url: &str,
        payload: &T,
        headers: &HeaderMap,
    ) -> Result<String> {
        self.dispatch(self.client.post(url).json(payload), headers)
    }

    /// Fail fast when the Hub is unreachable: HEAD the URL and require a
    /// plain 200.
    pub fn check_reachable(&self, url: &str) -> Result<()> {
        let response = self.client.head(url).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(RegistryError::Http {
                status: status.as_u16(),
                body: status.to_string(),
            });
        }
        Ok(())
    }

    fn dispatch(&self, builder: RequestBuilder, headers: &HeaderMap) -> Result<String> {
        let mut request = builder.headers(headers.clone()).build()?;
        if !request.headers().contains_key(CONTENT_TYPE) {
            request
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        tracing::debug!(method = %request.method(), url = %request.url(), "hub request");
        let response = self.client.execute(request)?;
        let status = response.status();
        let body = read_capped(response, RESPONSE_BODY_LIMIT)?;

        if status == StatusCode::OK {
            return Ok(body);
        }
        Err(RegistryError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

fn read_capped(response: Response, limit: u64) -> Result<String> {
    let mut buf = Vec::new();
    response.take(limit).read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
