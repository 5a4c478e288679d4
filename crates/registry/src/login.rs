//! Interactive login against the Hub: username/password, optional one-time
//! code, and account disambiguation.

use crate::endpoints::Endpoints;
use crate::error::{RegistryError, Result};
use crate::http::{RegistryHttp, auth_headers};
use crate::prompt::Prompt;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct MfaLoginRequest<'a> {
    username: &'a str,
    otp: &'a str,
    token: &'a str,
}

/// One organization membership returned by the Hub.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub company: String,
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// Sequential, blocking login flow. Every network call goes through the
/// capped request layer; every terminal interaction goes through [`Prompt`].
pub struct LoginFlow<'a> {
    http: &'a RegistryHttp,
    endpoints: &'a Endpoints,
}

impl<'a> LoginFlow<'a> {
    pub fn new(http: &'a RegistryHttp, endpoints: &'a Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Prompt for credentials, complete an MFA challenge when the Hub asks
    /// for one, and return the bearer access token.
    pub fn login(&self, prompt: &mut dyn Prompt) -> Result<String> {
        let username = prompt.read_line("Hub username: ")?;
        let username = username.trim();
        if username.is_empty() {
            return Err(RegistryError::EmptyUsername);
        }
        let password = prompt.read_secret("Password: ")?;

        let body = self.http.post_json(
            &self.endpoints.login_url(),
            &LoginRequest {
                username,
                password: &password,
            },
            &HeaderMap::new(),
        )?;
        let mut response: Value = serde_json::from_str(&body)?;

        if response["mfa_required"].as_bool().unwrap_or(false) {
            let mfa_token = response["mfa_token"].as_str().unwrap_or_default().to_string();
            let otp = prompt.read_secret("One-time code received in email: ")?;
            let body = self.http.post_json(
                &self.endpoints.mfa_login_url(),
                &MfaLoginRequest {
                    username,
                    otp: &otp,
                    token: &mfa_token,
                },
                &HeaderMap::new(),
            )?;
            response = serde_json::from_str(&body)?;
        }

        match response.pointer("/token_info/access_token").and_then(Value::as_str) {
            Some(token) => Ok(token.to_string()),
            None => Err(RegistryError::TokenMissing),
        }
    }

    /// Resolve the account ID for subsequent authenticated calls. Exactly
    /// one organization is selected implicitly; several require a 1-based
    /// choice; none at all is fatal.
    pub fn account_id(&self, prompt: &mut dyn Prompt, token: &str) -> Result<String> {
        let body = self
            .http
            .get(&self.endpoints.organizations_url(), &auth_headers(token)?)?;
        let orgs: Vec<Organization> = serde_json::from_str(&body)?;

        match orgs.as_slice() {
            [] => Err(RegistryError::NoOrganization),
            [only] => Ok(only.account_id.clone()),
            many => {
                prompt.say("You are part of multiple organizations on the Hub:")?;
                for (idx, org) in many.iter().enumerate() {
                    prompt.say(&format!("  {}: {}", idx + 1, org.company))?;
                }
                let choice = prompt.read_line("Choose the organization for this cluster: ")?;
                let index: usize = choice
                    .trim()
                    .parse()
                    .map_err(|_| RegistryError::InvalidSelection(choice.clone()))?;
                if index == 0 || index > many.len() {
                    return Err(RegistryError::InvalidSelection(choice));
                }
                Ok(many[index - 1].account_id.clone())
            }
        }
    }
}
