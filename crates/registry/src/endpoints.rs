//! Hub endpoint set, selectable between production and local development.

/// Production Hub host.
pub const PRODUCTION_BASE_URL: &str = "https://hub.silo.dev";

/// Local development Hub host.
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:9000";

/// Where operators without an account are sent to create one.
pub const SUBSCRIPTION_URL: &str = "https://silo.dev/subscription";

/// The set of Hub URLs used by this crate, relative to one base host.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn production() -> Self {
        Self::with_base(PRODUCTION_BASE_URL)
    }

    pub fn development() -> Self {
        Self::with_base(DEVELOPMENT_BASE_URL)
    }

    pub fn with_base(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn login_url(&self) -> String {
        format!("{}/api/auth/login", self.base)
    }

    pub fn mfa_login_url(&self) -> String {
        format!("{}/api/auth/mfa-login", self.base)
    }

    pub fn organizations_url(&self) -> String {
        format!("{}/api/auth/organizations", self.base)
    }

    pub fn register_url(&self) -> String {
        format!("{}/api/cluster/register", self.base)
    }
}
