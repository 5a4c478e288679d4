mod common;

use common::ScriptedPrompt;
use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;
use silo_admin::client::{AdminApi, ConfigKeyHelp, ConfigSchema};
use silo_admin::{AdminError, Result as AdminResult};
use silo_core::{ClusterStatus, CountStat, UsageStats};
use silo_registry::{
    CredentialKind, Endpoints, RegistryError, RegistryHttp, StoredCredentials, authorize_url,
    cluster_supports_hub, resolve_credential,
};
use std::net::TcpListener;

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// An administered cluster scripted per test: which subsystems the schema
/// reports, and what the hub subsystem config reads as.
struct FakeAdmin {
    subsystems: Vec<&'static str>,
    hub_config: Option<&'static str>,
    schema_error: bool,
}

impl FakeAdmin {
    fn supporting(hub_config: &'static str) -> Self {
        Self {
            subsystems: vec!["notify", "hub"],
            hub_config: Some(hub_config),
            schema_error: false,
        }
    }

    fn unsupporting() -> Self {
        Self {
            subsystems: vec!["notify"],
            hub_config: None,
            schema_error: false,
        }
    }

    fn unreachable() -> Self {
        Self {
            subsystems: vec![],
            hub_config: None,
            schema_error: true,
        }
    }
}

impl AdminApi for FakeAdmin {
    fn config_schema(&self) -> AdminResult<ConfigSchema> {
        if self.schema_error {
            return Err(AdminError::Api {
                status: 503,
                body: "cluster unreachable".to_string(),
            });
        }
        Ok(ConfigSchema {
            keys: self
                .subsystems
                .iter()
                .map(|k| ConfigKeyHelp {
                    key: k.to_string(),
                    description: String::new(),
                })
                .collect(),
        })
    }

    fn get_config(&self, _subsystem: &str) -> AdminResult<String> {
        self.hub_config
            .map(str::to_string)
            .ok_or_else(|| AdminError::Api {
                status: 500,
                body: "config fetch should not have happened".to_string(),
            })
    }

    fn set_config(&self, _kv: &str) -> AdminResult<()> {
        Ok(())
    }

    fn status(&self) -> AdminResult<ClusterStatus> {
        Ok(ClusterStatus {
            deployment_id: "dep-fake".to_string(),
            servers: vec![],
            usage: UsageStats { size: 0 },
            buckets: CountStat { count: 0 },
            objects: CountStat { count: 0 },
        })
    }
}

fn local(api_key: Option<&str>, license: Option<&str>) -> StoredCredentials {
    StoredCredentials {
        api_key: api_key.map(str::to_string),
        license: license.map(str::to_string),
    }
}

#[test]
fn server_held_value_wins_over_local_config() {
    let admin = FakeAdmin::supporting("hub api_key=server-key license=");
    let creds = local(Some("local-key"), None);
    let resolved = resolve_credential(&admin, &creds, CredentialKind::ApiKey).unwrap();
    assert_eq!(resolved.as_deref(), Some("server-key"));
}

#[test]
fn empty_server_held_value_still_wins() {
    let admin = FakeAdmin::supporting("hub api_key= license=");
    let creds = local(Some("local-key"), None);
    let resolved = resolve_credential(&admin, &creds, CredentialKind::ApiKey).unwrap();
    assert_eq!(resolved.as_deref(), Some(""));
}

#[test]
fn unsupporting_cluster_falls_back_to_local_config() {
    let admin = FakeAdmin::unsupporting();
    assert!(!cluster_supports_hub(&admin).unwrap());

    let creds = local(None, Some("local-license"));
    let resolved = resolve_credential(&admin, &creds, CredentialKind::License).unwrap();
    assert_eq!(resolved.as_deref(), Some("local-license"));

    let absent = resolve_credential(&admin, &local(None, None), CredentialKind::License).unwrap();
    assert_eq!(absent, None);
}

#[test]
fn supported_but_absent_key_falls_back_to_local_config() {
    let admin = FakeAdmin::supporting("hub endpoint=https://hub.silo.dev");
    let creds = local(Some("local-key"), None);
    let resolved = resolve_credential(&admin, &creds, CredentialKind::ApiKey).unwrap();
    assert_eq!(resolved.as_deref(), Some("local-key"));
}

#[test]
fn unreachable_cluster_is_fatal_despite_local_credential() {
    let admin = FakeAdmin::unreachable();
    let creds = local(Some("local-key"), None);
    let err = resolve_credential(&admin, &creds, CredentialKind::ApiKey).unwrap_err();
    assert!(matches!(err, RegistryError::Admin(_)));
    assert!(err.to_string().contains("cluster unreachable"));
}

#[test]
fn api_key_strategy_appends_query_parameter() {
    let http = RegistryHttp::new(None).unwrap();
    let endpoints = Endpoints::development();
    let mut prompt = ScriptedPrompt::new(&[], &[]);

    let auth = authorize_url(
        &http,
        &endpoints,
        &mut prompt,
        "https://hub.silo.dev/api/cluster/register",
        Some("k-1".to_string()),
        Some("lic-1".to_string()),
    )
    .unwrap();

    // API key outranks license; no headers needed.
    assert_eq!(
        auth.url,
        "https://hub.silo.dev/api/cluster/register?api_key=k-1"
    );
    assert!(auth.headers.is_empty());
}

#[test]
fn license_strategy_applies_when_api_key_is_absent() {
    let http = RegistryHttp::new(None).unwrap();
    let endpoints = Endpoints::development();
    let mut prompt = ScriptedPrompt::new(&[], &[]);

    let auth = authorize_url(
        &http,
        &endpoints,
        &mut prompt,
        "https://hub.silo.dev/api/cluster/register",
        Some(String::new()),
        Some("lic-1".to_string()),
    )
    .unwrap();

    assert_eq!(
        auth.url,
        "https://hub.silo.dev/api/cluster/register?license=lic-1"
    );
    assert!(auth.headers.is_empty());
}

#[test]
fn login_strategy_attaches_bearer_and_account_id() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).json_body(json!({
            "mfa_required": false,
            "token_info": { "access_token": "tok-9" }
        }));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/auth/organizations")
            .header("authorization", "Bearer tok-9");
        then.status(200)
            .json_body(json!([{ "company": "Acme", "accountId": "acc-9" }]));
    });

    let http = RegistryHttp::new(None).unwrap();
    let endpoints = Endpoints::with_base(&server.base_url());
    let mut prompt = ScriptedPrompt::new(&["alice"], &["hunter2"]);

    let register_url = format!("{}/api/cluster/register", server.base_url());
    let auth = authorize_url(&http, &endpoints, &mut prompt, &register_url, None, None).unwrap();

    assert!(auth.url.ends_with("/api/cluster/register?aid=acc-9"));
    assert_eq!(
        auth.headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer tok-9"
    );
}
