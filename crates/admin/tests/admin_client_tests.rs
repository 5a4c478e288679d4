use httpmock::Method::{GET, PUT};
use httpmock::MockServer;
use serde_json::json;
use silo_admin::client::AdminApi;
use silo_admin::{AdminError, ConnectionCache, ConnectionConfig};
use std::net::TcpListener;

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn connect(base_url: &str) -> std::sync::Arc<silo_admin::AdminClient> {
    let cache = ConnectionCache::new();
    cache
        .get_or_create(&ConnectionConfig::new(base_url, "access", "secret"))
        .unwrap()
}

#[test]
fn admin_client_success_paths() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v1/admin/config/schema");
        then.status(200).json_body(json!({
            "keys": [
                { "key": "hub", "description": "hub registry settings" },
                { "key": "notify", "description": "notification targets" }
            ]
        }));
    });

    server.mock(|when, then| {
        when.method(GET).path("/v1/admin/config/hub");
        then.status(200).body("hub api_key=k-123 license=");
    });

    server.mock(|when, then| {
        when.method(PUT)
            .path("/v1/admin/config")
            .body("hub license= api_key=k-456");
        then.status(200);
    });

    server.mock(|when, then| {
        when.method(GET).path("/v1/admin/status");
        then.status(200).json_body(json!({
            "deployment_id": "dep-7",
            "servers": [
                {
                    "endpoint": "node-1:9000",
                    "version": "2024-08-01T00:00:00Z",
                    "pool_index": 1,
                    "drives": [
                        { "path": "/data/0", "total_space": 1000, "used_space": 100 }
                    ]
                }
            ],
            "usage": { "size": 100 },
            "buckets": { "count": 2 },
            "objects": { "count": 40 }
        }));
    });

    let client = connect(&server.base_url());

    let schema = client.config_schema().unwrap();
    assert!(schema.has_subsystem("hub"));
    assert!(!schema.has_subsystem("audit"));

    let raw = client.get_config("hub").unwrap();
    assert_eq!(silo_admin::kv::lookup(&raw, "api_key").as_deref(), Some("k-123"));

    client.set_config("hub license= api_key=k-456").unwrap();

    let status = client.status().unwrap();
    assert_eq!(status.deployment_id, "dep-7");
    assert_eq!(status.servers.len(), 1);
    assert_eq!(status.usage.size, 100);
}

#[test]
fn admin_client_surfaces_error_status_and_body() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/admin/status");
        then.status(503).body("maintenance window");
    });

    let client = connect(&server.base_url());
    let err = client.status().unwrap_err();
    match err {
        AdminError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance window");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn admin_client_flags_malformed_status_payload() {
    if !can_bind_localhost() {
        eprintln!("Skipping httpmock tests: cannot bind to localhost");
        return;
    }

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v1/admin/status");
        then.status(200).body("not json");
    });

    let client = connect(&server.base_url());
    let err = client.status().unwrap_err();
    assert!(matches!(err, AdminError::Shape(_)));
}
