//! Trigger service HTTP surface: probes, validation, fire-and-forget launch.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{MockGateway, repo_set};
use orgscan::server::ScanService;
use serde_json::{Value, json};

fn server_with(gateway: Arc<MockGateway>) -> TestServer {
    let service = ScanService::with_gateway(gateway, true, None);
    TestServer::new(service.router()).expect("router builds")
}

/// Poll until `check` passes or the deadline expires. Background scans have
/// no handle to await; observable side effects are the only signal.
async fn wait_for(check: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !check() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached before deadline"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn health_probe_reports_liveness() {
    let server = server_with(Arc::new(MockGateway::new(Vec::new())));

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], orgscan::VERSION);
    assert!(body["service"].as_str().is_some());
}

#[tokio::test]
async fn status_probe_reflects_credential_and_sink() {
    let gateway: Arc<MockGateway> = Arc::new(MockGateway::new(Vec::new()));
    let configured = ScanService::with_gateway(
        gateway.clone(),
        true,
        Some("http://mcp:8081/ingest".to_string()),
    );
    let server = TestServer::new(configured.router()).unwrap();

    let body: Value = server.get("/status").await.json();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["github_token"], true);
    assert_eq!(body["mcp_endpoint"], "http://mcp:8081/ingest");

    let bare = ScanService::with_gateway(gateway, false, None);
    let server = TestServer::new(bare.router()).unwrap();

    let body: Value = server.get("/status").await.json();
    assert_eq!(body["github_token"], false);
    assert_eq!(body["mcp_endpoint"], "");
}

#[tokio::test]
async fn scan_acknowledges_immediately_and_defaults_limit() {
    let gateway = Arc::new(MockGateway::new(repo_set("acme", 80)));
    let server = server_with(gateway.clone());

    let response = server
        .post("/scan")
        .json(&json!({"source_type": "org", "source_name": "acme"}))
        .await;
    response.assert_status(StatusCode::ACCEPTED);

    let body: Value = response.json();
    assert_eq!(body["status"], "started");
    assert_eq!(body["scanned"], 0);

    // The background run uses the default limit of 50 out of 80 repositories.
    wait_for(|| gateway.readme_calls() == 50).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(gateway.readme_calls(), 50);
    assert_eq!(gateway.list_calls(), 1);
}

#[tokio::test]
async fn scan_rejects_missing_fields() {
    let server = server_with(Arc::new(MockGateway::new(Vec::new())));

    let response = server
        .post("/scan")
        .json(&json!({"source_type": "", "source_name": "acme"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/scan")
        .json(&json!({"source_type": "org", "source_name": ""}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scan_rejects_unknown_source_type() {
    let server = server_with(Arc::new(MockGateway::new(Vec::new())));

    let response = server
        .post("/scan")
        .json(&json!({"source_type": "gitlab-group", "source_name": "acme"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_scan_is_accepted_but_fails_in_background() {
    let gateway = Arc::new(MockGateway::new(repo_set("alice", 5)));
    let server = server_with(gateway.clone());

    let response = server
        .post("/scan")
        .json(&json!({"source_type": "user", "source_name": "alice", "limit": 10}))
        .await;

    // Accepted at the HTTP layer; the unsupported-strategy condition is only
    // observable in the background run, which never touches the listing API.
    response.assert_status(StatusCode::ACCEPTED);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(gateway.list_calls(), 0);
    assert_eq!(gateway.readme_calls(), 0);
}

#[tokio::test]
async fn concurrent_scans_are_not_single_flighted() {
    let gateway = Arc::new(
        MockGateway::new(repo_set("acme", 20)).readme_latency(Duration::from_millis(20)),
    );
    let server = server_with(gateway.clone());

    for _ in 0..3 {
        let response = server
            .post("/scan")
            .json(&json!({"source_type": "org", "source_name": "acme", "limit": 20}))
            .await;
        response.assert_status(StatusCode::ACCEPTED);
    }

    // All three runs proceed independently.
    wait_for(|| gateway.readme_calls() == 60).await;
    assert_eq!(gateway.list_calls(), 3);
}
