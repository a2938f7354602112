//! Scan trigger service.
//!
//! Stateless HTTP surface that accepts externally initiated scan requests,
//! validates them, launches a scanner in the background, and acknowledges
//! immediately. Also exposes read-only health and status probes.
//!
//! A scan's eventual failure is never surfaced to the HTTP caller — the
//! response was already sent. Outcomes are observable through logs only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::config::{DEFAULT_LIMIT, ScanConfig};
use crate::github::{GithubClient, RepoGateway};
use crate::scan_engine::{Scanner, SourceKind};

const SERVICE_NAME: &str = "orgscan repository scanner";

/// Trigger service state shared across request handlers.
///
/// Holds the credential and sink endpoint injected into every scan it
/// launches; callers cannot override them. The gateway is constructed once
/// and shared by all runs.
#[derive(Clone)]
pub struct ScanService {
    gateway: Arc<dyn RepoGateway>,
    token_configured: bool,
    sink_endpoint: Option<String>,
    token: Option<String>,
}

/// Body of a `POST /scan` request.
#[derive(Debug, Deserialize)]
struct ScanRequest {
    #[serde(default)]
    source_type: String,
    #[serde(default)]
    source_name: String,
    #[serde(default)]
    limit: usize,
}

/// Acknowledgment returned when a scan is accepted.
#[derive(Debug, Serialize)]
struct ScanAck {
    status: &'static str,
    message: String,
    scanned: usize,
}

impl ScanService {
    /// Create a service backed by the production GitHub client.
    #[must_use]
    pub fn new(token: Option<String>, sink_endpoint: Option<String>) -> Self {
        let gateway: Arc<dyn RepoGateway> = Arc::new(GithubClient::new(token.as_deref()));
        Self {
            gateway,
            token_configured: token.is_some(),
            sink_endpoint,
            token,
        }
    }

    /// Create a service with an injected gateway (test seam).
    #[must_use]
    pub fn with_gateway(
        gateway: Arc<dyn RepoGateway>,
        token_configured: bool,
        sink_endpoint: Option<String>,
    ) -> Self {
        Self {
            gateway,
            token_configured,
            sink_endpoint,
            token: None,
        }
    }

    /// Build the HTTP router for this service.
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handle_health))
            .route("/status", get(handle_status))
            .route("/scan", post(handle_scan))
            .with_state(self.clone())
    }

    /// Bind and serve until the process is stopped.
    pub async fn serve(self, port: u16) -> anyhow::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        log::info!("Scanner HTTP server starting on port {port}");
        log::info!("Endpoints:");
        log::info!("  GET  /health - Health check");
        log::info!("  GET  /status - Scanner status");
        log::info!(
            "  POST /scan   - Trigger scan (body: {{\"source_type\":\"org\",\"source_name\":\"owner\",\"limit\":50}})"
        );
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// `GET /health` — static liveness info.
async fn handle_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "service": SERVICE_NAME,
    }))
}

/// `GET /status` — whether credentials and a delivery sink are configured.
async fn handle_status(State(service): State<ScanService>) -> Json<Value> {
    Json(json!({
        "status": "ready",
        "version": crate::VERSION,
        "github_token": service.token_configured,
        "mcp_endpoint": service.sink_endpoint.clone().unwrap_or_default(),
    }))
}

/// `POST /scan` — validate, launch the scan in the background, acknowledge.
async fn handle_scan(
    State(service): State<ScanService>,
    Json(request): Json<ScanRequest>,
) -> Result<(StatusCode, Json<ScanAck>), (StatusCode, String)> {
    if request.source_type.is_empty() || request.source_name.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "source_type and source_name are required".to_string(),
        ));
    }

    let kind: SourceKind = request
        .source_type
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid request: {e}")))?;

    let limit = if request.limit == 0 {
        DEFAULT_LIMIT
    } else {
        request.limit
    };

    let config = ScanConfig::builder()
        .source(kind, request.source_name.clone())
        .limit(limit)
        .token(service.token.clone())
        .sink_endpoint(service.sink_endpoint.clone())
        .build()
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid request: {e}")))?;

    // Fire and forget: the handle is dropped and the run logs its own
    // outcome. Concurrent runs are allowed; there is no single-flight
    // guarantee.
    Scanner::with_gateway(config, Arc::clone(&service.gateway)).spawn();

    Ok((
        StatusCode::ACCEPTED,
        Json(ScanAck {
            status: "started",
            message: format!(
                "Scan initiated for {kind}: {}",
                request.source_name
            ),
            scanned: 0,
        }),
    ))
}
