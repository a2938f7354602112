//! Delivery sink client.
//!
//! Forwards normalized repository records to the downstream ingestion
//! endpoint as JSON documents. Delivery is fire-and-forget: a failure is
//! reported to the caller once and never retried.

use std::time::Duration;

use crate::scan_engine::RepoRecord;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors surfaced by a delivery attempt.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Transport-level failure reaching the sink.
    #[error("delivery request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The sink answered with a non-2xx status.
    #[error("sink returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the downstream ingestion endpoint.
#[derive(Debug, Clone)]
pub struct DeliverySink {
    http: reqwest::Client,
    endpoint: String,
}

impl DeliverySink {
    /// Create a sink client posting to the given endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// The configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deliver one record. Non-2xx responses are errors; nothing is retried.
    pub async fn deliver(&self, record: &RepoRecord) -> Result<(), SinkError> {
        let response = self.http.post(&self.endpoint).json(record).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Status(status));
        }
        Ok(())
    }
}
