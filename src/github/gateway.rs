//! Remote API gateway trait and its error type.
//!
//! The scan engine talks to the repository-listing API exclusively through
//! [`RepoGateway`], so tests can inject a fake gateway with controllable
//! latency and quota responses.

use async_trait::async_trait;

use super::types::{RateLimitStatus, RepoPage};

/// Capability surface of the remote repository-listing API.
#[async_trait]
pub trait RepoGateway: Send + Sync {
    /// List one page of an organization's public repositories, ordered as
    /// returned upstream.
    async fn list_org_repos(&self, org: &str, page: u32) -> Result<RepoPage, GatewayError>;

    /// Fetch a repository's README as decoded text.
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, GatewayError>;

    /// Query the current rate-limit status for the credential in use.
    async fn rate_limit_status(&self) -> Result<RateLimitStatus, GatewayError>;
}

/// Errors surfaced by gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// The requested resource does not exist.
    #[error("resource not found")]
    NotFound,

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}
