//! Wire types for the GitHub REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as returned by the listing endpoint.
///
/// Only the fields the scanner consumes are deserialized; everything else in
/// the API payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoHandle {
    pub name: String,
    pub owner: RepoOwner,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub language: Option<String>,
}

/// Owning entity of a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// One page of repository listings plus the cursor to the next page, if any.
#[derive(Debug, Clone)]
pub struct RepoPage {
    pub items: Vec<RepoHandle>,
    /// Page number of the next page, taken from the `Link` response header.
    /// `None` when this is the last page.
    pub next_page: Option<u32>,
}

/// Snapshot of the core rate-limit pool.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitStatus {
    pub remaining: u32,
    pub limit: u32,
    /// Wall-clock instant at which the quota window resets.
    pub reset_at: DateTime<Utc>,
}
