//! reqwest-backed GitHub REST client.
//!
//! Implements [`RepoGateway`] against the v3 REST API: repository listing with
//! `Link`-header pagination, README retrieval with base64 content decoding,
//! and the `/rate_limit` quota probe. Authentication is a bearer token;
//! without one the client degrades to unauthenticated rate limits.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::DateTime;
use reqwest::header::{self, HeaderMap};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::gateway::{GatewayError, RepoGateway};
use super::types::{RateLimitStatus, RepoPage};

const API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("orgscan/", env!("CARGO_PKG_VERSION"));
const ACCEPT_JSON: &str = "application/vnd.github+json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Repositories fetched per listing page.
const PER_PAGE: u32 = 100;

/// Authenticated GitHub REST client.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    token: Option<String>,
    base_url: String,
}

impl GithubClient {
    /// Create a client, optionally authenticated with a bearer token.
    #[must_use]
    pub fn new(token: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            token: token.map(str::to_owned),
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base URL (test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, ACCEPT_JSON);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }
}

#[async_trait]
impl RepoGateway for GithubClient {
    async fn list_org_repos(&self, org: &str, page: u32) -> Result<RepoPage, GatewayError> {
        let url = format!("{}/orgs/{org}/repos", self.base_url);
        let response = self
            .get(&url)
            .query(&[
                ("type", "public"),
                ("per_page", &PER_PAGE.to_string()),
                ("page", &page.to_string()),
            ])
            .send()
            .await?;
        let response = check_status(response)?;
        let next_page = next_page_from_link(response.headers());
        let items = response.json().await?;
        Ok(RepoPage { items, next_page })
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, GatewayError> {
        let url = format!("{}/repos/{owner}/{repo}/readme", self.base_url);
        let response = check_status(self.get(&url).send().await?)?;
        let payload: ReadmePayload = response.json().await?;
        decode_readme(&payload)
    }

    async fn rate_limit_status(&self) -> Result<RateLimitStatus, GatewayError> {
        let url = format!("{}/rate_limit", self.base_url);
        let response = check_status(self.get(&url).send().await?)?;
        let payload: RateLimitPayload = response.json().await?;
        let core = payload.resources.core;
        let reset_at = DateTime::from_timestamp(core.reset, 0).ok_or_else(|| {
            GatewayError::Decode(format!("invalid rate limit reset timestamp: {}", core.reset))
        })?;
        Ok(RateLimitStatus {
            remaining: core.remaining,
            limit: core.limit,
            reset_at,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ReadmePayload {
    content: String,
    encoding: String,
}

#[derive(Debug, Deserialize)]
struct RateLimitPayload {
    resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    core: RateLimitCore,
}

#[derive(Debug, Deserialize)]
struct RateLimitCore {
    limit: u32,
    remaining: u32,
    reset: i64,
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(GatewayError::NotFound);
    }
    if !status.is_success() {
        return Err(GatewayError::Status {
            status,
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

/// Extract the next page number from a `Link` header, e.g.
/// `<https://api.github.com/orgs/acme/repos?page=3>; rel="next"`.
fn next_page_from_link(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get(header::LINK)?.to_str().ok()?;
    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.contains("rel=\"next\"") {
            return None;
        }
        let target = target.trim().trim_start_matches('<').trim_end_matches('>');
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}

/// GitHub returns README content base64-encoded with embedded newlines.
fn decode_readme(payload: &ReadmePayload) -> Result<String, GatewayError> {
    if payload.encoding != "base64" {
        return Err(GatewayError::Decode(format!(
            "unexpected readme encoding: {}",
            payload.encoding
        )));
    }
    let compact: String = payload.content.split_whitespace().collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| GatewayError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| GatewayError::Decode(e.to_string()))
}
