#![allow(dead_code)]

//! Shared test fixtures: a mock repository gateway with controllable paging,
//! latency, failures, and quota responses.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use orgscan::github::{GatewayError, RateLimitStatus, RepoGateway, RepoHandle, RepoOwner, RepoPage};

/// Build one repository handle the way the listing endpoint would return it.
pub fn repo(org: &str, name: &str, stars: u32) -> RepoHandle {
    RepoHandle {
        name: name.to_string(),
        owner: RepoOwner {
            login: org.to_string(),
        },
        full_name: format!("{org}/{name}"),
        description: Some(format!("{name} description")),
        topics: vec!["testing".to_string()],
        stargazers_count: stars,
        language: Some("Rust".to_string()),
    }
}

/// Build `count` repositories named `repo-0..repo-{count-1}`.
pub fn repo_set(org: &str, count: usize) -> Vec<RepoHandle> {
    (0..count)
        .map(|i| repo(org, &format!("repo-{i}"), i as u32))
        .collect()
}

/// Mock gateway serving a fixed repository list in pages, with observable
/// call counts and peak README-fetch concurrency.
pub struct MockGateway {
    repos: Vec<RepoHandle>,
    page_size: usize,
    readme_latency: Duration,
    readme_failures: HashSet<String>,
    listing_failure_on_page: Option<u32>,
    remaining: u32,
    limit: u32,
    reset_in: Duration,
    rate_status_fails: bool,
    list_calls: AtomicUsize,
    readme_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockGateway {
    pub fn new(repos: Vec<RepoHandle>) -> Self {
        Self {
            repos,
            page_size: 100,
            readme_latency: Duration::ZERO,
            readme_failures: HashSet::new(),
            listing_failure_on_page: None,
            remaining: 5000,
            limit: 5000,
            reset_in: Duration::ZERO,
            rate_status_fails: false,
            list_calls: AtomicUsize::new(0),
            readme_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn readme_latency(mut self, latency: Duration) -> Self {
        self.readme_latency = latency;
        self
    }

    pub fn fail_readme(mut self, full_name: &str) -> Self {
        self.readme_failures.insert(full_name.to_string());
        self
    }

    pub fn fail_listing_on_page(mut self, page: u32) -> Self {
        self.listing_failure_on_page = Some(page);
        self
    }

    pub fn quota(mut self, remaining: u32, limit: u32, reset_in: Duration) -> Self {
        self.remaining = remaining;
        self.limit = limit;
        self.reset_in = reset_in;
        self
    }

    pub fn fail_rate_status(mut self) -> Self {
        self.rate_status_fails = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn readme_calls(&self) -> usize {
        self.readme_calls.load(Ordering::SeqCst)
    }

    /// Highest number of README fetches observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RepoGateway for MockGateway {
    async fn list_org_repos(&self, _org: &str, page: u32) -> Result<RepoPage, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.listing_failure_on_page == Some(page) {
            return Err(GatewayError::Status {
                status: reqwest::StatusCode::UNAUTHORIZED,
                url: format!("mock://listing/page/{page}"),
            });
        }
        let start = ((page - 1) as usize) * self.page_size;
        let end = (start + self.page_size).min(self.repos.len());
        let items = if start >= self.repos.len() {
            Vec::new()
        } else {
            self.repos[start..end].to_vec()
        };
        let next_page = if end < self.repos.len() {
            Some(page + 1)
        } else {
            None
        };
        Ok(RepoPage { items, next_page })
    }

    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String, GatewayError> {
        self.readme_calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        if !self.readme_latency.is_zero() {
            tokio::time::sleep(self.readme_latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let full_name = format!("{owner}/{repo}");
        if self.readme_failures.contains(&full_name) {
            return Err(GatewayError::NotFound);
        }
        Ok(format!("# {repo}\n"))
    }

    async fn rate_limit_status(&self) -> Result<RateLimitStatus, GatewayError> {
        if self.rate_status_fails {
            return Err(GatewayError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                url: "mock://rate_limit".to_string(),
            });
        }
        let reset_in =
            chrono::Duration::from_std(self.reset_in).unwrap_or_else(|_| chrono::Duration::zero());
        Ok(RateLimitStatus {
            remaining: self.remaining,
            limit: self.limit,
            reset_at: Utc::now() + reset_in,
        })
    }
}
