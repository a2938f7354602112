//! orgscan — bounded-concurrency GitHub repository scanner
//!
//! Enumerates the repositories of a source entity (currently an organization),
//! fetches per-repository metadata and README content from the GitHub REST API,
//! and forwards normalized records to a downstream ingestion sink while
//! self-throttling against the API rate limit.
//!
//! Scans are triggered over HTTP ([`server::ScanService`]) and run to
//! completion independently of the triggering request, or run once from
//! environment configuration via the `orgscan` binary.

pub mod config;
pub mod github;
pub mod scan_engine;
pub mod server;
pub mod sink;

pub use config::{DEFAULT_LIMIT, ScanConfig};
pub use github::{GatewayError, GithubClient, RateLimitStatus, RepoGateway, RepoHandle, RepoPage};
pub use scan_engine::{
    RateGovernor, RepoRecord, ScanError, ScanSummary, Scanner, SourceKind, MAX_WORKERS,
    RESERVE_PAD,
};
pub use server::ScanService;
pub use sink::{DeliverySink, SinkError};

/// Crate version reported by the health and status probes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
