//! Remote API gateway for the repository-listing service.
//!
//! The [`RepoGateway`] trait is the seam between the scan engine and the
//! GitHub REST API; [`GithubClient`] is the production implementation.

pub mod client;
pub mod gateway;
pub mod types;

pub use client::GithubClient;
pub use gateway::{GatewayError, RepoGateway};
pub use types::{RateLimitStatus, RepoHandle, RepoOwner, RepoPage};
