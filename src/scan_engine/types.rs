//! Core types for scan runs.
//!
//! This module contains the source-kind strategy enum, the normalized record
//! emitted for every processed repository, the scan error taxonomy, and the
//! per-run summary produced by the result aggregator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::github::{GatewayError, RepoHandle};
use crate::sink::SinkError;

/// The kind of source entity a scan enumerates.
///
/// `User` and `Topic` are declared strategies but are not yet executable;
/// running a scan against them fails with [`ScanError::UnsupportedSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A GitHub organization.
    Org,
    /// A GitHub user account.
    User,
    /// A topic search.
    Topic,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Org => write!(f, "org"),
            Self::User => write!(f, "user"),
            Self::Topic => write!(f, "topic"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "org" => Ok(Self::Org),
            "user" => Ok(Self::User),
            "topic" => Ok(Self::Topic),
            other => Err(ScanError::InvalidConfig(format!(
                "unknown source type: {other}"
            ))),
        }
    }
}

/// Normalized record for one repository, emitted on the result stream and
/// delivered to the ingestion sink.
///
/// Field names match the sink's wire contract exactly. Records are immutable
/// after the worker assembles them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRecord {
    pub name: String,
    pub org: String,
    pub full_name: String,
    pub description: String,
    pub topics: Vec<String>,
    pub readme: String,
    pub stars: u32,
    pub language: String,
}

impl RepoRecord {
    /// Assemble a record from a listed repository handle plus its README text.
    #[must_use]
    pub fn from_repo(repo: RepoHandle, readme: String) -> Self {
        Self {
            name: repo.name,
            org: repo.owner.login,
            full_name: repo.full_name,
            description: repo.description.unwrap_or_default(),
            topics: repo.topics,
            readme,
            stars: repo.stargazers_count,
            language: repo.language.unwrap_or_default(),
        }
    }
}

/// Error taxonomy for scan runs.
///
/// README fetch failures are deliberately absent: the worker absorbs them and
/// substitutes an empty README instead of reporting an error.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Configuration rejected before any work started.
    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),

    /// The requested source kind is declared but not yet implemented.
    #[error("{0} scanning not yet implemented")]
    UnsupportedSource(SourceKind),

    /// A pagination request failed (auth rejected, entity not found, transport
    /// error). Fatal to the run; already-dispatched workers still drain.
    #[error("error listing repositories: {source}")]
    Listing {
        #[source]
        source: GatewayError,
    },

    /// The rate-limit status query failed. Fatal: the run cannot safely
    /// continue without visibility into remaining quota.
    #[error("rate limit status query failed: {source}")]
    RateStatus {
        #[source]
        source: GatewayError,
    },

    /// Sink delivery failed for one record. Reported on the error stream only;
    /// never affects the run's outcome.
    #[error("failed to deliver {repo} to sink: {source}")]
    Delivery {
        repo: String,
        #[source]
        source: SinkError,
    },
}

/// Lifecycle phases of one scan run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Listing,
    Dispatching,
    Draining,
    Completed,
    Failed,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Listing => "listing",
            Self::Dispatching => "dispatching",
            Self::Draining => "draining",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Counts produced by the result aggregator for one scan run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Records that reached the result stream.
    pub processed: usize,
    /// Delivery failures that reached the error stream.
    pub delivery_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_round_trips_wire_strings() {
        for kind in [SourceKind::Org, SourceKind::User, SourceKind::Topic] {
            let parsed: SourceKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_source_kind_is_rejected() {
        let err = "gitlab-group".parse::<SourceKind>().unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig(_)));
    }

    #[test]
    fn record_serializes_with_sink_field_names() {
        let record = RepoRecord {
            name: "widget".into(),
            org: "acme".into(),
            full_name: "acme/widget".into(),
            description: String::new(),
            topics: vec!["rust".into()],
            readme: String::new(),
            stars: 7,
            language: "Rust".into(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["full_name"], "acme/widget");
        assert_eq!(value["stars"], 7);
        assert_eq!(value["readme"], "");
        assert_eq!(value["topics"][0], "rust");
    }
}
