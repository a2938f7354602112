//! Immutable per-run scan configuration.

use serde::{Deserialize, Serialize};

use crate::scan_engine::SourceKind;

/// Repository limit applied when a scan request omits one.
pub const DEFAULT_LIMIT: usize = 50;

/// Configuration for one scan run.
///
/// Created per scan request via [`ScanConfig::builder`], never mutated, and
/// owned exclusively by the `Scanner` it configures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub(crate) source_kind: SourceKind,
    pub(crate) source_name: String,
    /// Caps the total number of repositories processed across all pages.
    pub(crate) limit: usize,
    pub(crate) token: Option<String>,
    /// Absence disables delivery entirely.
    pub(crate) sink_endpoint: Option<String>,
}

impl ScanConfig {
    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn sink_endpoint(&self) -> Option<&str> {
        self.sink_endpoint.as_deref()
    }
}
