//! Builder for [`ScanConfig`] with validation at build time.

use crate::scan_engine::{ScanError, SourceKind};

use super::types::{DEFAULT_LIMIT, ScanConfig};

/// Builder returned by [`ScanConfig::builder`].
#[derive(Debug, Default)]
pub struct ScanConfigBuilder {
    source: Option<(SourceKind, String)>,
    limit: Option<usize>,
    token: Option<String>,
    sink_endpoint: Option<String>,
}

impl ScanConfig {
    /// Start building a scan configuration.
    #[must_use]
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }
}

impl ScanConfigBuilder {
    /// Set the source entity to scan. Required.
    #[must_use]
    pub fn source(mut self, kind: SourceKind, name: impl Into<String>) -> Self {
        self.source = Some((kind, name.into()));
        self
    }

    /// Cap the total repositories processed. Defaults to [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Bearer credential for the remote API. Absence degrades to
    /// unauthenticated rate limits.
    #[must_use]
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Downstream ingestion endpoint. Absence disables delivery.
    #[must_use]
    pub fn sink_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.sink_endpoint = endpoint;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidConfig`] when the source is missing, the
    /// source name is empty, or the limit is zero.
    pub fn build(self) -> Result<ScanConfig, ScanError> {
        let (source_kind, source_name) = self
            .source
            .ok_or_else(|| ScanError::InvalidConfig("source kind and name are required".into()))?;
        if source_name.is_empty() {
            return Err(ScanError::InvalidConfig("source name must not be empty".into()));
        }
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(ScanError::InvalidConfig("limit must be positive".into()));
        }
        Ok(ScanConfig {
            source_kind,
            source_name,
            limit,
            token: self.token,
            sink_endpoint: self.sink_endpoint,
        })
    }
}
