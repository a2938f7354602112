//! Reserve-pad rate governor for the pagination path.
//!
//! Before each page fetch the coordinator asks the governor for capacity.
//! When the remaining quota drops below the reserve pad, the calling task is
//! suspended until the upstream quota window resets. Individual worker
//! fetches are not separately gated: listing and README calls share one
//! quota pool, and checking at page boundaries bounds the aggregate
//! consumption of each page's worker fan-out before the next page starts.

use chrono::Utc;
use std::time::Duration;

use crate::github::RepoGateway;

use super::types::ScanError;

/// Requests held in reserve below which the governor throttles.
pub const RESERVE_PAD: u32 = 100;

/// Quota gate applied before each pagination request.
#[derive(Debug, Clone, Copy)]
pub struct RateGovernor {
    reserve_pad: u32,
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::new(RESERVE_PAD)
    }
}

impl RateGovernor {
    /// Create a governor with a custom reserve pad.
    #[must_use]
    pub fn new(reserve_pad: u32) -> Self {
        Self { reserve_pad }
    }

    /// Block until enough quota is available for another page of work.
    ///
    /// Queries the gateway's rate-limit status; if `remaining` is below the
    /// reserve pad, sleeps until the reported reset instant and returns.
    ///
    /// # Errors
    /// Returns [`ScanError::RateStatus`] when the quota query itself fails.
    /// The scan cannot safely continue without visibility into remaining
    /// capacity.
    pub async fn ensure_capacity(&self, gateway: &dyn RepoGateway) -> Result<(), ScanError> {
        let status = gateway
            .rate_limit_status()
            .await
            .map_err(|source| ScanError::RateStatus { source })?;

        log::info!("Rate limit: {}/{} remaining", status.remaining, status.limit);

        if status.remaining < self.reserve_pad {
            let wait = (status.reset_at - Utc::now())
                .to_std()
                .unwrap_or(Duration::ZERO);
            log::warn!(
                "Rate limit low, sleeping until {} ({}s)",
                status.reset_at,
                wait.as_secs()
            );
            tokio::time::sleep(wait).await;
        }

        Ok(())
    }
}
