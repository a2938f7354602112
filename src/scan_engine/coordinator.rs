//! Scan coordinator.
//!
//! Drives pagination across the source's repository list, applies the
//! configured item limit, fans out one worker per discovered repository under
//! a bounded concurrency ceiling, and owns the run lifecycle: spawn the
//! aggregator, dispatch, drain every worker, close the streams.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinHandle;

use crate::config::ScanConfig;
use crate::github::{GithubClient, RepoGateway};
use crate::sink::DeliverySink;

use super::aggregator::aggregate;
use super::rate_governor::RateGovernor;
use super::types::{RepoRecord, ScanError, ScanPhase, ScanSummary, SourceKind};
use super::worker::{WorkerContext, process_repo};

/// Default ceiling on concurrently in-flight repository workers.
pub const MAX_WORKERS: usize = 10;

/// Capacity of the result and error streams.
const STREAM_CAPACITY: usize = 100;

/// Coordinates one scan run.
pub struct Scanner {
    config: ScanConfig,
    gateway: Arc<dyn RepoGateway>,
    sink: Option<Arc<DeliverySink>>,
    governor: RateGovernor,
    max_workers: usize,
}

/// Transient per-run bookkeeping, dropped when the run's streams close.
struct ScanRunState {
    phase: ScanPhase,
    pages_fetched: u32,
    dispatched: usize,
}

impl ScanRunState {
    fn new() -> Self {
        Self {
            phase: ScanPhase::Idle,
            pages_fetched: 0,
            dispatched: 0,
        }
    }

    fn enter(&mut self, phase: ScanPhase) {
        if self.phase != phase {
            log::debug!("scan phase: {} -> {}", self.phase, phase);
            self.phase = phase;
        }
    }
}

impl Scanner {
    /// Create a scanner backed by the production GitHub client.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        let gateway: Arc<dyn RepoGateway> = Arc::new(GithubClient::new(config.token()));
        Self::with_gateway(config, gateway)
    }

    /// Create a scanner with an injected gateway (shared client or test fake).
    #[must_use]
    pub fn with_gateway(config: ScanConfig, gateway: Arc<dyn RepoGateway>) -> Self {
        let sink = config.sink_endpoint().map(|e| Arc::new(DeliverySink::new(e)));
        Self {
            config,
            gateway,
            sink,
            governor: RateGovernor::default(),
            max_workers: MAX_WORKERS,
        }
    }

    /// Override the worker concurrency ceiling. Values below 1 are clamped.
    #[must_use]
    pub fn max_workers(mut self, ceiling: usize) -> Self {
        self.max_workers = ceiling.max(1);
        self
    }

    /// Override the rate governor.
    #[must_use]
    pub fn governor(mut self, governor: RateGovernor) -> Self {
        self.governor = governor;
        self
    }

    /// Execute the scan to completion.
    ///
    /// Spawns the result aggregator, runs the strategy for the configured
    /// source kind, drains every dispatched worker, then closes the streams
    /// and returns the aggregator's summary.
    ///
    /// # Errors
    /// Fatal listing or rate-status failures, and the unsupported-strategy
    /// condition for source kinds that are declared but not yet executable.
    pub async fn run(self) -> Result<ScanSummary, ScanError> {
        let (result_tx, result_rx) = mpsc::channel(STREAM_CAPACITY);
        let (error_tx, error_rx) = mpsc::channel(STREAM_CAPACITY);
        let aggregator = tokio::spawn(aggregate(result_rx, error_rx));

        let outcome = match self.config.source_kind() {
            SourceKind::Org => self.scan_org(result_tx, error_tx).await,
            kind @ (SourceKind::User | SourceKind::Topic) => {
                drop(result_tx);
                drop(error_tx);
                Err(ScanError::UnsupportedSource(kind))
            }
        };

        let summary = match aggregator.await {
            Ok(summary) => summary,
            Err(e) => {
                log::error!("result aggregator panicked: {e}");
                ScanSummary::default()
            }
        };

        outcome.map(|()| summary)
    }

    /// Launch the scan as a background task, logging its eventual outcome.
    ///
    /// The returned handle may be dropped; the run proceeds to completion
    /// independently of the caller.
    pub fn spawn(self) -> JoinHandle<Result<ScanSummary, ScanError>> {
        let label = format!("{}/{}", self.config.source_kind(), self.config.source_name());
        tokio::spawn(async move {
            let outcome = self.run().await;
            match &outcome {
                Ok(summary) => log::info!(
                    "Scan completed for {label}: {} repositories processed, {} delivery failures",
                    summary.processed,
                    summary.delivery_failures
                ),
                Err(e) => log::error!("Scan error for {label}: {e}"),
            }
            outcome
        })
    }

    /// Organization strategy: paginate, gate on quota, fan out workers.
    async fn scan_org(
        &self,
        result_tx: mpsc::Sender<RepoRecord>,
        error_tx: mpsc::Sender<ScanError>,
    ) -> Result<(), ScanError> {
        let org = self.config.source_name();
        let limit = self.config.limit();
        log::info!("Scanning organization: {org} (limit {limit})");

        let mut state = ScanRunState::new();
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut active = FuturesUnordered::new();
        let mut page = 1;

        let fatal = 'listing: loop {
            state.enter(ScanPhase::Listing);
            let listing = match self.gateway.list_org_repos(org, page).await {
                Ok(listing) => listing,
                Err(source) => break 'listing Some(ScanError::Listing { source }),
            };
            state.pages_fetched += 1;

            state.enter(ScanPhase::Dispatching);
            for repo in listing.items {
                if state.dispatched >= limit {
                    // Limit hit mid-page: stop without draining the rest of
                    // the page.
                    log::info!("Reached repository limit of {limit}");
                    break 'listing None;
                }
                state.dispatched += 1;

                // Queue behind the ceiling rather than spawn unboundedly.
                let permit = match Arc::clone(&semaphore).acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        log::error!("worker semaphore closed unexpectedly");
                        break 'listing None;
                    }
                };

                let ctx = WorkerContext {
                    gateway: Arc::clone(&self.gateway),
                    sink: self.sink.clone(),
                    results: result_tx.clone(),
                    errors: error_tx.clone(),
                };
                active.push(tokio::spawn(async move {
                    let _permit = permit;
                    process_repo(ctx, repo).await;
                }));
            }

            match listing.next_page {
                Some(next) if state.dispatched < limit => {
                    // Gate the next page on remaining quota.
                    match self.governor.ensure_capacity(self.gateway.as_ref()).await {
                        Ok(()) => page = next,
                        Err(e) => break 'listing Some(e),
                    }
                }
                _ => break 'listing None,
            }
        };

        // Even on a fatal listing error, already-dispatched workers drain
        // normally before the streams close.
        state.enter(ScanPhase::Draining);
        drop(result_tx);
        drop(error_tx);
        while let Some(joined) = active.next().await {
            if let Err(e) = joined {
                log::error!("repository worker panicked: {e}");
            }
        }

        log::debug!(
            "scan of {org}: {} pages fetched, {} workers dispatched",
            state.pages_fetched,
            state.dispatched
        );

        match fatal {
            Some(err) => {
                state.enter(ScanPhase::Failed);
                Err(err)
            }
            None => {
                state.enter(ScanPhase::Completed);
                Ok(())
            }
        }
    }
}
