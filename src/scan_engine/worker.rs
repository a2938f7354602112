//! Per-repository worker.
//!
//! Each worker fetches one repository's README, assembles the normalized
//! record, publishes it on the result stream, and attempts sink delivery.
//! Nothing here is retried and nothing here aborts the run: README absence
//! degrades to empty content and delivery failure goes to the error stream.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::github::{RepoGateway, RepoHandle};
use crate::sink::DeliverySink;

use super::types::{RepoRecord, ScanError};

/// Shared context cloned into each worker task.
pub(crate) struct WorkerContext {
    pub gateway: Arc<dyn RepoGateway>,
    pub sink: Option<Arc<DeliverySink>>,
    pub results: mpsc::Sender<RepoRecord>,
    pub errors: mpsc::Sender<ScanError>,
}

/// Process one repository: README fetch, record assembly, result publish,
/// then delivery. Exactly one result publish and at most one error publish
/// per invocation.
pub(crate) async fn process_repo(ctx: WorkerContext, repo: RepoHandle) {
    let readme = match ctx.gateway.fetch_readme(&repo.owner.login, &repo.name).await {
        Ok(text) => text,
        Err(e) => {
            // Not every repository has a README; absence is non-fatal.
            log::warn!("Could not fetch README for {}: {e}", repo.full_name);
            String::new()
        }
    };

    let record = RepoRecord::from_repo(repo, readme);

    // Bounded channel: a slow consumer applies backpressure here instead of
    // dropping records.
    if ctx.results.send(record.clone()).await.is_err() {
        log::debug!(
            "result stream closed before {} could be published",
            record.full_name
        );
        return;
    }

    if let Some(sink) = &ctx.sink {
        if let Err(source) = sink.deliver(&record).await {
            let report = ScanError::Delivery {
                repo: record.full_name.clone(),
                source,
            };
            if ctx.errors.send(report).await.is_err() {
                log::debug!(
                    "error stream closed before delivery failure for {} could be reported",
                    record.full_name
                );
            }
        }
    }
}
