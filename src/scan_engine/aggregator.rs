//! Result aggregator: dual-stream drain for one scan run.

use tokio::sync::mpsc;

use super::types::{RepoRecord, ScanError, ScanSummary};

/// Drain the result and error streams concurrently until both are closed.
///
/// Runs as its own task alongside the coordinator's dispatch loop so neither
/// stream can stall the other. Performs no network calls; its only side
/// effects are counters and log lines.
pub(crate) async fn aggregate(
    mut results: mpsc::Receiver<RepoRecord>,
    mut errors: mpsc::Receiver<ScanError>,
) -> ScanSummary {
    let mut summary = ScanSummary::default();
    let mut results_open = true;
    let mut errors_open = true;

    while results_open || errors_open {
        tokio::select! {
            record = results.recv(), if results_open => match record {
                Some(record) => {
                    summary.processed += 1;
                    log::info!("Processed: {} ({} stars)", record.full_name, record.stars);
                }
                None => results_open = false,
            },
            report = errors.recv(), if errors_open => match report {
                Some(report) => {
                    summary.delivery_failures += 1;
                    log::warn!("{report}");
                }
                None => errors_open = false,
            },
        }
    }

    summary
}
