//! Scan orchestration engine.
//!
//! The coordinator drives pagination and bounded worker fan-out, the rate
//! governor throttles the pagination path against the upstream quota, workers
//! process individual repositories, and the aggregator drains the result and
//! error streams concurrently with dispatch.

pub(crate) mod aggregator;
pub mod coordinator;
pub mod rate_governor;
pub mod types;
pub(crate) mod worker;

pub use coordinator::{MAX_WORKERS, Scanner};
pub use rate_governor::{RESERVE_PAD, RateGovernor};
pub use types::{RepoRecord, ScanError, ScanPhase, ScanSummary, SourceKind};
