//! Scan configuration: the immutable per-run [`ScanConfig`], its builder,
//! and environment loading for the binary.

pub mod builder;
pub mod env;
pub mod types;

pub use builder::ScanConfigBuilder;
pub use env::EnvSettings;
pub use types::{DEFAULT_LIMIT, ScanConfig};
