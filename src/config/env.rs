//! Environment-variable configuration for the binary.
//!
//! | Variable                | Meaning                                  |
//! |-------------------------|------------------------------------------|
//! | `ORGSCAN_SOURCE_TYPE`   | Source kind for one-shot mode            |
//! | `ORGSCAN_SOURCE_NAME`   | Source entity name for one-shot mode     |
//! | `ORGSCAN_LIMIT`         | Repository limit (default 50)            |
//! | `GITHUB_TOKEN`          | Bearer credential for the GitHub API     |
//! | `ORGSCAN_SINK_ENDPOINT` | Ingestion endpoint URL                   |
//! | `ORGSCAN_PORT`          | HTTP listen port (default 8080)          |

use super::types::DEFAULT_LIMIT;

const DEFAULT_PORT: u16 = 8080;

/// Settings read from the process environment.
#[derive(Debug, Clone)]
pub struct EnvSettings {
    pub source_kind: Option<String>,
    pub source_name: Option<String>,
    pub limit: usize,
    pub token: Option<String>,
    pub sink_endpoint: Option<String>,
    pub port: u16,
}

impl EnvSettings {
    /// Load settings from the environment, applying defaults for the limit
    /// and listen port. Unset and empty variables are treated the same.
    #[must_use]
    pub fn load() -> Self {
        Self {
            source_kind: non_empty("ORGSCAN_SOURCE_TYPE"),
            source_name: non_empty("ORGSCAN_SOURCE_NAME"),
            limit: non_empty("ORGSCAN_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LIMIT),
            token: non_empty("GITHUB_TOKEN"),
            sink_endpoint: non_empty("ORGSCAN_SINK_ENDPOINT"),
            port: non_empty("ORGSCAN_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
