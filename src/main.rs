// orgscan binary: one-shot scan when a source is configured in the
// environment, HTTP trigger service otherwise.

use anyhow::{Context, Result};
use orgscan::config::{EnvSettings, ScanConfig};
use orgscan::scan_engine::{Scanner, SourceKind};
use orgscan::server::ScanService;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = EnvSettings::load();
    log::info!("orgscan repository scanner v{}", orgscan::VERSION);

    match (settings.source_kind.clone(), settings.source_name.clone()) {
        (Some(kind), Some(name)) => run_once(&settings, &kind, name).await,
        _ => {
            ScanService::new(settings.token, settings.sink_endpoint)
                .serve(settings.port)
                .await
        }
    }
}

async fn run_once(settings: &EnvSettings, kind: &str, name: String) -> Result<()> {
    let kind: SourceKind = kind.parse()?;
    let config = ScanConfig::builder()
        .source(kind, name)
        .limit(settings.limit)
        .token(settings.token.clone())
        .sink_endpoint(settings.sink_endpoint.clone())
        .build()?;

    let summary = Scanner::new(config).run().await.context("scan failed")?;
    log::info!(
        "Scan completed successfully: {} repositories processed, {} delivery failures",
        summary.processed,
        summary.delivery_failures
    );
    Ok(())
}
