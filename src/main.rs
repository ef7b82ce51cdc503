use anyhow::{bail, Result};
use clap::Parser;
use pagescout::cli::Cli;
use pagescout::writer;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "pagescout=debug"
    } else {
        "pagescout=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let start = Instant::now();
    let config = cli.to_config();
    let report = pagescout::gather(&cli.url, config).await?;

    if report.urls.is_empty() {
        bail!("no URLs gathered");
    }

    writer::write_url_module(&cli.out, &report.urls)?;

    let stats = &report.stats;
    info!(
        stopped = ?report.stopped,
        sitemaps = stats.sitemaps_processed,
        seen = stats.urls_discovered,
        valid = stats.urls_validated,
        kept = stats.urls_kept,
        groups = stats.groups,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "done"
    );
    info!("wrote {} URL(s) to {}", report.urls.len(), cli.out.display());

    Ok(())
}
