use anyhow::Context;
use clap::Parser;

use heading_scraper::{lifecycle, service, Cli, ScrapeConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    lifecycle::init_logging();

    let config = ScrapeConfig::try_from(Cli::parse()).context("Invalid configuration")?;

    let summary = service::pipeline::run(&config)
        .await
        .with_context(|| format!("Failed to scrape {}", config.url))?;

    tracing::info!(
        "[PIPELINE] Saved {} heading(s) to {}",
        summary.total,
        summary.output.display()
    );
    Ok(())
}
