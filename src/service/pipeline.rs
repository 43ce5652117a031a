//! acquire -> extract -> write, once.

use crate::config::ScrapeConfig;
use crate::domain::models::ScrapeSummary;
use crate::error::Result;
use crate::extractor::{extract_from_document, level_counts};
use crate::repository::{CsvRepository, HeadingRepository};
use crate::service::acquisition::{source_for, DocumentSource};

/// Run the whole scrape with the source selected by `config.mode`.
pub async fn run(config: &ScrapeConfig) -> Result<ScrapeSummary> {
    let source = source_for(config)?;
    run_with_source(source.as_ref(), config).await
}

/// Run the scrape with an explicit document source.
///
/// The output file is only opened after acquisition succeeds, so a failed
/// fetch leaves any existing file untouched.
pub async fn run_with_source(
    source: &dyn DocumentSource,
    config: &ScrapeConfig,
) -> Result<ScrapeSummary> {
    tracing::info!(
        "[PIPELINE] Scraping {} ({} mode, levels {})",
        config.url,
        source.name(),
        config.levels
    );

    let document = source.fetch(&config.url).await?;
    let records = extract_from_document(&document, config.levels)?;

    let repository = CsvRepository::new(&config.output);
    repository.save(&records)?;

    let per_level = level_counts(&records, config.levels);
    for (level, count) in &per_level {
        tracing::debug!("[PIPELINE] h{}: {}", level, count);
    }

    Ok(ScrapeSummary {
        output: repository.path().to_path_buf(),
        total: records.len(),
        per_level,
    })
}
