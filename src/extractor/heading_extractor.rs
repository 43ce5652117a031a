use scraper::{Html, Selector};

use crate::domain::models::{Document, HeadingLevels, HeadingRecord, LiveHeadings};
use crate::error::{AppError, Result};

/// Extract headings from whatever acquisition produced.
pub fn extract_from_document(document: &Document, levels: HeadingLevels) -> Result<Vec<HeadingRecord>> {
    match document {
        Document::Html(html) => extract_headings(html, levels),
        Document::Live(live) => extract_live_headings(live, levels),
    }
}

/// Pure function: given HTML, extract headings.
///
/// Titles are the concatenated descendant text, untrimmed.
pub fn extract_headings(html: &str, levels: HeadingLevels) -> Result<Vec<HeadingRecord>> {
    let document = Html::parse_document(html);

    collect_levels(levels, |level| {
        let selector = heading_selector(level)?;
        Ok(document
            .select(&selector)
            .map(|element| HeadingRecord {
                tag: element.value().name().to_string(),
                title: element.text().collect::<String>(),
            })
            .collect())
    })
}

/// Headings a browser already read from the rendered DOM, regrouped for
/// the configured levels.
pub fn extract_live_headings(live: &LiveHeadings, levels: HeadingLevels) -> Result<Vec<HeadingRecord>> {
    collect_levels(levels, |level| Ok(live.level(level).to_vec()))
}

/// Walk levels in ascending order, appending each level's matches in the
/// order `query` returns them. Every `h1` therefore precedes every `h2`
/// regardless of where they sit in the page.
pub fn collect_levels<F>(levels: HeadingLevels, mut query: F) -> Result<Vec<HeadingRecord>>
where
    F: FnMut(u8) -> Result<Vec<HeadingRecord>>,
{
    let mut results = vec![];

    for level in levels.iter() {
        let matched = query(level)?;
        tracing::trace!("[EXTRACT] h{}: {} element(s)", level, matched.len());
        results.extend(matched);
    }

    tracing::debug!("[EXTRACT] {} heading(s) for levels {}", results.len(), levels);
    Ok(results)
}

/// Count records per configured level, ascending. Levels with no
/// headings are reported with a zero count.
pub fn level_counts(records: &[HeadingRecord], levels: HeadingLevels) -> Vec<(u8, usize)> {
    levels
        .iter()
        .map(|level| {
            let count = records
                .iter()
                .filter(|record| record.level() == Some(level))
                .count();
            (level, count)
        })
        .collect()
}

fn heading_selector(level: u8) -> Result<Selector> {
    let css = format!("h{level}");
    Selector::parse(&css).map_err(|e| AppError::Parse(format!("selector '{css}': {e}")))
}
