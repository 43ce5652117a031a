//! Scrape heading elements from one web page into a `tag,title` CSV file.
//!
//! The document is acquired either with a plain HTTP GET or through a
//! headless Chromium (feature `headless`), then extracted once and written once.

pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod lifecycle;
pub mod repository;
pub mod service;

pub use config::{Cli, ScrapeConfig};
pub use domain::models::{Document, FetchMode, HeadingLevels, HeadingRecord, LiveHeadings, ScrapeSummary};
pub use error::{AppError, Result};
pub use service::pipeline::run;
