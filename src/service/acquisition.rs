//! Document acquisition: one capability, two strategies.
//!
//! A `DocumentSource` turns a URL into a `Document`. `StaticFetcher` issues
//! a single GET and hands back the HTML; `RenderedFetcher` (feature
//! `headless`) lets Chromium run the page and reads headings from the live
//! DOM.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::ScrapeConfig;
use crate::domain::models::{Document, FetchMode};
use crate::error::{AppError, Result};
use crate::service::http::create_client;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the document behind `url`.
    async fn fetch(&self, url: &Url) -> Result<Document>;
}

/// Pick the source for the configured mode.
pub fn source_for(config: &ScrapeConfig) -> Result<Box<dyn DocumentSource>> {
    match config.mode {
        FetchMode::Static => Ok(Box::new(StaticFetcher::new(config.timeout)?)),
        #[cfg(feature = "headless")]
        FetchMode::Rendered => Ok(Box::new(crate::service::browser::RenderedFetcher::new(
            config.chrome_executable.clone(),
            config.timeout,
        ))),
        #[cfg(not(feature = "headless"))]
        FetchMode::Rendered => Err(AppError::config(
            "rendered mode needs the `headless` feature; rebuild with --features headless",
        )),
    }
}

// ============================================================================
// STATIC FETCH
// ============================================================================

pub struct StaticFetcher {
    client: Client,
    timeout: Option<Duration>,
}

impl StaticFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: create_client(timeout)?,
            timeout,
        })
    }
}

#[async_trait]
impl DocumentSource for StaticFetcher {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch(&self, url: &Url) -> Result<Document> {
        tracing::info!("[FETCH] GET {}", url);

        let response = self.client.get(url.as_str()).send().await.map_err(|e| {
            match self.timeout {
                Some(limit) if e.is_timeout() => AppError::Timeout(limit),
                _ => AppError::from(e),
            }
        })?;

        let status = response.status();
        tracing::debug!("[FETCH] {} answered {}", url, status);
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("[FETCH] Received {} bytes from {}", body.len(), url);
        Ok(Document::Html(body))
    }
}
