//! Rendered acquisition through a headless Chromium.
//!
//! Headings are read from the live DOM after navigation, with the visible
//! text of each element as its title. The browser process is owned by a
//! `BrowserSession`. `close()` is awaited on both the success and the error
//! path; if the session is dropped instead (panic, cancelled future) the
//! handler task is aborted and chromiumoxide kills the child process on drop.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

use crate::domain::models::{Document, HeadingRecord, LiveHeadings};
use crate::error::{AppError, Result};
use crate::service::acquisition::DocumentSource;

const BROWSER_ARGS: [&str; 4] = [
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--disable-extensions",
    "--no-first-run",
];

/// One list per level h1..h6, each in document order. Hidden elements
/// (no layout boxes, `visibility: hidden`, zero opacity) report an empty
/// title; visible ones report their trimmed `innerText`.
const HEADINGS_SCRIPT: &str = r#"
(() => {
  const visibleText = (el) => {
    const style = window.getComputedStyle(el);
    if (
      el.getClientRects().length === 0 ||
      style.visibility === 'hidden' ||
      style.visibility === 'collapse' ||
      style.opacity === '0'
    ) {
      return '';
    }
    return el.innerText.trim();
  };
  return [1, 2, 3, 4, 5, 6].map((level) =>
    Array.from(document.querySelectorAll('h' + level), (el) => ({
      tag: el.tagName.toLowerCase(),
      title: visibleText(el),
    }))
  );
})()
"#;

pub struct RenderedFetcher {
    chrome_executable: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl RenderedFetcher {
    pub fn new(chrome_executable: Option<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            chrome_executable,
            timeout,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder().args(BROWSER_ARGS);
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.request_timeout(timeout);
        }
        builder
            .build()
            .map_err(|e| AppError::browser(format!("Browser config error: {e}")))
    }
}

#[async_trait]
impl DocumentSource for RenderedFetcher {
    fn name(&self) -> &'static str {
        "rendered"
    }

    async fn fetch(&self, url: &Url) -> Result<Document> {
        let config = self.browser_config()?;
        let session = bounded(self.timeout, BrowserSession::launch(config)).await?;
        let live = render_and_close(session, url, self.timeout).await?;
        Ok(Document::Live(live))
    }
}

/// Run `fut` under the optional time limit.
async fn bounded<T>(limit: Option<Duration>, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| AppError::Timeout(limit))?,
        None => fut.await,
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// A launched browser that can read headings from a page and be shut down.
#[async_trait]
pub trait RenderSession: Send + Sync {
    /// Navigate to `url`, wait for the load and read every heading.
    async fn headings(&self, url: &Url) -> Result<LiveHeadings>;

    /// Stop the browser. Must be safe to call more than once.
    async fn close(&mut self);
}

/// Read headings, then close the session whatever the outcome.
pub async fn render_and_close<S: RenderSession>(
    mut session: S,
    url: &Url,
    limit: Option<Duration>,
) -> Result<LiveHeadings> {
    let rendered = bounded(limit, session.headings(url)).await;
    session.close().await;
    rendered
}

/// A running headless browser plus the task that drives its CDP connection.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    closed: bool,
}

impl BrowserSession {
    pub async fn launch(config: BrowserConfig) -> Result<Self> {
        tracing::debug!("[RENDER] Launching headless browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AppError::browser(format!("Failed to launch browser: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("[RENDER] CDP handler: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler,
            closed: false,
        })
    }
}

#[async_trait]
impl RenderSession for BrowserSession {
    async fn headings(&self, url: &Url) -> Result<LiveHeadings> {
        tracing::info!("[RENDER] Navigating to {}", url);
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::browser(format!("Failed to create page: {e}")))?;

        page.goto(url.as_str())
            .await
            .map_err(|e| AppError::browser(format!("Failed to navigate to {url}: {e}")))?;

        let by_level: Vec<Vec<HeadingRecord>> = page
            .evaluate(HEADINGS_SCRIPT)
            .await
            .map_err(|e| AppError::browser(format!("Failed to query headings: {e}")))?
            .into_value()
            .map_err(|e| AppError::Parse(format!("Unexpected heading query result: {e}")))?;

        tracing::debug!(
            "[RENDER] Live DOM has {} heading(s)",
            by_level.iter().map(Vec::len).sum::<usize>()
        );
        LiveHeadings::from_levels(by_level)
    }

    /// Ask the browser to exit and reap the process. Failures are logged,
    /// never returned, so they can't mask the render result.
    async fn close(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.browser.close().await {
            tracing::warn!("[RENDER] Browser close failed: {}", e);
        }
        match self.browser.wait().await {
            Ok(status) => tracing::debug!("[RENDER] Browser exited: {:?}", status),
            Err(e) => tracing::warn!("[RENDER] Waiting for browser exit failed: {}", e),
        }
        self.closed = true;
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        if !self.closed {
            tracing::warn!("[RENDER] Browser session dropped without close; killing browser");
        }
    }
}
