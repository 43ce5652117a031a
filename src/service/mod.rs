pub mod acquisition;
#[cfg(feature = "headless")]
pub mod browser;
pub mod http;
pub mod pipeline;

pub use acquisition::{source_for, DocumentSource, StaticFetcher};
#[cfg(feature = "headless")]
pub use browser::{BrowserSession, RenderedFetcher};
pub use pipeline::{run, run_with_source};
