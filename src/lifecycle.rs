//! Process setup for the command-line binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset, empty or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "info,heading_scraper=debug,chromiumoxide=warn";

/// Initialize logging with tracing_subscriber.
///
/// `RUST_LOG` replaces the defaults entirely when it is set. Output goes to
/// stderr so nothing is interleaved with data on stdout.
pub fn init_logging() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|spec| !spec.is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
