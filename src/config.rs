//! Run configuration.
//!
//! `Cli` is what clap parses from arguments and environment; `ScrapeConfig`
//! is the validated form the pipeline consumes.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::domain::models::{FetchMode, HeadingLevels};
use crate::error::{AppError, Result};

pub const DEFAULT_OUTPUT: &str = "titles.csv";

#[derive(Debug, Parser)]
#[command(name = "heading-scraper", version, about)]
pub struct Cli {
    /// Page to scrape
    #[arg(long, env = "HEADING_SCRAPER_URL")]
    pub url: String,

    /// CSV file to write (overwritten if present)
    #[arg(short, long, env = "HEADING_SCRAPER_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// How to obtain the document
    #[arg(long, value_enum, env = "HEADING_SCRAPER_MODE", default_value_t = FetchMode::Static)]
    pub mode: FetchMode,

    /// Heading levels to extract, e.g. `1-5` or `2`
    #[arg(long, env = "HEADING_SCRAPER_LEVELS", default_value = "1-5")]
    pub levels: HeadingLevels,

    /// Give up on acquisition after this many seconds (no limit when unset)
    #[arg(long, env = "HEADING_SCRAPER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Chromium/Chrome executable for rendered mode
    #[arg(long = "chrome", env = "HEADING_SCRAPER_CHROME")]
    pub chrome_executable: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: Url,
    pub output: PathBuf,
    pub mode: FetchMode,
    pub levels: HeadingLevels,
    pub timeout: Option<Duration>,
    pub chrome_executable: Option<PathBuf>,
}

impl ScrapeConfig {
    /// Config with defaults for everything but the target URL.
    pub fn new(url: &str) -> Result<Self> {
        Ok(Self {
            url: parse_url(url)?,
            output: PathBuf::from(DEFAULT_OUTPUT),
            mode: FetchMode::default(),
            levels: HeadingLevels::default(),
            timeout: None,
            chrome_executable: None,
        })
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_levels(mut self, levels: HeadingLevels) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl TryFrom<Cli> for ScrapeConfig {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.timeout == Some(0) {
            return Err(AppError::config("timeout must be at least one second"));
        }
        if cli.output.as_os_str().is_empty() {
            return Err(AppError::config("output path is empty"));
        }

        Ok(Self {
            url: parse_url(&cli.url)?,
            output: cli.output,
            mode: cli.mode,
            levels: cli.levels,
            timeout: cli.timeout.map(Duration::from_secs),
            chrome_executable: cli.chrome_executable,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| AppError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidUrl(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["heading-scraper"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_original_script() {
        let config = ScrapeConfig::try_from(cli(&["--url", "https://example.com/"])).unwrap();
        assert_eq!(config.output, PathBuf::from("titles.csv"));
        assert_eq!(config.mode, FetchMode::Static);
        assert_eq!(config.levels, HeadingLevels::default());
        assert_eq!(config.timeout, None);
        assert!(config.chrome_executable.is_none());
    }

    #[test]
    fn all_flags() {
        let config = ScrapeConfig::try_from(cli(&[
            "--url",
            "http://localhost:8080/page",
            "-o",
            "out/h.csv",
            "--mode",
            "rendered",
            "--levels",
            "2-3",
            "--timeout",
            "15",
            "--chrome",
            "/usr/bin/chromium",
        ]))
        .unwrap();
        assert_eq!(config.url.as_str(), "http://localhost:8080/page");
        assert_eq!(config.output, PathBuf::from("out/h.csv"));
        assert_eq!(config.mode, FetchMode::Rendered);
        assert_eq!(config.levels, HeadingLevels::new(2, 3).unwrap());
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(
            config.chrome_executable,
            Some(PathBuf::from("/usr/bin/chromium"))
        );
    }

    #[test]
    fn url_is_required() {
        // Skip if the variable leaks in from the environment
        if std::env::var_os("HEADING_SCRAPER_URL").is_some() {
            return;
        }
        assert!(Cli::try_parse_from(["heading-scraper"]).is_err());
    }

    #[test]
    fn rejects_bad_url_and_zero_timeout() {
        assert!(matches!(
            ScrapeConfig::try_from(cli(&["--url", "not a url"])),
            Err(AppError::InvalidUrl(_))
        ));
        assert!(matches!(
            ScrapeConfig::try_from(cli(&["--url", "ftp://example.com/"])),
            Err(AppError::InvalidUrl(_))
        ));
        assert!(matches!(
            ScrapeConfig::try_from(cli(&["--url", "https://example.com", "--timeout", "0"])),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn bad_levels_fail_parsing() {
        let argv = ["heading-scraper", "--url", "https://example.com", "--levels", "3-9"];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
