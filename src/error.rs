//! Error types for the heading scraper.
//!
//! This module provides structured error handling with:
//! - `AppError`: Domain-specific errors for each pipeline stage
//! - `Result<T>`: Type alias for Results using AppError

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Domain-specific errors for scraper operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network request failed
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("HTTP {status} returned by {url}")]
    HttpStatus { status: u16, url: String },

    /// Acquisition did not finish within the configured limit
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Headless browser launch, navigation or snapshot failed
    #[error("Browser error: {0}")]
    Browser(String),

    /// Failed to parse HTML content or build a selector
    #[error("HTML parsing error: {0}")]
    Parse(String),

    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            return Self::HttpStatus {
                status: status.as_u16(),
                url: error.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        Self::Network(error.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_path() {
        let err = AppError::io(
            "/nope/titles.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/nope/titles.csv"), "got: {msg}");
        assert!(msg.contains("missing"));
    }

    #[test]
    fn http_status_display() {
        let err = AppError::HttpStatus {
            status: 503,
            url: "https://example.com/".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503 returned by https://example.com/");
    }
}
