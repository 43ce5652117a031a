use reqwest::Client;
use std::time::Duration;

use crate::error::{AppError, Result};

/// Build the HTTP client used for static fetches.
///
/// Default client configuration: no custom headers, no retry. A timeout is
/// only applied when one is configured.
pub fn create_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| AppError::network(format!("Failed to build HTTP client: {e}")))
}
