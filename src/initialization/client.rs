//! HTTP client initialization.

use std::sync::Arc;

use reqwest::redirect::Policy;
use reqwest::ClientBuilder;

use crate::config::{FetchConfig, MAX_REDIRECT_HOPS};
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used by every probe.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the fetch configuration
/// - Timeout from the fetch configuration (applies to the whole request)
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS` hops)
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &FetchConfig) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .redirect(Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;
    Ok(Arc::new(client))
}
