//! Fetching probe paths.
//!
//! This module provides:
//! - The [`Fetch`] trait the probe orchestrator is generic over
//! - [`HttpFetcher`], the `reqwest`-backed implementation
//! - URL joining for catalog paths

mod types;

pub use types::ProbeResponse;

use std::future::Future;
use std::sync::Arc;

use log::debug;

use crate::config::{FetchConfig, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{classify_reqwest_error, FetchError, InitializationError};
use crate::initialization::init_client;

/// Performs a single GET and returns a normalized response or a classified failure.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<ProbeResponse, FetchError>> + Send;
}

/// Joins a target base and a catalog path.
///
/// Trailing slashes are stripped from the base and exactly one `/` separates
/// it from the path, so the empty path yields the site root with a trailing slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// `reqwest`-backed fetcher sharing one connection pool across probes.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    max_body_size: usize,
}

impl HttpFetcher {
    /// Builds a fetcher with its own client configured from `config`.
    pub fn new(config: &FetchConfig) -> Result<Self, InitializationError> {
        Ok(Self::with_client(init_client(config)?))
    }

    /// Wraps an existing client.
    pub fn with_client(client: Arc<reqwest::Client>) -> Self {
        Self {
            client,
            max_body_size: MAX_RESPONSE_BODY_SIZE,
        }
    }

    /// Overrides the body size cap.
    #[must_use]
    pub fn max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    async fn read_body(
        &self,
        mut response: reqwest::Response,
        url: &str,
    ) -> Result<String, FetchError> {
        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| classify_reqwest_error(&e))?
        {
            let remaining = self.max_body_size.saturating_sub(buf.len());
            if chunk.len() >= remaining {
                buf.extend_from_slice(&chunk[..remaining]);
                debug!(
                    "Truncated body of {} at {} bytes",
                    url, self.max_body_size
                );
                break;
            }
            buf.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<ProbeResponse, FetchError>> + Send {
        async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| classify_reqwest_error(&e))?;

            let status = response.status();
            if !(status.is_success() || status.is_redirection()) {
                debug!("{} answered {}", url, status);
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            let mut probe_response =
                ProbeResponse::new(status.as_u16(), response.url().as_str(), String::new());
            for (name, value) in response.headers() {
                probe_response.insert_header(name.as_str(), &String::from_utf8_lossy(value.as_bytes()));
            }
            probe_response.body = self.read_body(response, url).await?;

            debug!(
                "Fetched {} ({}, {} bytes)",
                url,
                probe_response.status_code,
                probe_response.body.len()
            );
            Ok(probe_response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_fetcher(timeout: Duration) -> HttpFetcher {
        HttpFetcher::new(&FetchConfig {
            timeout,
            user_agent: "cms_sniffer_test/1.0".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://x", ""), "http://x/");
        assert_eq!(join_url("http://x/", "robots.txt"), "http://x/robots.txt");
        assert_eq!(join_url("http://x///", "wp-admin"), "http://x/wp-admin");
        assert_eq!(
            join_url("https://x.com/blog/", "feed"),
            "https://x.com/blog/feed"
        );
    }

    #[tokio::test]
    async fn test_fetch_success_normalizes_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .and(header("user-agent", "cms_sniffer_test/1.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("X-Powered-By", "Django")
                    .set_body_string("User-agent: *"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = test_fetcher(Duration::from_secs(5));
        let response = fetcher
            .fetch(&join_url(&server.uri(), "robots.txt"))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "User-agent: *");
        assert_eq!(
            response.headers.get("x-powered-by").map(String::as_str),
            Some("Django")
        );
        assert!(response.final_url.ends_with("/robots.txt"));
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let fetcher = test_fetcher(Duration::from_secs(5));
        let result = fetcher.fetch(&join_url(&server.uri(), "")).await;
        assert_eq!(result, Err(FetchError::HttpStatus(503)));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_classified() {
        let server = MockServer::start().await;
        let fetcher = test_fetcher(Duration::from_secs(5));
        // No mocks mounted: wiremock answers 404.
        let result = fetcher.fetch(&join_url(&server.uri(), "admin")).await;
        assert_eq!(result, Err(FetchError::HttpStatus(404)));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let fetcher = test_fetcher(Duration::from_millis(200));
        let result = fetcher.fetch(&join_url(&server.uri(), "")).await;
        assert_eq!(result, Err(FetchError::Network("timeout".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_truncates_large_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("a".repeat(4096)))
            .mount(&server)
            .await;

        let fetcher = test_fetcher(Duration::from_secs(5)).max_body_size(100);
        let response = fetcher.fetch(&join_url(&server.uri(), "")).await.unwrap();
        assert_eq!(response.body.len(), 100);
    }
}
