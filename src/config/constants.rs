//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits, and output defaults.

use std::time::Duration;

/// Per-request timeout in seconds.
///
/// Every fetch carries this timeout unless overridden via `--timeout-seconds`,
/// so no probe can hang on an unresponsive host.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default number of target URLs probed concurrently.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Default User-Agent string for HTTP requests.
///
/// Some hosts reject requests that carry no User-Agent or an obviously
/// scripted one, so every probe identifies itself as a desktop browser.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// File stem used for the result file when `--output-file` is not given.
/// The extension follows the selected output format (`cms_detection.csv`, ...).
pub const DEFAULT_OUTPUT_STEM: &str = "cms_detection";

// Response and body size limits
/// Maximum response body size in bytes (2MB).
/// Bodies larger than this are truncated before matching to bound memory use.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Redirect handling
/// Maximum number of redirect hops to follow per fetch.
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Interval between progress log lines while a batch is running.
pub const LOGGING_INTERVAL: Duration = Duration::from_secs(5);
