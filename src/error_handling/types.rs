//! Error type definitions.
//!
//! This module defines all error and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A classified failure of a single fetch.
///
/// Both variants end the probe of a URL under the fail-fast policy. They are
/// kept apart from "no match" so that failure statistics stay distinguishable
/// from true negatives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout or TLS failure.
    #[error("Network: {0}")]
    Network(String),

    /// The server answered with a status outside 200-399.
    #[error("HTTP status {0}")]
    HttpStatus(u16),
}

/// Error types for loading or validating a signature corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The signature file could not be read.
    #[error("Failed to read signature file: {0}")]
    Io(#[from] std::io::Error),

    /// The signature file is not a JSON array of entries.
    #[error("Failed to parse signature file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share the same CMS name.
    #[error("Duplicate CMS name in signature corpus: {0}")]
    DuplicateCms(String),

    /// An entry has an empty CMS name.
    #[error("Signature entry with empty CMS name")]
    EmptyName,

    /// An entry has no usable markers.
    #[error("Signature entry '{0}' has no markers")]
    NoMarkers(String),

    /// A marker could not be compiled into a pattern.
    #[error("Invalid marker '{marker}' for {cms}: {source}")]
    InvalidMarker {
        cms: String,
        marker: String,
        #[source]
        source: regex::Error,
    },
}

/// Error types for writing or reading result files.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Underlying file or stream error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Types of errors that can end the probe of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Network errors
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestDnsError,
    HttpRequestTlsError,
    HttpRequestOtherError,
    // Specific HTTP status code errors (common ones for better debugging)
    HttpRequestBadRequest,          // 400 Bad Request
    HttpRequestUnauthorized,        // 401 Unauthorized
    HttpRequestBotDetectionError,   // 403 Forbidden - typically bot detection
    HttpRequestNotFound,            // 404 Not Found
    HttpRequestTooManyRequests,     // 429 Too Many Requests
    HttpRequestInternalServerError, // 500 Internal Server Error
    HttpRequestBadGateway,          // 502 Bad Gateway
    HttpRequestServiceUnavailable,  // 503 Service Unavailable
    HttpRequestGatewayTimeout,      // 504 Gateway Timeout
    HttpRequestOtherStatus,
    // Input and lifecycle
    InvalidUrl,
    ProbeCancelled,
    ProbeTaskPanicked,
}

/// Types of informational metrics recorded while probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    CmsDetected,
    CmsNotDetected,
    PathProbed,
    PathSkipped, // failed path skipped under the lenient policy
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestDnsError => "DNS resolution error",
            ErrorType::HttpRequestTlsError => "TLS error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestBadRequest => "Bad Request (400)",
            ErrorType::HttpRequestUnauthorized => "Unauthorized (401)",
            ErrorType::HttpRequestBotDetectionError => "Bot detection (403 Forbidden)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestInternalServerError => "Internal Server Error (500)",
            ErrorType::HttpRequestBadGateway => "Bad Gateway (502)",
            ErrorType::HttpRequestServiceUnavailable => "Service Unavailable (503)",
            ErrorType::HttpRequestGatewayTimeout => "Gateway Timeout (504)",
            ErrorType::HttpRequestOtherStatus => "Other HTTP status error",
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::ProbeCancelled => "Probe cancelled",
            ErrorType::ProbeTaskPanicked => "Probe task panicked",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::CmsDetected => "CMS detected",
            InfoType::CmsNotDetected => "CMS not detected",
            InfoType::PathProbed => "Paths probed",
            InfoType::PathSkipped => "Failed paths skipped",
        }
    }
}
