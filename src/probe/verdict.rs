//! Verdicts and probe records.

use std::fmt;

use crate::error_handling::FetchError;

/// Literal rendered for [`Verdict::NotDetected`].
pub const NOT_DETECTED_TEXT: &str = "CMS not detected";

/// Why a probe produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// A fetch failed (network error or error status).
    Fetch(FetchError),
    /// The batch deadline expired or the run was cancelled.
    Cancelled,
    /// The target could not be turned into an http(s) URL.
    InvalidUrl(String),
    /// The worker probing the target panicked.
    TaskPanicked,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Fetch(error) => write!(f, "{error}"),
            FailureReason::Cancelled => f.write_str("Cancelled"),
            FailureReason::InvalidUrl(url) => write!(f, "Invalid URL: {url}"),
            FailureReason::TaskPanicked => f.write_str("Probe task panicked"),
        }
    }
}

impl From<FetchError> for FailureReason {
    fn from(error: FetchError) -> Self {
        FailureReason::Fetch(error)
    }
}

/// Final classification of one target URL. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Detected(String),
    NotDetected,
    Failed(FailureReason),
}

impl Verdict {
    /// Renders the verdict the way result files and console lines show it:
    /// the CMS name, `CMS not detected`, or `Error: <reason>`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn is_detected(&self) -> bool {
        matches!(self, Verdict::Detected(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Verdict::Failed(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Detected(cms) => f.write_str(cms),
            Verdict::NotDetected => f.write_str(NOT_DETECTED_TEXT),
            Verdict::Failed(reason) => write!(f, "Error: {reason}"),
        }
    }
}

/// The unit handed to the result sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRecord {
    pub url: String,
    pub verdict: Verdict,
}

impl ProbeRecord {
    pub fn new(url: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            url: url.into(),
            verdict,
        }
    }

    /// Console/TXT line: `URL: <url>, Detected CMS: <verdict>`.
    pub fn summary_line(&self) -> String {
        format!("URL: {}, Detected CMS: {}", self.url, self.verdict)
    }
}
