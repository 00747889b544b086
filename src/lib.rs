//! cms_sniffer library: CMS detection by probing well-known paths
//!
//! A target URL is probed path by path (site root first, then files such as
//! `robots.txt` or `wp-login.php`). Every response is matched against a
//! corpus of CMS signatures; the first match wins and ends the probe.
//!
//! # Example
//!
//! ```no_run
//! use cms_sniffer::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     url: Some("https://example.com".to_string()),
//!     max_concurrency: 4,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!(
//!     "Probed {} URLs: {} detected, {} failed",
//!     report.total_urls, report.detected, report.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Probing is async and requires a Tokio runtime.

mod app;
pub mod config;
mod error_handling;
pub mod export;
mod fetch;
mod fingerprint;
pub mod initialization;
mod probe;
mod run;

// Re-export public API
pub use app::{read_url_list, validate_and_normalize_url};
pub use config::{Config, FailurePolicy, FetchConfig, LogFormat, LogLevel, MetaMatchMode, Opt};
pub use error_handling::{
    categorize_fetch_error, CorpusError, ErrorType, ExportError, FetchError, InfoType,
    InitializationError, ProcessingStats,
};
pub use export::{export_records, read_json_records, write_records, OutputFormat};
pub use fetch::{join_url, Fetch, HttpFetcher, ProbeResponse};
pub use fingerprint::{
    extract_generator, load_corpus, MatchOptions, Matcher, PathCatalog, Signature,
    SignatureCorpus, SignatureEntry,
};
pub use probe::{FailureReason, ProbeOutcome, ProbeRecord, ProbeState, Prober, Verdict};
pub use run::{run_scan, run_scan_with_cancellation, ScanReport};
