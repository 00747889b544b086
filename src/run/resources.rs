//! Scan resources.
//!
//! Holds everything a batch needs while its workers run: the shared prober,
//! the concurrency limiter, statistics and progress counters.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{error, info};
use tokio::sync::Semaphore;

use crate::app::read_url_list;
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::fetch::{Fetch, HttpFetcher};
use crate::fingerprint::{load_corpus, MatchOptions, Matcher, PathCatalog};
use crate::initialization::init_semaphore;
use crate::probe::Prober;

/// Resources shared by every worker of one scan.
pub struct ScanResources<F> {
    /// Read-only prober shared by all workers
    pub prober: Arc<Prober<F>>,
    /// Bounds the number of targets probed at once
    pub semaphore: Arc<Semaphore>,
    /// Error and info counters
    pub error_stats: Arc<ProcessingStats>,
    /// Targets that produced a verdict other than `Failed`
    pub completed_urls: Arc<AtomicUsize>,
    /// Targets that produced `Failed`
    pub failed_urls: Arc<AtomicUsize>,
    pub start_time: Instant,
}

impl<F: Fetch> ScanResources<F> {
    pub fn new(prober: Prober<F>, max_concurrency: usize) -> Self {
        Self {
            prober: Arc::new(prober),
            semaphore: init_semaphore(max_concurrency),
            error_stats: Arc::new(ProcessingStats::new()),
            completed_urls: Arc::new(AtomicUsize::new(0)),
            failed_urls: Arc::new(AtomicUsize::new(0)),
            start_time: Instant::now(),
        }
    }
}

/// Builds the corpus, catalog, fetcher and prober described by `config`.
///
/// # Errors
///
/// Returns an error if the signature file cannot be loaded or the HTTP client
/// cannot be built.
pub fn init_scan_resources(config: &Config) -> Result<ScanResources<HttpFetcher>> {
    let corpus = load_corpus(config.signatures.as_deref())
        .context("Failed to load signature corpus")?;
    let catalog = PathCatalog::builtin();
    info!(
        "Loaded {} signatures and {} probe paths",
        corpus.len(),
        catalog.len()
    );

    let fetcher =
        HttpFetcher::new(&config.fetch_config()).context("Failed to initialize HTTP client")?;
    let matcher = Matcher::new(
        Arc::new(corpus),
        MatchOptions {
            meta_match_mode: config.meta_match_mode,
            match_headers: config.match_headers,
        },
    );
    let prober = Prober::new(
        fetcher,
        matcher,
        Arc::new(catalog),
        config.failure_policy,
    );
    Ok(ScanResources::new(prober, config.max_concurrency))
}

/// Collects the raw targets of a run: the single URL first, then the list.
///
/// A list file that cannot be read is reported once and otherwise ignored.
pub async fn collect_targets(config: &Config) -> Vec<String> {
    let mut targets = Vec::new();
    if let Some(url) = config.url.as_deref().map(str::trim) {
        if !url.is_empty() {
            targets.push(url.to_string());
        }
    }
    if let Some(list) = config.list.as_deref() {
        match read_url_list(list).await {
            Ok(urls) => {
                info!("Read {} URLs from {}", urls.len(), list.display());
                targets.extend(urls);
            }
            Err(e) => error!("{e:#}"),
        }
    }
    targets
}
