//! Batch runner.
//!
//! Fans the targets of a run out over a bounded worker pool, one probe per
//! worker, and collects the verdicts in input order.

mod finalize;
mod resources;
mod task;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::app::{log_progress, shutdown_gracefully};
use crate::config::{Config, LOGGING_INTERVAL};
use crate::fetch::Fetch;
use crate::probe::{FailureReason, ProbeRecord, Verdict};

pub use finalize::{finalize_scan, into_input_order};
pub use resources::{collect_targets, init_scan_resources, ScanResources};
pub use task::{probe_target_task, record_url, record_verdict, TargetTaskParams};

/// Results of a scan run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Number of targets that produced a record
    pub total_urls: usize,
    /// Targets with `Detected`
    pub detected: usize,
    /// Targets with `NotDetected`
    pub not_detected: usize,
    /// Targets with `Failed`
    pub failed: usize,
    /// Result file, if one was written
    pub output_path: Option<PathBuf>,
    pub elapsed_seconds: f64,
    /// Every record, in input order
    pub records: Vec<ProbeRecord>,
}

/// Runs a scan with the provided configuration.
///
/// Reads the targets, probes them concurrently (at most
/// `config.max_concurrency` at a time), prints one line per target, and
/// writes the result file.
///
/// # Errors
///
/// Returns an error if the signature corpus or HTTP client cannot be
/// initialized, or the result file cannot be written. Per-target failures
/// never abort the run; they are reported as `Failed` verdicts.
///
/// # Example
///
/// ```no_run
/// use cms_sniffer::{run_scan, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     url: Some("example.com".to_string()),
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("{} detected", report.detected);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    run_scan_with_cancellation(config, CancellationToken::new()).await
}

/// Like [`run_scan`], but stops early once `cancel` fires.
///
/// Targets still in flight or not yet started when `cancel` fires (or the
/// configured deadline expires) are reported as `Failed(Cancelled)`.
pub async fn run_scan_with_cancellation(
    config: Config,
    cancel: CancellationToken,
) -> Result<ScanReport> {
    let targets = collect_targets(&config).await;
    info!("Total targets: {}", targets.len());

    let resources = init_scan_resources(&config)?;

    let deadline_task = config.deadline_seconds.map(|secs| {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            warn!("Deadline of {secs}s reached, cancelling outstanding probes");
            cancel.cancel();
        })
    });

    let indexed = scan_targets(targets, &resources, cancel).await;

    if let Some(task) = deadline_task {
        task.abort();
    }

    let elapsed_seconds = resources.start_time.elapsed().as_secs_f64();
    finalize_scan(
        &config,
        into_input_order(indexed),
        &resources.error_stats,
        elapsed_seconds,
    )
}

/// Probes every target and returns the records tagged with their input index.
pub async fn scan_targets<F: Fetch + 'static>(
    targets: Vec<String>,
    resources: &ScanResources<F>,
    cancel: CancellationToken,
) -> Vec<(usize, ProbeRecord)> {
    let total = targets.len();
    let mut tasks = FuturesUnordered::new();
    let mut results = Vec::with_capacity(total);

    let cancel_logging = CancellationToken::new();
    let logging_task = {
        let stop = cancel_logging.child_token();
        let completed = Arc::clone(&resources.completed_urls);
        let failed = Arc::clone(&resources.failed_urls);
        let start_time = resources.start_time;
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(LOGGING_INTERVAL);
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = interval.tick() => log_progress(start_time, &completed, &failed, total),
                    _ = stop.cancelled() => break,
                }
            }
        }))
    };

    for (index, target) in targets.into_iter().enumerate() {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            permit = Arc::clone(&resources.semaphore).acquire_owned() => permit.ok(),
        };
        let Some(permit) = permit else {
            let record = ProbeRecord::new(
                record_url(&target),
                Verdict::Failed(FailureReason::Cancelled),
            );
            record_verdict(
                &record,
                &resources.error_stats,
                &resources.completed_urls,
                &resources.failed_urls,
            );
            results.push((index, record));
            continue;
        };

        let params = TargetTaskParams {
            index,
            target: target.clone(),
            prober: Arc::clone(&resources.prober),
            permit,
            cancel: cancel.clone(),
            error_stats: Arc::clone(&resources.error_stats),
            completed_urls: Arc::clone(&resources.completed_urls),
            failed_urls: Arc::clone(&resources.failed_urls),
        };
        let handle = tokio::spawn(probe_target_task(params));
        tasks.push(async move { (index, target, handle.await) });
    }

    while let Some((index, target, joined)) = tasks.next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(join_error) => {
                warn!("Probe task for {} panicked: {:?}", target, join_error);
                let record = ProbeRecord::new(
                    record_url(&target),
                    Verdict::Failed(FailureReason::TaskPanicked),
                );
                record_verdict(
                    &record,
                    &resources.error_stats,
                    &resources.completed_urls,
                    &resources.failed_urls,
                );
                results.push((index, record));
            }
        }
    }

    shutdown_gracefully(cancel_logging, logging_task).await;
    log_progress(
        resources.start_time,
        &resources.completed_urls,
        &resources.failed_urls,
        total,
    );
    results
}
