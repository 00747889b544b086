//! Per-target task processing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::OwnedSemaphorePermit;
use tokio_util::sync::CancellationToken;

use crate::app::validate_and_normalize_url;
use crate::error_handling::{update_error_stats, ErrorType, InfoType, ProcessingStats};
use crate::fetch::Fetch;
use crate::probe::{FailureReason, ProbeOutcome, ProbeRecord, Prober, Verdict};

/// Everything one spawned worker needs.
pub struct TargetTaskParams<F> {
    pub index: usize,
    pub target: String,
    pub prober: Arc<Prober<F>>,
    pub permit: OwnedSemaphorePermit,
    pub cancel: CancellationToken,
    pub error_stats: Arc<ProcessingStats>,
    pub completed_urls: Arc<AtomicUsize>,
    pub failed_urls: Arc<AtomicUsize>,
}

/// Probes one target end to end and returns its record with its input index.
///
/// Cancellation while the probe is in flight yields `Failed(Cancelled)`.
pub async fn probe_target_task<F: Fetch>(params: TargetTaskParams<F>) -> (usize, ProbeRecord) {
    let TargetTaskParams {
        index,
        target,
        prober,
        permit: _permit,
        cancel,
        error_stats,
        completed_urls,
        failed_urls,
    } = params;

    let record = match validate_and_normalize_url(&target) {
        None => ProbeRecord::new(
            target.clone(),
            Verdict::Failed(FailureReason::InvalidUrl(target)),
        ),
        Some(url) => {
            let verdict = tokio::select! {
                biased;
                _ = cancel.cancelled() => Verdict::Failed(FailureReason::Cancelled),
                outcome = prober.probe_detailed(&url) => {
                    record_probe_counters(&error_stats, &outcome);
                    outcome.verdict
                }
            };
            ProbeRecord::new(url, verdict)
        }
    };

    record_verdict(&record, &error_stats, &completed_urls, &failed_urls);
    (index, record)
}

/// URL a record is keyed under: the normalized URL, or the raw target when
/// it cannot be normalized.
pub fn record_url(target: &str) -> String {
    validate_and_normalize_url(target).unwrap_or_else(|| target.to_string())
}

fn record_probe_counters(stats: &ProcessingStats, outcome: &ProbeOutcome) {
    for _ in 0..outcome.paths_probed {
        stats.increment_info(InfoType::PathProbed);
    }
    for _ in &outcome.skipped {
        stats.increment_info(InfoType::PathSkipped);
    }
}

/// Counts a finished record and logs its verdict.
pub fn record_verdict(
    record: &ProbeRecord,
    stats: &ProcessingStats,
    completed_urls: &AtomicUsize,
    failed_urls: &AtomicUsize,
) {
    match &record.verdict {
        Verdict::Detected(cms) => {
            stats.increment_info(InfoType::CmsDetected);
            completed_urls.fetch_add(1, Ordering::SeqCst);
            info!("{}: {}", record.url, cms);
        }
        Verdict::NotDetected => {
            stats.increment_info(InfoType::CmsNotDetected);
            completed_urls.fetch_add(1, Ordering::SeqCst);
            info!("{}: {}", record.url, record.verdict);
        }
        Verdict::Failed(reason) => {
            match reason {
                FailureReason::Fetch(error) => update_error_stats(stats, error),
                FailureReason::Cancelled => stats.increment_error(ErrorType::ProbeCancelled),
                FailureReason::InvalidUrl(_) => stats.increment_error(ErrorType::InvalidUrl),
                FailureReason::TaskPanicked => stats.increment_error(ErrorType::ProbeTaskPanicked),
            }
            failed_urls.fetch_add(1, Ordering::SeqCst);
            warn!("Failed to probe {}: {}", record.url, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FetchError;

    #[test]
    fn test_record_url() {
        assert_eq!(record_url("a.com"), "https://a.com");
        assert_eq!(record_url("http://a.com/"), "http://a.com/");
        assert_eq!(record_url("not a url!!"), "not a url!!");
    }

    #[test]
    fn test_record_verdict_counts() {
        let stats = ProcessingStats::new();
        let completed = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        for verdict in [
            Verdict::Detected("Ghost".to_string()),
            Verdict::NotDetected,
            Verdict::Failed(FetchError::HttpStatus(404).into()),
            Verdict::Failed(FailureReason::Cancelled),
            Verdict::Failed(FailureReason::InvalidUrl("x y".to_string())),
            Verdict::Failed(FailureReason::TaskPanicked),
        ] {
            record_verdict(
                &ProbeRecord::new("https://x", verdict),
                &stats,
                &completed,
                &failed,
            );
        }

        assert_eq!(completed.load(Ordering::SeqCst), 2);
        assert_eq!(failed.load(Ordering::SeqCst), 4);
        assert_eq!(stats.get_info_count(InfoType::CmsDetected), 1);
        assert_eq!(stats.get_info_count(InfoType::CmsNotDetected), 1);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestNotFound), 1);
        assert_eq!(stats.get_error_count(ErrorType::ProbeCancelled), 1);
        assert_eq!(stats.get_error_count(ErrorType::InvalidUrl), 1);
        assert_eq!(stats.get_error_count(ErrorType::ProbeTaskPanicked), 1);
    }
}
