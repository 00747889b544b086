//! Progress logging.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Logs how many targets have finished since `start_time`.
pub fn log_progress(
    start_time: Instant,
    completed: &AtomicUsize,
    failed: &AtomicUsize,
    total: usize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Probed {}/{} targets ({} failed) in {:.2} seconds (~{:.2} targets/sec)",
        done,
        total,
        failed.load(Ordering::SeqCst),
        elapsed_secs,
        rate
    );
}
