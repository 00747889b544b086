//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};

/// Prints a one-line summary of the run.
pub fn print_simple_summary(
    total_urls: usize,
    detected: usize,
    not_detected: usize,
    failed: usize,
    elapsed_seconds: f64,
) {
    info!(
        "✅ Probed {} URL{} ({} detected, {} not detected, {} failed) in {:.1}s",
        total_urls,
        if total_urls == 1 { "" } else { "s" },
        detected,
        not_detected,
        failed,
        elapsed_seconds
    );
}

/// Prints error and info counters to the log. Zero counters are omitted.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_empty() {
        print_error_statistics(&ProcessingStats::new());
    }

    #[test]
    fn test_print_error_statistics_mixed() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_error(ErrorType::HttpRequestNotFound);
        stats.increment_info(InfoType::CmsDetected);
        stats.increment_info(InfoType::PathProbed);
        print_error_statistics(&stats);
        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_info(), 2);
    }

    #[test]
    fn test_print_simple_summary() {
        print_simple_summary(0, 0, 0, 0, 0.0);
        print_simple_summary(3, 1, 1, 1, 2.5);
    }
}
