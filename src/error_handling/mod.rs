//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (fetch, corpus, export, initialization)
//! - Classification of transport errors into `FetchError`
//! - Processing statistics tracking (errors and info metrics)
//!
//! Error types are categorized into:
//! - **Errors**: Failures that end the probe of a URL
//! - **Info**: Informational metrics (detections, paths probed, etc.)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_fetch_error, classify_reqwest_error, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{
    CorpusError, ErrorType, ExportError, FetchError, InfoType, InitializationError,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestTimeoutError), 1);

        stats.increment_info(InfoType::CmsDetected);
        assert_eq!(stats.get_info_count(InfoType::CmsDetected), 1);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_error(ErrorType::ProbeCancelled);
        stats.increment_info(InfoType::PathProbed);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        use std::sync::Arc;

        let stats = Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.increment_info(InfoType::PathProbed);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_info_count(InfoType::PathProbed), 800);
    }
}
