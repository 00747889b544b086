//! Batch input and run-time reporting helpers.
//!
//! This module provides target validation, URL list reading, progress logging,
//! shutdown handling and end-of-run statistics.

pub mod input;
pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

pub use input::read_url_list;
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_error_statistics, print_simple_summary};
pub use url::validate_and_normalize_url;
