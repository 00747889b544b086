//! Scan finalization.
//!
//! Restores input order, prints and exports the records, and produces the
//! final report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use crate::app::{print_error_statistics, print_simple_summary};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::export::export_records;
use crate::probe::{ProbeRecord, Verdict};

use super::ScanReport;

/// Sorts indexed records back into input order.
pub fn into_input_order(mut indexed: Vec<(usize, ProbeRecord)>) -> Vec<ProbeRecord> {
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, record)| record).collect()
}

/// Prints every record, writes the result file and builds the report.
///
/// # Errors
///
/// Returns an error if the result file cannot be written.
pub fn finalize_scan(
    config: &Config,
    records: Vec<ProbeRecord>,
    error_stats: &ProcessingStats,
    elapsed_seconds: f64,
) -> Result<ScanReport> {
    for record in &records {
        println!("{}", record.summary_line());
    }

    let output_path = if records.is_empty() {
        info!("No targets probed, skipping result file");
        None
    } else {
        let path: PathBuf = config.resolved_output_path();
        export_records(&records, config.output_format, &path)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        Some(path)
    };

    let detected = records.iter().filter(|r| r.verdict.is_detected()).count();
    let failed = records.iter().filter(|r| r.verdict.is_failed()).count();
    let not_detected = records
        .iter()
        .filter(|r| r.verdict == Verdict::NotDetected)
        .count();

    print_error_statistics(error_stats);
    print_simple_summary(records.len(), detected, not_detected, failed, elapsed_seconds);

    Ok(ScanReport {
        total_urls: records.len(),
        detected,
        not_detected,
        failed,
        output_path,
        elapsed_seconds,
        records,
    })
}
