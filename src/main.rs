//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `cms_sniffer` library: parses arguments,
//! initializes logging, wires Ctrl-C to cancellation and prints a summary.

use anyhow::{Context, Result};
use std::process;
use structopt::StructOpt;
use tokio_util::sync::CancellationToken;

use cms_sniffer::initialization::init_logger_with;
use cms_sniffer::{run_scan_with_cancellation, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Opt::from_args().into_config();

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    if config.url.is_none() && config.list.is_none() {
        eprintln!("Nothing to do: pass a URL with --url or a URL list with --list");
        process::exit(2);
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling outstanding probes");
            ctrl_c.cancel();
        }
    });

    match run_scan_with_cancellation(config, cancel).await {
        Ok(report) => {
            println!(
                "✅ Probed {} URL{} ({} detected, {} not detected, {} failed) in {:.1}s",
                report.total_urls,
                if report.total_urls == 1 { "" } else { "s" },
                report.detected,
                report.not_detected,
                report.failed,
                report.elapsed_seconds
            );
            if let Some(path) = &report.output_path {
                println!("Results saved in {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("cms_sniffer error: {:#}", e);
            process::exit(1);
        }
    }
}
