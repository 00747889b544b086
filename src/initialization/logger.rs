//! Logger setup for scan runs.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};
use serde::Serialize;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies that are chatty at `debug` while parsing pages or pooling
/// connections, with the most verbose level kept for each.
const DEPENDENCY_LEVELS: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
];

#[derive(Serialize)]
struct JsonLine<'a> {
    ts: i64,
    level: &'a str,
    module: &'a str,
    msg: &'a str,
}

/// Installs the global logger.
///
/// `RUST_LOG` is read first so per-module directives still apply, then
/// `level` overrides the default level for everything else.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already set.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in DEPENDENCY_LEVELS {
        builder.filter_module(module, level.min(*cap));
    }

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            let line = json_line(
                chrono::Utc::now().timestamp_millis(),
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            writeln!(buf, "{line}")
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            let line = plain_line(record.level(), record.target(), &record.args().to_string());
            writeln!(buf, "{line}")
        }),
    };

    builder.try_init()?;
    Ok(())
}

/// Module path relative to this crate; dependency targets are left alone.
fn short_module(target: &str) -> &str {
    match target.strip_prefix(env!("CARGO_CRATE_NAME")) {
        Some("") => "main",
        Some(rest) => rest.strip_prefix("::").unwrap_or(rest),
        None => target,
    }
}

fn json_line(ts: i64, level: Level, target: &str, msg: &str) -> String {
    let line = JsonLine {
        ts,
        level: level.as_str(),
        module: short_module(target),
        msg,
    };
    serde_json::to_string(&line).unwrap_or_default()
}

fn plain_line(level: Level, target: &str, msg: &str) -> String {
    let tag = format!("{:<5}", level.as_str());
    let tag = match level {
        Level::Error => tag.red().bold(),
        Level::Warn => tag.yellow(),
        Level::Info => tag.green(),
        Level::Debug => tag.blue(),
        Level::Trace => tag.dimmed(),
    };
    format!("{} {} {}", tag, short_module(target).cyan(), msg)
}
