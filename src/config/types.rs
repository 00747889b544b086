//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;
use strum_macros::{Display, EnumString};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_OUTPUT_STEM, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::export::OutputFormat;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// What the probe does when fetching one catalog path fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole probe on the first failed fetch and report `Failed`.
    #[default]
    FailFast,
    /// Record the failure, skip the path and keep walking the catalog.
    SkipFailedPath,
}

/// Which markers are tested against the `<meta name="generator">` content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MetaMatchMode {
    /// Only `generator:`-scoped markers are tested against generator content.
    #[default]
    GeneratorOnly,
    /// Body markers are tested against generator content too.
    Compatible,
}

/// Settings handed to the fetcher.
///
/// Kept separate from [`Config`] so tests can build a fetcher with a short
/// timeout without going through the CLI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Timeout applied to every single request
    pub timeout: Duration,
    /// Value of the `User-Agent` header sent with every request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without going through [`Opt`].
///
/// # Examples
///
/// ```no_run
/// use cms_sniffer::Config;
///
/// let config = Config {
///     url: Some("https://example.com".to_string()),
///     max_concurrency: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Single target URL
    pub url: Option<String>,

    /// File with one target URL per line
    pub list: Option<PathBuf>,

    /// Format of the result file
    pub output_format: OutputFormat,

    /// Result file path (defaults to `cms_detection.<ext>`)
    pub output_path: Option<PathBuf>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Maximum number of targets probed concurrently
    pub max_concurrency: usize,

    /// Behaviour when a single path fetch fails
    pub failure_policy: FailurePolicy,

    /// Which markers are tested against generator meta content
    pub meta_match_mode: MetaMatchMode,

    /// Test body markers against response headers as well
    pub match_headers: bool,

    /// Optional JSON file replacing the built-in signature corpus
    pub signatures: Option<PathBuf>,

    /// Global deadline for the whole batch, in seconds
    pub deadline_seconds: Option<u64>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            list: None,
            output_format: OutputFormat::Txt,
            output_path: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            failure_policy: FailurePolicy::FailFast,
            meta_match_mode: MetaMatchMode::GeneratorOnly,
            match_headers: true,
            signatures: None,
            deadline_seconds: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Builds the per-request settings used by the fetcher.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Returns the result file path, falling back to `cms_detection.<ext>`.
    pub fn resolved_output_path(&self) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}.{}",
                DEFAULT_OUTPUT_STEM,
                self.output_format.extension()
            ))
        })
    }
}

/// Command-line options.
#[derive(Debug, StructOpt)]
#[structopt(
    name = "cms_sniffer",
    about = "Detect the CMS behind a website by probing well-known paths."
)]
pub struct Opt {
    /// Single URL to detect CMS
    #[structopt(short = "u", long = "url")]
    pub url: Option<String>,

    /// File with list of URLs to detect CMS (one per line)
    #[structopt(short = "l", long = "list", parse(from_os_str))]
    pub list: Option<PathBuf>,

    /// Output format
    #[structopt(
        short = "o",
        long = "output",
        default_value = "txt",
        possible_values = &["txt", "csv", "json"],
        case_insensitive = true
    )]
    pub output: OutputFormat,

    /// Output file (defaults to cms_detection.<format>)
    #[structopt(long = "output-file", parse(from_os_str))]
    pub output_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[structopt(long = "timeout-seconds", default_value = "10")]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value (defaults to a desktop Chrome string)
    #[structopt(long = "user-agent")]
    pub user_agent: Option<String>,

    /// Maximum number of URLs probed concurrently
    #[structopt(long = "max-concurrency", default_value = "10")]
    pub max_concurrency: usize,

    /// Keep probing the remaining paths when one path fails instead of giving up on the URL
    #[structopt(long = "skip-failed-paths")]
    pub skip_failed_paths: bool,

    /// Also test generic markers against the generator meta tag content
    #[structopt(long = "legacy-meta-matching")]
    pub legacy_meta_matching: bool,

    /// Do not test markers against response headers
    #[structopt(long = "no-header-matching")]
    pub no_header_matching: bool,

    /// JSON file with signature entries replacing the built-in corpus
    #[structopt(long = "signatures", parse(from_os_str))]
    pub signatures: Option<PathBuf>,

    /// Abort outstanding probes after this many seconds
    #[structopt(long = "deadline-seconds")]
    pub deadline_seconds: Option<u64>,

    /// Log level
    #[structopt(
        long = "log-level",
        default_value = "info",
        possible_values = &["error", "warn", "info", "debug", "trace"],
        case_insensitive = true
    )]
    pub log_level: LogLevel,

    /// Log format
    #[structopt(
        long = "log-format",
        default_value = "plain",
        possible_values = &["plain", "json"],
        case_insensitive = true
    )]
    pub log_format: LogFormat,
}

impl Opt {
    /// Converts parsed CLI options into the library configuration.
    pub fn into_config(self) -> Config {
        Config {
            url: self.url,
            list: self.list,
            output_format: self.output,
            output_path: self.output_file,
            timeout_seconds: self.timeout_seconds,
            user_agent: self
                .user_agent
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            max_concurrency: self.max_concurrency.max(1),
            failure_policy: if self.skip_failed_paths {
                FailurePolicy::SkipFailedPath
            } else {
                FailurePolicy::FailFast
            },
            meta_match_mode: if self.legacy_meta_matching {
                MetaMatchMode::Compatible
            } else {
                MetaMatchMode::GeneratorOnly
            },
            match_headers: !self.no_header_matching,
            signatures: self.signatures,
            deadline_seconds: self.deadline_seconds,
            log_level: self.log_level,
            log_format: self.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_level_parse_case_insensitive() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Plain".parse::<LogFormat>().unwrap(), LogFormat::Plain);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.output_format, OutputFormat::Txt);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert_eq!(config.meta_match_mode, MetaMatchMode::GeneratorOnly);
        assert!(config.match_headers);
        assert!(!config.user_agent.trim().is_empty());
    }

    #[test]
    fn test_fetch_config_from_config() {
        let config = Config {
            timeout_seconds: 3,
            user_agent: "probe/1.0".to_string(),
            ..Default::default()
        };
        let fetch = config.fetch_config();
        assert_eq!(fetch.timeout, Duration::from_secs(3));
        assert_eq!(fetch.user_agent, "probe/1.0");
    }

    #[test]
    fn test_resolved_output_path_follows_format() {
        let config = Config {
            output_format: OutputFormat::Csv,
            ..Default::default()
        };
        assert_eq!(
            config.resolved_output_path(),
            PathBuf::from("cms_detection.csv")
        );

        let config = Config {
            output_format: OutputFormat::Json,
            output_path: Some(PathBuf::from("/tmp/out.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_output_path(),
            PathBuf::from("/tmp/out.json")
        );
    }

    #[test]
    fn test_opt_into_config_flags() {
        let opt = Opt::from_iter(vec![
            "cms_sniffer",
            "-u",
            "example.com",
            "-o",
            "json",
            "--skip-failed-paths",
            "--legacy-meta-matching",
            "--no-header-matching",
            "--max-concurrency",
            "0",
        ]);
        let config = opt.into_config();
        assert_eq!(config.url.as_deref(), Some("example.com"));
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.failure_policy, FailurePolicy::SkipFailedPath);
        assert_eq!(config.meta_match_mode, MetaMatchMode::Compatible);
        assert!(!config.match_headers);
        assert_eq!(config.max_concurrency, 1);
    }

    #[test]
    fn test_opt_defaults() {
        let config = Opt::from_iter(vec!["cms_sniffer", "-l", "urls.txt"]).into_config();
        assert_eq!(config.list, Some(PathBuf::from("urls.txt")));
        assert_eq!(config.output_format, OutputFormat::Txt);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
    }

    #[test]
    fn test_opt_rejects_unknown_output_format() {
        let result = Opt::from_iter_safe(vec!["cms_sniffer", "-u", "x.com", "-o", "xml"]);
        assert!(result.is_err());
    }
}
