//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - The library `Config` and the per-request `FetchConfig`
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    Config, FailurePolicy, FetchConfig, LogFormat, LogLevel, MetaMatchMode, Opt,
};
