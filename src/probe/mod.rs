//! Probing a single target URL.
//!
//! This module provides:
//! - [`Verdict`], [`FailureReason`] and [`ProbeRecord`]
//! - The [`Prober`] state machine that walks the path catalog

mod orchestrator;
mod verdict;

pub use orchestrator::{ProbeOutcome, ProbeState, Prober};
pub use verdict::{FailureReason, ProbeRecord, Verdict};
