//! Probe orchestrator: walks the path catalog for one target.
//!
//! States: `Pending -> Probing(i) -> {Detected | Exhausted | Errored}`.
//! The first match ends the probe; later paths are never requested.

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::FailurePolicy;
use crate::error_handling::FetchError;
use crate::fetch::{join_url, Fetch};
use crate::fingerprint::{Matcher, PathCatalog};
use crate::probe::verdict::Verdict;

/// Orchestrator state for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeState {
    Pending,
    Probing(usize),
    Detected(String),
    Exhausted,
    Errored(FetchError),
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeState::Pending => f.write_str("pending"),
            ProbeState::Probing(index) => write!(f, "probing[{index}]"),
            ProbeState::Detected(cms) => write!(f, "detected({cms})"),
            ProbeState::Exhausted => f.write_str("exhausted"),
            ProbeState::Errored(error) => write!(f, "errored({error})"),
        }
    }
}

impl ProbeState {
    /// Maps a terminal state to its verdict. Non-terminal states have none.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            ProbeState::Detected(cms) => Some(Verdict::Detected(cms.clone())),
            ProbeState::Exhausted => Some(Verdict::NotDetected),
            ProbeState::Errored(error) => Some(Verdict::Failed(error.clone().into())),
            ProbeState::Pending | ProbeState::Probing(_) => None,
        }
    }
}

/// What a probe produced, plus the counters the batch runner aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub verdict: Verdict,
    /// Number of fetches issued.
    pub paths_probed: usize,
    /// Failures tolerated under [`FailurePolicy::SkipFailedPath`].
    pub skipped: Vec<FetchError>,
}

/// Runs the probe of one target URL. Shared read-only between workers.
pub struct Prober<F> {
    fetcher: F,
    matcher: Matcher,
    catalog: Arc<PathCatalog>,
    policy: FailurePolicy,
}

impl<F: Fetch> Prober<F> {
    pub fn new(
        fetcher: F,
        matcher: Matcher,
        catalog: Arc<PathCatalog>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            fetcher,
            matcher,
            catalog,
            policy,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Probes `target` and returns its verdict.
    pub async fn probe(&self, target: &str) -> Verdict {
        self.probe_detailed(target).await.verdict
    }

    /// Probes `target`, also reporting how many paths were fetched and which
    /// failures were skipped.
    pub async fn probe_detailed(&self, target: &str) -> ProbeOutcome {
        let mut state = ProbeState::Pending;
        let mut paths_probed = 0;
        let mut skipped = Vec::new();
        let mut any_success = false;

        for (index, path) in self.catalog.paths().iter().enumerate() {
            transition(target, &mut state, ProbeState::Probing(index));
            let url = join_url(target, path);
            paths_probed += 1;

            match self.fetcher.fetch(&url).await {
                Ok(response) => {
                    any_success = true;
                    if let Some(cms) = self.matcher.match_response(&response) {
                        debug!("{} matched {} at {}", target, cms, url);
                        transition(target, &mut state, ProbeState::Detected(cms.to_string()));
                        break;
                    }
                }
                Err(error) => match self.policy {
                    FailurePolicy::FailFast => {
                        debug!("{} failed at {}: {}", target, url, error);
                        transition(target, &mut state, ProbeState::Errored(error));
                        break;
                    }
                    FailurePolicy::SkipFailedPath => {
                        debug!("{} skipping {}: {}", target, url, error);
                        skipped.push(error);
                    }
                },
            }
        }

        if matches!(state, ProbeState::Pending | ProbeState::Probing(_)) {
            // Catalog walked without a match. Under the lenient policy a
            // target that never answered is still a failure.
            let terminal = match skipped.last() {
                Some(last) if !any_success => ProbeState::Errored(last.clone()),
                _ => ProbeState::Exhausted,
            };
            transition(target, &mut state, terminal);
        }

        let verdict = state.verdict().unwrap_or(Verdict::NotDetected);
        ProbeOutcome {
            verdict,
            paths_probed,
            skipped,
        }
    }
}

fn transition(target: &str, state: &mut ProbeState, next: ProbeState) {
    trace!("{}: {} -> {}", target, state, next);
    *state = next;
}
