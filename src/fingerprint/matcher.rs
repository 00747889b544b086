//! Matching a probe response against the signature corpus.
//!
//! For each signature in corpus order the matcher tests:
//! 1. body markers against the body (and the rendered header block when enabled)
//! 2. generator markers against the `<meta name="generator">` content
//! 3. in compatible mode, body markers against the generator content as well
//!
//! The first signature with any hit wins.

use std::sync::Arc;

use crate::config::MetaMatchMode;
use crate::fetch::ProbeResponse;
use crate::fingerprint::corpus::{Marker, Signature, SignatureCorpus};
use crate::fingerprint::meta::extract_generator;

/// Knobs controlling which parts of a response each marker group is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub meta_match_mode: MetaMatchMode,
    pub match_headers: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            meta_match_mode: MetaMatchMode::GeneratorOnly,
            match_headers: true,
        }
    }
}

/// Stateless matcher over a shared, read-only corpus.
#[derive(Debug, Clone)]
pub struct Matcher {
    corpus: Arc<SignatureCorpus>,
    options: MatchOptions,
}

fn any_match(markers: &[Marker], haystack: &str) -> bool {
    markers.iter().any(|marker| marker.is_match(haystack))
}

impl Matcher {
    pub fn new(corpus: Arc<SignatureCorpus>, options: MatchOptions) -> Self {
        Self { corpus, options }
    }

    pub fn corpus(&self) -> &SignatureCorpus {
        &self.corpus
    }

    /// Returns the name of the first signature matching `response`, if any.
    ///
    /// Identical responses always yield identical results: matching is
    /// literal, case-insensitive and independent of locale.
    pub fn match_response(&self, response: &ProbeResponse) -> Option<&str> {
        let generator = extract_generator(&response.body);
        let header_text = if self.options.match_headers && !response.headers.is_empty() {
            Some(response.header_text())
        } else {
            None
        };

        self.corpus
            .lookup()
            .iter()
            .find(|signature| {
                self.signature_matches(
                    signature,
                    &response.body,
                    header_text.as_deref(),
                    generator.as_deref(),
                )
            })
            .map(Signature::cms_name)
    }

    fn signature_matches(
        &self,
        signature: &Signature,
        body: &str,
        header_text: Option<&str>,
        generator: Option<&str>,
    ) -> bool {
        if any_match(signature.body_markers(), body) {
            return true;
        }
        if header_text.is_some_and(|headers| any_match(signature.body_markers(), headers)) {
            return true;
        }
        let Some(generator) = generator else {
            return false;
        };
        if any_match(signature.generator_markers(), generator) {
            return true;
        }
        self.options.meta_match_mode == MetaMatchMode::Compatible
            && any_match(signature.body_markers(), generator)
    }
}
