//! CMS fingerprinting.
//!
//! This module provides:
//! - The signature corpus (CMS names and their markers)
//! - The path catalog probed on every target
//! - Generator meta tag extraction
//! - The matcher that turns a response into a CMS name

mod corpus;
mod matcher;
mod meta;
mod paths;

pub use corpus::{Signature, SignatureCorpus, SignatureEntry};
pub use matcher::{MatchOptions, Matcher};
pub use meta::extract_generator;
pub use paths::PathCatalog;

use std::path::Path;

use log::info;

use crate::error_handling::CorpusError;

/// Loads the corpus from `path` when given, otherwise compiles the built-in one.
pub fn load_corpus(path: Option<&Path>) -> Result<SignatureCorpus, CorpusError> {
    let corpus = match path {
        Some(path) => {
            let corpus = SignatureCorpus::from_json_file(path)?;
            info!(
                "Loaded {} signatures from {}",
                corpus.len(),
                path.display()
            );
            corpus
        }
        None => SignatureCorpus::builtin()?,
    };
    Ok(corpus)
}
