//! Export types.

use strum_macros::{Display, EnumString};

/// Result file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// One `URL: <url>, Detected CMS: <verdict>` line per record (default)
    #[default]
    Txt,
    /// `URL,Detected CMS` header followed by one row per record
    Csv,
    /// Pretty-printed array of `[url, verdict]` pairs
    Json,
}

impl OutputFormat {
    /// File extension used for the default result file name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}
