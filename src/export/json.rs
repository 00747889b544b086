//! JSON export.
//!
//! Records are written as a pretty-printed array of `[url, verdict]` pairs
//! with four-space indentation.

use std::io::{Read, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error_handling::ExportError;
use crate::probe::ProbeRecord;

const JSON_INDENT: &[u8] = b"    ";

/// Writes records as a JSON array of `[url, verdict]` pairs.
pub fn write_json<W: Write>(records: &[ProbeRecord], mut writer: W) -> Result<(), ExportError> {
    let pairs: Vec<(&str, String)> = records
        .iter()
        .map(|record| (record.url.as_str(), record.verdict.render()))
        .collect();

    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    pairs.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}

/// Parses a JSON result file back into `(url, verdict)` pairs.
pub fn read_json_records<R: Read>(reader: R) -> Result<Vec<(String, String)>, ExportError> {
    Ok(serde_json::from_reader(reader)?)
}
