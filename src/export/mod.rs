//! Result sink.
//!
//! Serializes probe records as plain text, CSV or JSON, either to any writer
//! or to a result file.

mod csv;
mod json;
mod txt;
mod types;

pub use json::read_json_records;
pub use types::OutputFormat;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error_handling::ExportError;
use crate::probe::ProbeRecord;

/// Serializes `records` in `format` to `writer`.
pub fn write_records<W: Write>(
    records: &[ProbeRecord],
    format: OutputFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Txt => txt::write_txt(records, writer),
        OutputFormat::Csv => self::csv::write_csv(records, writer),
        OutputFormat::Json => json::write_json(records, writer),
    }
}

/// Writes `records` to the file at `path`, replacing any existing content.
///
/// Returns the number of records written.
pub fn export_records(
    records: &[ProbeRecord],
    format: OutputFormat,
    path: &Path,
) -> Result<usize, ExportError> {
    let file = File::create(path)?;
    write_records(records, format, BufWriter::new(file))?;
    info!(
        "Wrote {} record{} to {} ({})",
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        path.display(),
        format
    );
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FetchError;
    use crate::probe::Verdict;

    fn sample_records() -> Vec<ProbeRecord> {
        vec![
            ProbeRecord::new("https://a.com", Verdict::Detected("Drupal".to_string())),
            ProbeRecord::new("https://b.com", Verdict::NotDetected),
            ProbeRecord::new(
                "https://c.com",
                Verdict::Failed(FetchError::HttpStatus(500).into()),
            ),
        ]
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_records(&sample_records(), format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_txt() {
        assert_eq!(
            render(OutputFormat::Txt),
            "URL: https://a.com, Detected CMS: Drupal\n\
             URL: https://b.com, Detected CMS: CMS not detected\n\
             URL: https://c.com, Detected CMS: Error: HTTP status 500\n"
        );
    }

    #[test]
    fn test_write_csv() {
        assert_eq!(
            render(OutputFormat::Csv),
            "URL,Detected CMS\n\
             https://a.com,Drupal\n\
             https://b.com,CMS not detected\n\
             https://c.com,Error: HTTP status 500\n"
        );
    }

    #[test]
    fn test_write_json_layout() {
        let expected = r#"[
    [
        "https://a.com",
        "Drupal"
    ],
    [
        "https://b.com",
        "CMS not detected"
    ],
    [
        "https://c.com",
        "Error: HTTP status 500"
    ]
]"#;
        assert_eq!(render(OutputFormat::Json), expected);
    }

    #[test]
    fn test_write_json_empty() {
        let mut buf = Vec::new();
        write_records(&[], OutputFormat::Json, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]");
    }

    #[test]
    fn test_json_roundtrip() {
        let records = sample_records();
        let mut buf = Vec::new();
        write_records(&records, OutputFormat::Json, &mut buf).unwrap();

        let pairs = read_json_records(buf.as_slice()).unwrap();
        let expected: Vec<(String, String)> = records
            .iter()
            .map(|r| (r.url.clone(), r.verdict.render()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_read_json_rejects_malformed() {
        assert!(matches!(
            read_json_records(&b"{\"url\": 1}"[..]),
            Err(ExportError::Json(_))
        ));
    }

    #[test]
    fn test_export_records_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let written = export_records(&sample_records(), OutputFormat::Txt, &path).unwrap();
        assert_eq!(written, 3);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_export_records_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.csv");
        assert!(matches!(
            export_records(&sample_records(), OutputFormat::Csv, &path),
            Err(ExportError::Io(_))
        ));
    }
}
