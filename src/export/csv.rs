//! CSV export.
//!
//! Header row `URL,Detected CMS`, then one row per record with the rendered
//! verdict.

use std::io::Write;

use csv::Writer;

use crate::error_handling::ExportError;
use crate::probe::ProbeRecord;

const CSV_HEADER: [&str; 2] = ["URL", "Detected CMS"];

/// Writes records as CSV.
pub fn write_csv<W: Write>(records: &[ProbeRecord], writer: W) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([record.url.as_str(), record.verdict.render().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{FailureReason, Verdict};

    #[test]
    fn test_write_csv_quotes_commas() {
        let records = vec![
            ProbeRecord::new("https://a.com", Verdict::Detected("WordPress".to_string())),
            ProbeRecord::new(
                "https://b.com",
                Verdict::Failed(FailureReason::InvalidUrl("b, c".to_string())),
            ),
        ];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "URL,Detected CMS\nhttps://a.com,WordPress\nhttps://b.com,\"Error: Invalid URL: b, c\"\n"
        );
    }

    #[test]
    fn test_write_csv_header_only_when_empty() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "URL,Detected CMS\n");
    }
}
