//! Plain text export.

use std::io::Write;

use crate::error_handling::ExportError;
use crate::probe::ProbeRecord;

/// Writes one summary line per record.
pub fn write_txt<W: Write>(records: &[ProbeRecord], mut writer: W) -> Result<(), ExportError> {
    for record in records {
        writeln!(writer, "{}", record.summary_line())?;
    }
    writer.flush()?;
    Ok(())
}
