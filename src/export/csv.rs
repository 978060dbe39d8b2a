//! CSV export of a single record.
//!
//! Two columns, `Field,Value`, one row per field as produced by
//! [`record_rows`](super::record_rows).

use anyhow::{Context, Result};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::rows::record_rows;
use crate::record::GeoRecord;

/// Writes `record` as CSV to `writer`. Returns the number of data rows.
pub fn write_record_csv<W: Write>(record: &GeoRecord, writer: W) -> Result<usize> {
    let mut out = Writer::from_writer(writer);
    out.write_record(["Field", "Value"])
        .context("Failed to write CSV header")?;

    let rows = record_rows(record);
    for (label, value) in &rows {
        out.write_record([label, value])
            .with_context(|| format!("Failed to write CSV row '{}'", label))?;
    }
    out.flush().context("Failed to flush CSV output")?;
    Ok(rows.len())
}

/// Writes `record` as CSV to the file at `path`, replacing it if present.
pub fn export_record_csv(record: &GeoRecord, path: &Path) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    let count = write_record_csv(record, file)?;
    log::info!(
        "Exported {} record from {} to {}",
        record.ip(),
        record.source(),
        path.display()
    );
    Ok(count)
}
