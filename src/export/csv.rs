//! CSV export functionality.
//!
//! Exports the history to CSV (simplified, flattened view): one row per
//! record, fixed column order. Only the four headline scores appear;
//! consumers needing the full breakdown should export JSON instead.

use std::path::Path;

use csv::Writer;

use crate::error_handling::ExportError;
use crate::metrics::MetricRecord;

/// The fixed CSV column order.
const CSV_COLUMNS: [&str; 9] = [
    "timestamp",
    "url",
    "overall_score",
    "meta_score",
    "schema_score",
    "social_score",
    "response_time",
    "error_count",
    "warning_count",
];

/// Exports the history to CSV at `output`.
///
/// # Returns
///
/// The number of records written, or an error if the file could not be
/// created or a row could not be serialized.
pub fn export_csv(history: &[MetricRecord], output: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(output).map_err(|source| ExportError::OutputFileError {
        path: output.display().to_string(),
        source,
    })?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(CSV_COLUMNS)?;

    for record in history {
        writer.write_record(&[
            record.timestamp.to_rfc3339(),
            record.url.clone(),
            record.scores.overall.to_string(),
            record.scores.meta.to_string(),
            record.scores.schema.to_string(),
            record.scores.social.to_string(),
            record.response_time_ms.to_string(),
            record.errors.len().to_string(),
            record.warnings.len().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(history.len())
}
