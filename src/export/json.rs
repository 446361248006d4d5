//! JSON export functionality.
//!
//! Writes the full history, pretty-printed, preserving every field of every
//! record. Reloading the exported file yields the history unchanged.

use std::path::Path;

use crate::error_handling::ExportError;
use crate::metrics::MetricRecord;

/// Exports the history as pretty-printed JSON at `output`.
///
/// # Returns
///
/// The number of records written.
pub fn export_json(history: &[MetricRecord], output: &Path) -> Result<usize, ExportError> {
    let json = serde_json::to_string_pretty(history)?;
    std::fs::write(output, json).map_err(|source| ExportError::OutputFileError {
        path: output.display().to_string(),
        source,
    })?;
    Ok(history.len())
}
