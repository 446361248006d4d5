//! Export functionality for monitoring history.
//!
//! This module provides functions to export the recorded history into
//! different formats: JSON for programmatic access, CSV for spreadsheets.

mod csv;
mod json;
mod types;

pub use csv::export_csv;
pub use json::export_json;
pub use types::ExportFormat;

use std::path::Path;

use crate::error_handling::ExportError;
use crate::metrics::MetricRecord;

/// Exports the full history in the requested format.
///
/// # Returns
///
/// The number of records written, or an error if the output could not be
/// produced.
pub fn export_data(
    history: &[MetricRecord],
    format: ExportFormat,
    output: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Json => export_json(history, output),
        ExportFormat::Csv => export_csv(history, output),
    }
}
