use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Output file could not be created.
    #[error("Failed to create output file {path}: {source}")]
    OutputFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O failure while writing the export.
    #[error("Export I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}
