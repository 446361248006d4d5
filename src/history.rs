//! JSON file persistence for the metric history.
//!
//! The history file is the only durable store in this system: a single
//! pretty-printed JSON array, read in full and rewritten in full on every
//! append. There is no locking; single-writer access is assumed, and
//! concurrent writers to the same path can lose updates to each other.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::config::HISTORY_LIMIT;
use crate::metrics::MetricRecord;

/// Append-only, capacity-bounded store of [`MetricRecord`]s.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Creates a store over the given file path. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full history.
    ///
    /// A missing file, unreadable file, or malformed JSON all yield an empty
    /// history — "no history yet" is not an error condition for a monitor
    /// that may be running for the first time.
    pub async fn load(&self) -> Vec<MetricRecord> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(
                    "No readable history at {} ({e}); starting fresh",
                    self.path.display()
                );
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(history) => history,
            Err(e) => {
                warn!(
                    "History file {} is not valid JSON ({e}); starting fresh",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    /// Appends a record and rewrites the file.
    ///
    /// The record is pushed onto `history` and the oldest entries are
    /// evicted from the front once the retention cap is exceeded, so the
    /// in-memory sequence matches what lands on disk even when the write
    /// itself fails.
    pub async fn append(&self, history: &mut Vec<MetricRecord>, record: MetricRecord) -> Result<()> {
        history.push(record);
        if history.len() > HISTORY_LIMIT {
            let excess = history.len() - HISTORY_LIMIT;
            history.drain(..excess);
        }
        self.write(history).await
    }

    /// Serializes the whole history (pretty-printed) and overwrites the file.
    pub async fn write(&self, history: &[MetricRecord]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(history).context("Failed to serialize history")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write history file {}", self.path.display()))
    }
}
