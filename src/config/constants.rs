//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application: retention limits, alert thresholds, report sizes, and
//! HTTP defaults for the built-in auditor.

use std::time::Duration;

/// Default path of the JSON history file.
pub const DEFAULT_HISTORY_PATH: &str = "./seo-history.json";

/// Maximum number of records retained in the history file.
/// Oldest entries are evicted from the front once the cap is exceeded,
/// so the file always holds the most recent runs.
pub const HISTORY_LIMIT: usize = 90;

/// Maximum number of recommendations kept per record (source order).
pub const MAX_RECOMMENDATIONS: usize = 10;

// Rolling-average windows, measured over the history as it existed
// BEFORE the current record was appended.
/// Short rolling-average window (entries).
pub const SHORT_AVERAGE_WINDOW: usize = 7;
/// Long rolling-average window (entries).
pub const LONG_AVERAGE_WINDOW: usize = 30;

// Default alert thresholds (overridable via `AlertThresholds`).
/// Overall score drop (in points vs the previous run) that raises an alert.
pub const DEFAULT_SCORE_DECREASE_THRESHOLD: i64 = 10;
/// Error count increase (vs the previous run) that raises an alert.
pub const DEFAULT_ERROR_INCREASE_THRESHOLD: i64 = 5;
/// Response time in milliseconds above which a run is flagged as slow.
pub const DEFAULT_RESPONSE_TIME_THRESHOLD_MS: u64 = 5000;

// Absolute score floors, checked against the current run alone.
/// Overall score below this is critical regardless of history.
pub const CRITICAL_SCORE_FLOOR: i64 = 50;
/// Meta score below this indicates meta tag problems.
pub const META_SCORE_FLOOR: i64 = 70;
/// Schema score below this indicates structured data problems.
pub const SCHEMA_SCORE_FLOOR: i64 = 60;

// Report sizes.
/// Errors included in a report's top-issues section.
pub const TOP_ERRORS_IN_REPORT: usize = 5;
/// Warnings included in a report's top-issues section.
pub const TOP_WARNINGS_IN_REPORT: usize = 3;
/// Recommendations included in a report.
pub const TOP_RECOMMENDATIONS_IN_REPORT: usize = 5;

/// Half-to-half mean difference (in points) under which the historical
/// trend label is "stable" rather than improving/declining.
pub const STABLE_TREND_BAND: f64 = 2.0;

/// Default number of days covered by the `report` CLI subcommand.
pub const DEFAULT_REPORT_DAYS: i64 = 30;

// HTTP defaults for the built-in auditor.
/// Per-request timeout for audit fetches.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent string for audit requests.
///
/// Users can override this via `MonitorConfig::user_agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Maximum URL length accepted by the CLI (matches common browser and
/// server limits).
pub const MAX_URL_LENGTH: usize = 2048;
