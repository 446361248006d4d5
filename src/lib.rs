//! seo_monitor library: SEO score monitoring over time.
//!
//! This library audits a URL (through any [`Auditor`] implementation),
//! normalizes the result into a [`MetricRecord`], compares it against the
//! recorded history to compute trends and alerts, persists the record to a
//! capacity-bounded JSON history file, and assembles a human-readable
//! report.
//!
//! # Example
//!
//! ```no_run
//! use seo_monitor::{HttpAuditor, MonitorConfig, MonitorOutcome, PerformanceMonitor};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitorConfig::default();
//! let auditor = HttpAuditor::new(&config)?;
//! let monitor = PerformanceMonitor::new(config);
//!
//! match monitor.monitor_url("https://example.com", &auditor).await {
//!     MonitorOutcome::Completed(run) => {
//!         println!("Overall score: {}", run.current.scores.overall);
//!         println!("Alerts: {}", run.alerts.len());
//!     }
//!     MonitorOutcome::Failed(failure) => {
//!         eprintln!("Audit failed: {}", failure.error);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod alerts;
pub mod app;
pub mod audit;
pub mod config;
mod error_handling;
pub mod export;
mod history;
pub mod initialization;
mod metrics;
mod report;
mod trends;

// Re-export public API
pub use alerts::{check_alerts, Alert, AlertCategory, Severity};
pub use audit::{AuditOutcome, Auditor, HttpAuditor};
pub use config::{AlertThresholds, LogFormat, LogLevel, MonitorConfig};
pub use error_handling::{ExportError, InitializationError};
pub use export::{export_data, ExportFormat};
pub use history::HistoryStore;
pub use metrics::{
    extract_issues, extract_page_info, extract_recommendations, extract_scores, Issue, IssueKind,
    MetricRecord, PageInfo, Recommendation, ScoreCategory, Scores,
};
pub use monitor::{AuditFailure, MonitorOutcome, MonitorRun, PerformanceMonitor};
pub use report::{
    generate_chart_data, generate_historical_summary, generate_monitoring_report, ChartData,
    HistoricalSummary, HistoryStats, MonitoringReport, RunSummary, TopIssue, TrendLabel,
};
pub use trends::{
    calculate_trends, CountTrend, Direction, FirstRun, RollingAverages, ScoreTrend, TrendSet,
    Trends, WindowAverage,
};

// Internal monitor module (contains the main orchestration logic)
mod monitor {
    use std::path::Path;
    use std::time::Instant;

    use chrono::{DateTime, Utc};
    use log::{error, info, warn};
    use serde::{Deserialize, Serialize};

    use crate::alerts::{check_alerts, Alert};
    use crate::audit::Auditor;
    use crate::config::MonitorConfig;
    use crate::error_handling::ExportError;
    use crate::export::{export_data, ExportFormat};
    use crate::history::HistoryStore;
    use crate::metrics::{
        extract_issues, extract_page_info, extract_recommendations, extract_scores, IssueKind,
        MetricRecord, ScoreCategory,
    };
    use crate::report::{generate_chart_data, generate_monitoring_report, ChartData};
    use crate::trends::calculate_trends;

    /// Result of one monitoring run.
    ///
    /// A failed audit is part of the normal vocabulary here, not a
    /// propagated error: callers match on the outcome instead of handling a
    /// `Result`.
    #[derive(Debug, Clone, Serialize)]
    #[serde(untagged)]
    pub enum MonitorOutcome {
        /// The audit succeeded and the run was recorded.
        Completed(Box<MonitorRun>),
        /// The audit itself failed; nothing was recorded.
        Failed(AuditFailure),
    }

    /// Everything produced by a successful run.
    #[derive(Debug, Clone, Serialize)]
    pub struct MonitorRun {
        /// The record created by this run.
        pub current: MetricRecord,
        /// The history after this run was appended (capped).
        pub historical: Vec<MetricRecord>,
        /// Alerts raised by this run.
        pub alerts: Vec<Alert>,
        /// The assembled report.
        pub report: crate::report::MonitoringReport,
    }

    /// Recorded in place of a run when the audit call fails.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AuditFailure {
        /// The audit error, rendered as text.
        pub error: String,
        /// When the failure happened.
        pub timestamp: DateTime<Utc>,
        /// The URL that was being audited.
        pub url: String,
    }

    /// Orchestrates monitoring runs against one history file.
    ///
    /// Runs are strictly sequential: audit, extract, load history, compute
    /// trends and alerts, persist, report. There is no internal concurrency
    /// and no locking on the history file — single-writer access is assumed.
    #[derive(Debug)]
    pub struct PerformanceMonitor {
        config: MonitorConfig,
        store: HistoryStore,
    }

    impl PerformanceMonitor {
        /// Creates a monitor from an explicit configuration.
        pub fn new(config: MonitorConfig) -> Self {
            let store = HistoryStore::new(config.history_path.clone());
            Self { config, store }
        }

        /// The monitor's configuration.
        pub fn config(&self) -> &MonitorConfig {
            &self.config
        }

        /// Runs one monitoring pass for `url`.
        ///
        /// The audit call is timed to produce the record's response time.
        /// Trend and alert computation both use the history as it existed
        /// before this run; the report's historical summary includes the
        /// new record. A failed history write is logged and swallowed — the
        /// computed results are returned either way.
        pub async fn monitor_url(&self, url: &str, auditor: &dyn Auditor) -> MonitorOutcome {
            info!("Starting SEO monitoring for {url}");

            let started = Instant::now();
            let outcome = match auditor.audit(url).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Audit failed for {url}: {e:#}");
                    return MonitorOutcome::Failed(AuditFailure {
                        error: format!("{e:#}"),
                        timestamp: Utc::now(),
                        url: url.to_string(),
                    });
                }
            };
            let response_time_ms = started.elapsed().as_millis() as u64;

            let scores = extract_scores(&outcome);
            let errors = extract_issues(&outcome, IssueKind::Error);
            let warnings = extract_issues(&outcome, IssueKind::Warning);
            let recommendations = extract_recommendations(&outcome);
            let page_info = extract_page_info(&outcome);

            let mut history = self.store.load().await;
            let trends =
                calculate_trends(&scores, &errors, &warnings, response_time_ms, &history);
            let alerts = check_alerts(
                &scores,
                errors.len(),
                response_time_ms,
                &history,
                &self.config.alert_thresholds,
            );

            let record = MetricRecord {
                timestamp: Utc::now(),
                url: url.to_string(),
                scores,
                response_time_ms,
                errors,
                warnings,
                recommendations,
                page_info,
                trends,
            };

            if let Err(e) = self.store.append(&mut history, record.clone()).await {
                warn!(
                    "Failed to persist history to {}: {e:#}. Continuing with in-memory results.",
                    self.store.path().display()
                );
            }

            let report = generate_monitoring_report(&record, &history, &alerts);
            info!(
                "Monitoring run for {url} complete: overall score {}, {} alert(s)",
                record.scores.overall,
                alerts.len()
            );

            MonitorOutcome::Completed(Box::new(MonitorRun {
                current: record,
                historical: history,
                alerts,
                report,
            }))
        }

        /// Loads the recorded history.
        pub async fn history(&self) -> Vec<MetricRecord> {
            self.store.load().await
        }

        /// Exports the recorded history in the requested format.
        ///
        /// # Returns
        ///
        /// The number of records written.
        pub async fn export_data(
            &self,
            format: ExportFormat,
            output: &Path,
        ) -> Result<usize, ExportError> {
            let history = self.store.load().await;
            export_data(&history, format, output)
        }

        /// Chart-ready series over the recorded history for one category.
        pub async fn chart_data(&self, category: ScoreCategory) -> ChartData {
            let history = self.store.load().await;
            generate_chart_data(&history, category)
        }

        /// Re-evaluates the alert rules for the most recent recorded run,
        /// using the records before it as the comparison history.
        pub async fn latest_alerts(&self) -> Vec<Alert> {
            let history = self.store.load().await;
            let Some((last, prior)) = history.split_last() else {
                return Vec::new();
            };
            check_alerts(
                &last.scores,
                last.errors.len(),
                last.response_time_ms,
                prior,
                &self.config.alert_thresholds,
            )
        }
    }
}
