//! Report assembly and chart-ready views.
//!
//! Everything here is pure aggregation over already-computed data: no I/O,
//! no mutation of the history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::alerts::Alert;
use crate::config::{
    STABLE_TREND_BAND, TOP_ERRORS_IN_REPORT, TOP_RECOMMENDATIONS_IN_REPORT,
    TOP_WARNINGS_IN_REPORT,
};
use crate::metrics::{IssueKind, MetricRecord, Recommendation, ScoreCategory, Scores};
use crate::trends::Trends;

/// Human-oriented digest of one monitoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringReport {
    /// Headline numbers for the run.
    pub summary: RunSummary,
    /// Per-category scores.
    pub score_breakdown: Scores,
    /// Trend data for the run.
    pub trends: Trends,
    /// Alerts raised by the run.
    pub alerts: Vec<Alert>,
    /// The leading errors and warnings, tagged by kind.
    pub top_issues: Vec<TopIssue>,
    /// The leading recommendations.
    pub recommendations: Vec<Recommendation>,
    /// Digest of the whole recorded history.
    pub historical_summary: HistoricalSummary,
}

/// Headline numbers for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// The audited URL.
    pub url: String,
    /// When the run happened.
    pub timestamp: DateTime<Utc>,
    /// Overall score.
    pub overall_score: i64,
    /// Audit latency in milliseconds.
    pub response_time_ms: u64,
    /// Number of error issues.
    pub error_count: usize,
    /// Number of warning issues.
    pub warning_count: usize,
}

/// An issue surfaced in the report, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopIssue {
    /// Error or warning.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Originating component.
    pub component: String,
    /// Human-readable description.
    pub message: String,
    /// Severity label.
    pub severity: String,
}

/// Digest of the recorded history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoricalSummary {
    /// No history recorded yet.
    Empty {
        /// Human-readable explanation.
        message: String,
        /// Always zero.
        data_points: usize,
    },
    /// Statistics over at least one record.
    Present(HistoryStats),
}

/// Statistics over a non-empty history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Number of records.
    pub data_points: usize,
    /// Timestamp of the oldest record.
    pub first_recorded: DateTime<Utc>,
    /// Timestamp of the newest record.
    pub last_recorded: DateTime<Utc>,
    /// Mean overall score.
    pub average_score: f64,
    /// Highest overall score.
    pub best_score: i64,
    /// Lowest overall score.
    pub worst_score: i64,
    /// Coarse direction of the history.
    pub trend: TrendLabel,
}

/// Coarse direction of a score history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    /// Second half of the history averages higher than the first.
    Improving,
    /// Second half averages lower.
    Declining,
    /// Halves are within the stable band of each other.
    Stable,
    /// Fewer than two records; no direction can be computed.
    InsufficientData,
}

/// Chart-ready parallel arrays over the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// One date label per record (YYYY-MM-DD).
    pub labels: Vec<String>,
    /// The chosen category's score per record.
    pub scores: Vec<i64>,
    /// Response time per record (milliseconds).
    pub response_times: Vec<u64>,
    /// Error count per record.
    pub error_counts: Vec<usize>,
}

/// Assembles the report for a completed run.
///
/// `history` is the POST-APPEND sequence: the current record is already its
/// last element, so the historical summary covers it too.
pub fn generate_monitoring_report(
    current: &MetricRecord,
    history: &[MetricRecord],
    alerts: &[Alert],
) -> MonitoringReport {
    let mut top_issues: Vec<TopIssue> = current
        .errors
        .iter()
        .take(TOP_ERRORS_IN_REPORT)
        .map(|issue| TopIssue {
            kind: IssueKind::Error,
            component: issue.component.clone(),
            message: issue.message.clone(),
            severity: issue.severity.clone(),
        })
        .collect();
    top_issues.extend(
        current
            .warnings
            .iter()
            .take(TOP_WARNINGS_IN_REPORT)
            .map(|issue| TopIssue {
                kind: IssueKind::Warning,
                component: issue.component.clone(),
                message: issue.message.clone(),
                severity: issue.severity.clone(),
            }),
    );

    MonitoringReport {
        summary: RunSummary {
            url: current.url.clone(),
            timestamp: current.timestamp,
            overall_score: current.scores.overall,
            response_time_ms: current.response_time_ms,
            error_count: current.errors.len(),
            warning_count: current.warnings.len(),
        },
        score_breakdown: current.scores,
        trends: current.trends.clone(),
        alerts: alerts.to_vec(),
        top_issues,
        recommendations: current
            .recommendations
            .iter()
            .take(TOP_RECOMMENDATIONS_IN_REPORT)
            .cloned()
            .collect(),
        historical_summary: generate_historical_summary(history),
    }
}

/// Summarizes the whole history.
///
/// The trend label compares the mean overall score of the first half of the
/// records (by index) against the second half; differences inside the
/// stable band count as stable. A single record cannot have a direction.
pub fn generate_historical_summary(history: &[MetricRecord]) -> HistoricalSummary {
    if history.is_empty() {
        return HistoricalSummary::Empty {
            message: "No monitoring history recorded yet.".to_string(),
            data_points: 0,
        };
    }

    let overall: Vec<i64> = history.iter().map(|r| r.scores.overall).collect();
    let average_score = overall.iter().sum::<i64>() as f64 / overall.len() as f64;

    let trend = if history.len() < 2 {
        TrendLabel::InsufficientData
    } else {
        let mid = overall.len() / 2;
        let first_mean = overall[..mid].iter().sum::<i64>() as f64 / mid as f64;
        let second_mean =
            overall[mid..].iter().sum::<i64>() as f64 / (overall.len() - mid) as f64;
        let diff = second_mean - first_mean;
        if diff.abs() < STABLE_TREND_BAND {
            TrendLabel::Stable
        } else if diff > 0.0 {
            TrendLabel::Improving
        } else {
            TrendLabel::Declining
        }
    };

    HistoricalSummary::Present(HistoryStats {
        data_points: history.len(),
        first_recorded: history[0].timestamp,
        last_recorded: history[history.len() - 1].timestamp,
        average_score,
        best_score: overall.iter().copied().max().unwrap_or(0),
        worst_score: overall.iter().copied().min().unwrap_or(0),
        trend,
    })
}

/// Reshapes the history into parallel arrays for external charting.
pub fn generate_chart_data(history: &[MetricRecord], category: ScoreCategory) -> ChartData {
    ChartData {
        labels: history
            .iter()
            .map(|r| r.timestamp.format("%Y-%m-%d").to_string())
            .collect(),
        scores: history.iter().map(|r| r.scores.get(category)).collect(),
        response_times: history.iter().map(|r| r.response_time_ms).collect(),
        error_counts: history.iter().map(|r| r.errors.len()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Issue, PageInfo};
    use crate::trends::{FirstRun, Trends};

    fn record(overall: i64, errors: usize, warnings: usize) -> MetricRecord {
        let issue = |i: usize, label: &str| Issue {
            component: "meta".to_string(),
            message: format!("{label} {i}"),
            severity: "high".to_string(),
            tag: None,
        };
        MetricRecord {
            timestamp: Utc::now(),
            url: "https://example.com".to_string(),
            scores: Scores {
                overall,
                ..Default::default()
            },
            response_time_ms: 150,
            errors: (0..errors).map(|i| issue(i, "error")).collect(),
            warnings: (0..warnings).map(|i| issue(i, "warning")).collect(),
            recommendations: Vec::new(),
            page_info: PageInfo::default(),
            trends: Trends::FirstRun(FirstRun {
                is_first_run: true,
                message: String::new(),
            }),
        }
    }

    #[test]
    fn test_historical_summary_empty() {
        match generate_historical_summary(&[]) {
            HistoricalSummary::Empty {
                message,
                data_points,
            } => {
                assert!(!message.is_empty());
                assert_eq!(data_points, 0);
            }
            HistoricalSummary::Present(_) => panic!("expected empty summary"),
        }
    }

    #[test]
    fn test_historical_summary_single_entry_insufficient() {
        let history = vec![record(80, 0, 0)];
        match generate_historical_summary(&history) {
            HistoricalSummary::Present(stats) => {
                assert_eq!(stats.data_points, 1);
                assert_eq!(stats.trend, TrendLabel::InsufficientData);
                assert_eq!(stats.average_score, 80.0);
                assert_eq!(stats.best_score, 80);
                assert_eq!(stats.worst_score, 80);
            }
            HistoricalSummary::Empty { .. } => panic!("expected stats"),
        }
    }

    #[test]
    fn test_historical_summary_improving() {
        let history: Vec<MetricRecord> =
            [50, 55, 52, 80, 85, 88].iter().map(|s| record(*s, 0, 0)).collect();
        match generate_historical_summary(&history) {
            HistoricalSummary::Present(stats) => {
                assert_eq!(stats.trend, TrendLabel::Improving);
                assert_eq!(stats.best_score, 88);
                assert_eq!(stats.worst_score, 50);
            }
            HistoricalSummary::Empty { .. } => panic!("expected stats"),
        }
    }

    #[test]
    fn test_historical_summary_declining_and_stable() {
        let declining: Vec<MetricRecord> =
            [90, 88, 60, 55].iter().map(|s| record(*s, 0, 0)).collect();
        match generate_historical_summary(&declining) {
            HistoricalSummary::Present(stats) => assert_eq!(stats.trend, TrendLabel::Declining),
            HistoricalSummary::Empty { .. } => panic!("expected stats"),
        }

        let stable: Vec<MetricRecord> = [80, 81, 80, 81].iter().map(|s| record(*s, 0, 0)).collect();
        match generate_historical_summary(&stable) {
            HistoricalSummary::Present(stats) => assert_eq!(stats.trend, TrendLabel::Stable),
            HistoricalSummary::Empty { .. } => panic!("expected stats"),
        }
    }

    #[test]
    fn test_report_top_issues_limits_and_tags() {
        let current = record(85, 8, 5);
        let history = vec![current.clone()];
        let report = generate_monitoring_report(&current, &history, &[]);
        // 5 errors then 3 warnings
        assert_eq!(report.top_issues.len(), 8);
        assert!(report.top_issues[..5]
            .iter()
            .all(|i| i.kind == IssueKind::Error));
        assert!(report.top_issues[5..]
            .iter()
            .all(|i| i.kind == IssueKind::Warning));
        assert_eq!(report.summary.error_count, 8);
        assert_eq!(report.summary.warning_count, 5);
    }

    #[test]
    fn test_report_recommendations_capped_at_five() {
        let mut current = record(85, 0, 0);
        current.recommendations = (0..9)
            .map(|i| Recommendation {
                message: format!("rec {i}"),
                priority: "medium".to_string(),
                category: "general".to_string(),
            })
            .collect();
        let history = vec![current.clone()];
        let report = generate_monitoring_report(&current, &history, &[]);
        assert_eq!(report.recommendations.len(), 5);
        assert_eq!(report.recommendations[0].message, "rec 0");
    }

    #[test]
    fn test_chart_data_shapes() {
        let history: Vec<MetricRecord> =
            [70, 75, 80].iter().map(|s| record(*s, 2, 0)).collect();
        let chart = generate_chart_data(&history, ScoreCategory::Overall);
        assert_eq!(chart.labels.len(), 3);
        assert_eq!(chart.scores, vec![70, 75, 80]);
        assert_eq!(chart.response_times, vec![150, 150, 150]);
        assert_eq!(chart.error_counts, vec![2, 2, 2]);
        // Labels are calendar dates.
        assert_eq!(chart.labels[0].len(), 10);
    }

    #[test]
    fn test_chart_data_other_category() {
        let mut a = record(70, 0, 0);
        a.scores.meta = 40;
        let chart = generate_chart_data(&[a], ScoreCategory::Meta);
        assert_eq!(chart.scores, vec![40]);
    }
}
