//! Alert evaluation.
//!
//! Pure threshold rules over the current run and the prior history. Rules
//! are independent and cumulative; several alerts may fire on one run.
//!
//! An empty history short-circuits the whole function, absolute score
//! floors included, so the first-ever run never raises alerts: a baseline
//! run establishes data, it does not page anyone.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::config::{AlertThresholds, CRITICAL_SCORE_FLOOR, META_SCORE_FLOOR, SCHEMA_SCORE_FLOOR};
use crate::metrics::{IssueKind, MetricRecord, Scores};

/// The rule that produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    /// Overall score dropped versus the previous run.
    ScoreDecrease,
    /// Error count rose versus the previous run.
    ErrorIncrease,
    /// Audit call exceeded the response time threshold.
    SlowResponse,
    /// Overall score is below the critical floor.
    CriticalScore,
    /// Meta score is below its floor.
    MetaIssues,
    /// Schema score is below its floor.
    SchemaIssues,
}

/// How urgent an alert is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational.
    Low,
    /// Worth attention soon.
    Medium,
    /// Needs attention now.
    High,
}

/// A threshold crossing flagged for human attention.
///
/// Transient: computed per run and embedded in the report, never persisted
/// on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Warning or error, mirroring issue vocabulary.
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// The rule that fired.
    pub category: AlertCategory,
    /// Human-readable description.
    pub message: String,
    /// The value observed this run.
    pub current_value: i64,
    /// The previous run's value, for relative rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<i64>,
    /// The configured or absolute threshold, for threshold rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i64>,
    /// Urgency.
    pub severity: Severity,
}

/// Evaluates every alert rule for the current run.
///
/// `history` must be the PRE-APPEND sequence. An empty history produces no
/// alerts at all.
pub fn check_alerts(
    scores: &Scores,
    error_count: usize,
    response_time_ms: u64,
    history: &[MetricRecord],
    thresholds: &AlertThresholds,
) -> Vec<Alert> {
    let Some(previous) = history.last() else {
        return Vec::new();
    };

    let mut alerts = Vec::new();

    let score_change = scores.overall - previous.scores.overall;
    if score_change <= -thresholds.score_decrease {
        alerts.push(Alert {
            kind: IssueKind::Warning,
            category: AlertCategory::ScoreDecrease,
            message: format!(
                "Overall SEO score dropped by {} points",
                score_change.abs()
            ),
            current_value: scores.overall,
            previous_value: Some(previous.scores.overall),
            threshold: None,
            severity: Severity::High,
        });
    }

    let error_increase = error_count as i64 - previous.errors.len() as i64;
    if error_increase >= thresholds.error_increase {
        alerts.push(Alert {
            kind: IssueKind::Error,
            category: AlertCategory::ErrorIncrease,
            message: format!("Error count increased by {error_increase}"),
            current_value: error_count as i64,
            previous_value: Some(previous.errors.len() as i64),
            threshold: None,
            severity: Severity::High,
        });
    }

    if response_time_ms > thresholds.response_time_ms {
        alerts.push(Alert {
            kind: IssueKind::Warning,
            category: AlertCategory::SlowResponse,
            message: format!(
                "Response time {}ms exceeded the {}ms threshold",
                response_time_ms, thresholds.response_time_ms
            ),
            current_value: response_time_ms as i64,
            previous_value: None,
            threshold: Some(thresholds.response_time_ms as i64),
            severity: Severity::Medium,
        });
    }

    if scores.overall < CRITICAL_SCORE_FLOOR {
        alerts.push(Alert {
            kind: IssueKind::Error,
            category: AlertCategory::CriticalScore,
            message: format!(
                "Overall SEO score {} is below the critical floor of {}",
                scores.overall, CRITICAL_SCORE_FLOOR
            ),
            current_value: scores.overall,
            previous_value: None,
            threshold: Some(CRITICAL_SCORE_FLOOR),
            severity: Severity::High,
        });
    }

    if scores.meta < META_SCORE_FLOOR {
        alerts.push(Alert {
            kind: IssueKind::Warning,
            category: AlertCategory::MetaIssues,
            message: format!(
                "Meta tag score {} is below {}",
                scores.meta, META_SCORE_FLOOR
            ),
            current_value: scores.meta,
            previous_value: None,
            threshold: Some(META_SCORE_FLOOR),
            severity: Severity::Medium,
        });
    }

    if scores.schema < SCHEMA_SCORE_FLOOR {
        alerts.push(Alert {
            kind: IssueKind::Warning,
            category: AlertCategory::SchemaIssues,
            message: format!(
                "Structured data score {} is below {}",
                scores.schema, SCHEMA_SCORE_FLOOR
            ),
            current_value: scores.schema,
            previous_value: None,
            threshold: Some(SCHEMA_SCORE_FLOOR),
            severity: Severity::Medium,
        });
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Issue, PageInfo};
    use crate::trends::{FirstRun, Trends};
    use chrono::Utc;

    fn record(scores: Scores, error_count: usize) -> MetricRecord {
        let errors = (0..error_count)
            .map(|i| Issue {
                component: "meta".to_string(),
                message: format!("error {i}"),
                severity: "high".to_string(),
                tag: None,
            })
            .collect();
        MetricRecord {
            timestamp: Utc::now(),
            url: "https://example.com".to_string(),
            scores,
            response_time_ms: 100,
            errors,
            warnings: Vec::new(),
            recommendations: Vec::new(),
            page_info: PageInfo::default(),
            trends: Trends::FirstRun(FirstRun {
                is_first_run: true,
                message: String::new(),
            }),
        }
    }

    fn healthy_scores() -> Scores {
        Scores {
            overall: 90,
            meta: 90,
            schema: 90,
            social: 90,
            sitemap: 90,
            performance: 90,
            accessibility: 90,
            security: 90,
        }
    }

    #[test]
    fn test_empty_history_suppresses_all_alerts() {
        // Even a catastrophic score goes unflagged on the first-ever run.
        let scores = Scores {
            overall: 10,
            ..Default::default()
        };
        let alerts = check_alerts(&scores, 50, 60_000, &[], &AlertThresholds::default());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_healthy_run_raises_nothing() {
        let history = vec![record(healthy_scores(), 0)];
        let alerts = check_alerts(
            &healthy_scores(),
            0,
            100,
            &history,
            &AlertThresholds::default(),
        );
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_score_decrease_alert() {
        let history = vec![record(healthy_scores(), 0)];
        let mut scores = healthy_scores();
        scores.overall = 78; // drop of 12 >= threshold 10
        let alerts = check_alerts(&scores, 0, 100, &history, &AlertThresholds::default());
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.category, AlertCategory::ScoreDecrease);
        assert_eq!(alert.kind, IssueKind::Warning);
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.current_value, 78);
        assert_eq!(alert.previous_value, Some(90));
    }

    #[test]
    fn test_error_increase_alert_message_contains_delta() {
        let history = vec![record(healthy_scores(), 2)];
        let alerts = check_alerts(
            &healthy_scores(),
            8,
            100,
            &history,
            &AlertThresholds::default(),
        );
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.category, AlertCategory::ErrorIncrease);
        assert_eq!(alert.kind, IssueKind::Error);
        assert!(alert.message.contains('6'));
        assert_eq!(alert.current_value, 8);
        assert_eq!(alert.previous_value, Some(2));
    }

    #[test]
    fn test_slow_response_alert_includes_threshold() {
        let history = vec![record(healthy_scores(), 0)];
        let alerts = check_alerts(
            &healthy_scores(),
            0,
            7500,
            &history,
            &AlertThresholds::default(),
        );
        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.category, AlertCategory::SlowResponse);
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(alert.threshold, Some(5000));
        assert!(alert.message.contains("5000"));
    }

    #[test]
    fn test_critical_score_fires_regardless_of_previous() {
        // Previous was even worse; the absolute rule still fires.
        let mut previous = healthy_scores();
        previous.overall = 20;
        let history = vec![record(previous, 0)];
        let mut scores = healthy_scores();
        scores.overall = 45;
        let alerts = check_alerts(&scores, 0, 100, &history, &AlertThresholds::default());
        assert!(alerts
            .iter()
            .any(|a| a.category == AlertCategory::CriticalScore));
    }

    #[test]
    fn test_meta_and_schema_floors() {
        let history = vec![record(healthy_scores(), 0)];
        let mut scores = healthy_scores();
        scores.meta = 65;
        scores.schema = 55;
        let alerts = check_alerts(&scores, 0, 100, &history, &AlertThresholds::default());
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].category, AlertCategory::MetaIssues);
        assert_eq!(alerts[0].threshold, Some(70));
        assert_eq!(alerts[1].category, AlertCategory::SchemaIssues);
        assert_eq!(alerts[1].threshold, Some(60));
    }

    #[test]
    fn test_multiple_rules_fire_together() {
        let history = vec![record(healthy_scores(), 0)];
        let scores = Scores {
            overall: 40,
            meta: 50,
            schema: 30,
            ..Default::default()
        };
        let alerts = check_alerts(&scores, 9, 9000, &history, &AlertThresholds::default());
        let categories: Vec<AlertCategory> = alerts.iter().map(|a| a.category).collect();
        assert_eq!(
            categories,
            vec![
                AlertCategory::ScoreDecrease,
                AlertCategory::ErrorIncrease,
                AlertCategory::SlowResponse,
                AlertCategory::CriticalScore,
                AlertCategory::MetaIssues,
                AlertCategory::SchemaIssues,
            ]
        );
    }

    #[test]
    fn test_custom_thresholds_respected() {
        let history = vec![record(healthy_scores(), 0)];
        let thresholds = AlertThresholds {
            score_decrease: 30,
            error_increase: 100,
            response_time_ms: 60_000,
        };
        let mut scores = healthy_scores();
        scores.overall = 75; // drop of 15, under the custom threshold of 30
        let alerts = check_alerts(&scores, 20, 30_000, &history, &thresholds);
        assert!(alerts.is_empty());
    }
}
