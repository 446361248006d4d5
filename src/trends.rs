//! Trend computation.
//!
//! Change is measured against the single immediately-preceding record, not a
//! smoothed baseline; that keeps the math obvious at the cost of noise
//! sensitivity. Both the previous-record comparison and the rolling windows
//! are computed over the history as it existed BEFORE the current record is
//! appended.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::config::{LONG_AVERAGE_WINDOW, SHORT_AVERAGE_WINDOW};
use crate::metrics::{Issue, MetricRecord, ScoreCategory, Scores};

/// Per-record trend data: either the first-run sentinel or a full
/// comparison against the previous record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Trends {
    /// No prior data existed when this record was created.
    FirstRun(FirstRun),
    /// Comparison against the previous record.
    Computed(TrendSet),
}

impl Trends {
    /// Returns the computed trend set, if this is not a first run.
    pub fn computed(&self) -> Option<&TrendSet> {
        match self {
            Trends::FirstRun(_) => None,
            Trends::Computed(set) => Some(set),
        }
    }
}

/// Sentinel stored for the very first record in a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstRun {
    /// Always true; distinguishes the sentinel in serialized form.
    pub is_first_run: bool,
    /// Human-readable explanation.
    pub message: String,
}

/// Full current-vs-previous comparison for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSet {
    /// One trend per score category.
    pub scores: BTreeMap<ScoreCategory, ScoreTrend>,
    /// Error count movement.
    pub errors: CountTrend,
    /// Warning count movement.
    pub warnings: CountTrend,
    /// Response time movement (milliseconds).
    pub response_time: CountTrend,
    /// Rolling means; absent until enough prior data exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub averages: Option<RollingAverages>,
}

/// Movement of one score between consecutive runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTrend {
    /// Score from the current run.
    pub current: i64,
    /// Score from the previous run.
    pub previous: i64,
    /// `current - previous`.
    pub change: i64,
    /// Sign of the change.
    pub direction: Direction,
    /// Rounded percentage change; 0 when the previous score was 0.
    pub percentage: i64,
}

/// Sign of a score movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Score increased.
    Up,
    /// Score decreased.
    Down,
    /// Score unchanged.
    Stable,
}

/// Movement of a plain count (errors, warnings, response time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTrend {
    /// Value from the current run.
    pub current: i64,
    /// Value from the previous run.
    pub previous: i64,
    /// `current - previous`.
    pub change: i64,
}

impl CountTrend {
    fn between(current: i64, previous: i64) -> Self {
        Self {
            current,
            previous,
            change: current - previous,
        }
    }
}

/// Rolling means over the most recent prior entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingAverages {
    /// Means over the last 7 prior entries.
    pub last7_days: WindowAverage,
    /// Means over the last 30 prior entries; absent below 30 entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last30_days: Option<WindowAverage>,
}

/// Mean overall score and response time across a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowAverage {
    /// Mean overall score.
    pub overall_score: f64,
    /// Mean response time in milliseconds.
    pub response_time_ms: f64,
}

/// Compares the current run against the previous record and rolling windows.
///
/// `history` must be the PRE-APPEND sequence: the current record is not yet
/// part of it. An empty history short-circuits to the first-run sentinel.
pub fn calculate_trends(
    scores: &Scores,
    errors: &[Issue],
    warnings: &[Issue],
    response_time_ms: u64,
    history: &[MetricRecord],
) -> Trends {
    let Some(previous) = history.last() else {
        return Trends::FirstRun(FirstRun {
            is_first_run: true,
            message: "First monitoring run; nothing to compare against yet.".to_string(),
        });
    };

    let mut score_trends = BTreeMap::new();
    for category in ScoreCategory::iter() {
        let current = scores.get(category);
        let prev = previous.scores.get(category);
        score_trends.insert(category, score_trend(current, prev));
    }

    Trends::Computed(TrendSet {
        scores: score_trends,
        errors: CountTrend::between(errors.len() as i64, previous.errors.len() as i64),
        warnings: CountTrend::between(warnings.len() as i64, previous.warnings.len() as i64),
        response_time: CountTrend::between(
            response_time_ms as i64,
            previous.response_time_ms as i64,
        ),
        averages: rolling_averages(history),
    })
}

fn score_trend(current: i64, previous: i64) -> ScoreTrend {
    let change = current - previous;
    let direction = match change {
        c if c > 0 => Direction::Up,
        c if c < 0 => Direction::Down,
        _ => Direction::Stable,
    };
    // Guarded by the short-circuit, not an epsilon: a previous score of 0
    // yields 0 percent rather than a division.
    let percentage = if previous > 0 {
        ((change as f64 / previous as f64) * 100.0).round() as i64
    } else {
        0
    };
    ScoreTrend {
        current,
        previous,
        change,
        direction,
        percentage,
    }
}

fn rolling_averages(history: &[MetricRecord]) -> Option<RollingAverages> {
    if history.len() < SHORT_AVERAGE_WINDOW {
        return None;
    }
    let last7 = window_average(&history[history.len() - SHORT_AVERAGE_WINDOW..]);
    let last30 = (history.len() >= LONG_AVERAGE_WINDOW)
        .then(|| window_average(&history[history.len() - LONG_AVERAGE_WINDOW..]));
    Some(RollingAverages {
        last7_days: last7,
        last30_days: last30,
    })
}

fn window_average(window: &[MetricRecord]) -> WindowAverage {
    let n = window.len() as f64;
    WindowAverage {
        overall_score: window.iter().map(|r| r.scores.overall as f64).sum::<f64>() / n,
        response_time_ms: window
            .iter()
            .map(|r| r.response_time_ms as f64)
            .sum::<f64>()
            / n,
    }
}
