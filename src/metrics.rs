//! Metric record model and audit result extraction.
//!
//! Extraction is deliberately permissive: the audit result is produced
//! elsewhere and never validated here. A missing category yields a zero
//! score, missing issue lists yield empty sequences, and a completely empty
//! result still produces a valid record. Degraded data beats a thrown error
//! for a monitoring tool that has to keep its history moving.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::audit::{AuditOutcome, RawRecommendation};
use crate::config::MAX_RECOMMENDATIONS;
use crate::trends::Trends;

/// The fixed set of scored categories.
///
/// Declaration order is the extraction order: component categories first,
/// `overall` handled separately where the distinction matters.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    /// Roll-up over all categories.
    Overall,
    /// Title, description, canonical, viewport tags.
    Meta,
    /// Structured data (JSON-LD).
    Schema,
    /// Open Graph / Twitter card tags.
    Social,
    /// Sitemap reachability.
    Sitemap,
    /// Latency and page weight.
    Performance,
    /// Accessibility basics.
    Accessibility,
    /// Transport security and security headers.
    Security,
}

impl ScoreCategory {
    /// The seven component categories, in extraction order (overall excluded).
    pub fn components() -> impl Iterator<Item = ScoreCategory> {
        Self::iter().filter(|c| !matches!(c, ScoreCategory::Overall))
    }
}

/// Whether an issue (or alert) is an error or a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// A problem that should be fixed.
    Error,
    /// A problem worth attention but not necessarily action.
    Warning,
}

/// One score per category. All zero by default; never clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scores {
    /// Roll-up score.
    pub overall: i64,
    /// Meta tag score.
    pub meta: i64,
    /// Structured data score.
    pub schema: i64,
    /// Social tag score.
    pub social: i64,
    /// Sitemap score.
    pub sitemap: i64,
    /// Performance score.
    pub performance: i64,
    /// Accessibility score.
    pub accessibility: i64,
    /// Security score.
    pub security: i64,
}

impl Scores {
    /// Returns the score for a category.
    pub fn get(&self, category: ScoreCategory) -> i64 {
        match category {
            ScoreCategory::Overall => self.overall,
            ScoreCategory::Meta => self.meta,
            ScoreCategory::Schema => self.schema,
            ScoreCategory::Social => self.social,
            ScoreCategory::Sitemap => self.sitemap,
            ScoreCategory::Performance => self.performance,
            ScoreCategory::Accessibility => self.accessibility,
            ScoreCategory::Security => self.security,
        }
    }

    /// Sets the score for a category.
    pub fn set(&mut self, category: ScoreCategory, value: i64) {
        match category {
            ScoreCategory::Overall => self.overall = value,
            ScoreCategory::Meta => self.meta = value,
            ScoreCategory::Schema => self.schema = value,
            ScoreCategory::Social => self.social = value,
            ScoreCategory::Sitemap => self.sitemap = value,
            ScoreCategory::Performance => self.performance = value,
            ScoreCategory::Accessibility => self.accessibility = value,
            ScoreCategory::Security => self.security = value,
        }
    }
}

/// A normalized problem record, tagged with its originating component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Category (or overall-issue label) the problem came from.
    pub component: String,
    /// Human-readable description.
    pub message: String,
    /// Severity label.
    pub severity: String,
    /// Optional machine tag for the specific check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A normalized recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Human-readable suggestion.
    pub message: String,
    /// Priority label.
    pub priority: String,
    /// Area the suggestion applies to.
    pub category: String,
}

/// Snapshot of page facts at audit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Document title, or "Unknown".
    pub title: String,
    /// Meta description, or "No description".
    pub description: String,
    /// Whether structured data was present.
    pub has_structured_data: bool,
    /// Whether social sharing tags were present.
    pub has_social_tags: bool,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            title: "Unknown".to_string(),
            description: "No description".to_string(),
            has_structured_data: false,
            has_social_tags: false,
        }
    }
}

/// One persisted snapshot of a monitoring run. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Instant the record was created.
    pub timestamp: DateTime<Utc>,
    /// The audited URL.
    pub url: String,
    /// Scores per category.
    pub scores: Scores,
    /// Milliseconds elapsed for the audit call.
    pub response_time_ms: u64,
    /// Error-type issues, extraction order.
    pub errors: Vec<Issue>,
    /// Warning-type issues, extraction order.
    pub warnings: Vec<Issue>,
    /// At most ten recommendations, source order.
    pub recommendations: Vec<Recommendation>,
    /// Page facts at audit time.
    pub page_info: PageInfo,
    /// Comparison against the previous record (or first-run sentinel).
    pub trends: Trends,
}

/// Reads every category score out of an audit result, defaulting absences
/// to zero. No clamping and no type coercion happens here.
pub fn extract_scores(outcome: &AuditOutcome) -> Scores {
    let mut scores = Scores::default();
    for category in ScoreCategory::iter() {
        scores.set(category, outcome.score_of(category).unwrap_or(0));
    }
    scores
}

/// Collects issues of one kind across the audit result.
///
/// Component categories are scanned in fixed order and each issue is tagged
/// with its component name; `overall.issues` are appended last, labeled with
/// their own `category` field (falling back to `"overall"`).
pub fn extract_issues(outcome: &AuditOutcome, kind: IssueKind) -> Vec<Issue> {
    let wanted = kind.to_string();
    let mut issues = Vec::new();

    for category in ScoreCategory::components() {
        for raw in outcome.issues_of(category) {
            if raw.kind.as_deref() == Some(wanted.as_str()) {
                issues.push(Issue {
                    component: category.to_string(),
                    message: raw.message.clone().unwrap_or_default(),
                    severity: raw
                        .severity
                        .clone()
                        .unwrap_or_else(|| "medium".to_string()),
                    tag: raw.tag.clone(),
                });
            }
        }
    }

    for raw in outcome.issues_of(ScoreCategory::Overall) {
        if raw.kind.as_deref() == Some(wanted.as_str()) {
            issues.push(Issue {
                component: raw
                    .category
                    .clone()
                    .unwrap_or_else(|| "overall".to_string()),
                message: raw.message.clone().unwrap_or_default(),
                severity: raw
                    .severity
                    .clone()
                    .unwrap_or_else(|| "medium".to_string()),
                tag: raw.tag.clone(),
            });
        }
    }

    issues
}

/// Normalizes `overall.recommendations`, keeping at most the first ten.
///
/// Bare strings become medium-priority general recommendations; object
/// entries keep their fields with the same defaults filling gaps.
pub fn extract_recommendations(outcome: &AuditOutcome) -> Vec<Recommendation> {
    outcome
        .overall
        .as_ref()
        .and_then(|o| o.recommendations.as_ref())
        .map(|recs| {
            recs.iter()
                .take(MAX_RECOMMENDATIONS)
                .map(|raw| match raw {
                    RawRecommendation::Text(message) => Recommendation {
                        message: message.clone(),
                        priority: "medium".to_string(),
                        category: "general".to_string(),
                    },
                    RawRecommendation::Detailed {
                        message,
                        priority,
                        category,
                    } => Recommendation {
                        message: message.clone().unwrap_or_default(),
                        priority: priority.clone().unwrap_or_else(|| "medium".to_string()),
                        category: category.clone().unwrap_or_else(|| "general".to_string()),
                    },
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Builds the page snapshot, substituting defaults for anything absent.
/// An empty title or description counts as absent.
pub fn extract_page_info(outcome: &AuditOutcome) -> PageInfo {
    let page = outcome.page.as_ref();
    PageInfo {
        title: page
            .and_then(|p| p.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        description: page
            .and_then(|p| p.description.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "No description".to_string()),
        has_structured_data: page.and_then(|p| p.has_structured_data).unwrap_or(false),
        has_social_tags: page.and_then(|p| p.has_social_tags).unwrap_or(false),
    }
}
