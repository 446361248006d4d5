//! Audit collaborator seam.
//!
//! The monitor treats the audit step as an opaque collaborator: anything
//! implementing [`Auditor`] can drive a monitoring run. The result shape is
//! deliberately loose — every field is optional and absences are defaulted
//! downstream during extraction, so externally produced audit JSON can be
//! fed in unchanged.

mod checks;
mod http;

pub use http::HttpAuditor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::metrics::ScoreCategory;

/// Produces an [`AuditOutcome`] for a URL.
///
/// Implementations are free to fetch over the network, replay recorded
/// results, or synthesize data for tests. The monitor imposes no timeout and
/// performs no retries; a returned error ends the run with a recorded
/// failure rather than a propagated one.
#[async_trait]
pub trait Auditor: Send + Sync {
    /// Audits a single URL.
    async fn audit(&self, url: &str) -> anyhow::Result<AuditOutcome>;
}

/// Loosely-structured audit result.
///
/// Every category is optional, as is everything inside it. Missing pieces
/// are not errors; extraction substitutes defaults (scores become 0, issue
/// lists become empty).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuditOutcome {
    /// Meta tag checks (title, description, canonical, viewport).
    pub meta: Option<CategoryReport>,
    /// Structured data checks (JSON-LD).
    pub schema: Option<CategoryReport>,
    /// Social sharing tag checks (Open Graph, Twitter cards).
    pub social: Option<CategoryReport>,
    /// Sitemap reachability.
    pub sitemap: Option<CategoryReport>,
    /// Latency and page weight.
    pub performance: Option<CategoryReport>,
    /// Accessibility basics (alt text, document language).
    pub accessibility: Option<CategoryReport>,
    /// Transport security and security headers.
    pub security: Option<CategoryReport>,
    /// Roll-up over all categories, plus recommendations.
    pub overall: Option<OverallReport>,
    /// Page snapshot taken at audit time.
    pub page: Option<PageSnapshot>,
}

impl AuditOutcome {
    /// Returns the reported score for a category, if any.
    pub fn score_of(&self, category: ScoreCategory) -> Option<i64> {
        match category {
            ScoreCategory::Overall => self.overall.as_ref().and_then(|o| o.score),
            _ => self.component(category).and_then(|c| c.score),
        }
    }

    /// Returns the reported issues for a category, defaulting to none.
    pub fn issues_of(&self, category: ScoreCategory) -> &[RawIssue] {
        let issues = match category {
            ScoreCategory::Overall => self.overall.as_ref().and_then(|o| o.issues.as_deref()),
            _ => self.component(category).and_then(|c| c.issues.as_deref()),
        };
        issues.unwrap_or(&[])
    }

    fn component(&self, category: ScoreCategory) -> Option<&CategoryReport> {
        match category {
            ScoreCategory::Overall => None,
            ScoreCategory::Meta => self.meta.as_ref(),
            ScoreCategory::Schema => self.schema.as_ref(),
            ScoreCategory::Social => self.social.as_ref(),
            ScoreCategory::Sitemap => self.sitemap.as_ref(),
            ScoreCategory::Performance => self.performance.as_ref(),
            ScoreCategory::Accessibility => self.accessibility.as_ref(),
            ScoreCategory::Security => self.security.as_ref(),
        }
    }
}

/// One category's portion of an audit result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CategoryReport {
    /// Category score, nominally 0-100. Not validated here.
    pub score: Option<i64>,
    /// Problems found while checking this category.
    pub issues: Option<Vec<RawIssue>>,
}

/// The overall roll-up portion of an audit result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverallReport {
    /// Combined score, nominally 0-100.
    pub score: Option<i64>,
    /// Cross-category problems; each may name its source `category`.
    pub issues: Option<Vec<RawIssue>>,
    /// Suggested follow-ups, either bare strings or detailed objects.
    pub recommendations: Option<Vec<RawRecommendation>>,
}

/// A problem reported by the auditor, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawIssue {
    /// "error" or "warning"; anything else is ignored by extraction.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Human-readable description.
    pub message: Option<String>,
    /// Severity label (e.g. "low", "medium", "high").
    pub severity: Option<String>,
    /// Optional machine tag for the specific check.
    pub tag: Option<String>,
    /// Originating category, used only on overall issues.
    pub category: Option<String>,
}

/// A recommendation as the auditor reported it.
///
/// Audit sources emit either bare strings or objects with explicit fields;
/// both deserialize here and are normalized during extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawRecommendation {
    /// A bare message; priority and category are defaulted downstream.
    Text(String),
    /// A fully-specified recommendation (fields still optional).
    Detailed {
        /// Human-readable suggestion.
        #[serde(default)]
        message: Option<String>,
        /// Priority label (e.g. "low", "medium", "high").
        #[serde(default)]
        priority: Option<String>,
        /// Area the suggestion applies to.
        #[serde(default)]
        category: Option<String>,
    },
}

/// Page facts captured at audit time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageSnapshot {
    /// Document title.
    pub title: Option<String>,
    /// Meta description content.
    pub description: Option<String>,
    /// Whether any JSON-LD structured data was present.
    pub has_structured_data: Option<bool>,
    /// Whether any Open Graph or Twitter card tags were present.
    pub has_social_tags: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcome_defaults() {
        let outcome = AuditOutcome::default();
        assert_eq!(outcome.score_of(ScoreCategory::Overall), None);
        assert_eq!(outcome.score_of(ScoreCategory::Meta), None);
        assert!(outcome.issues_of(ScoreCategory::Security).is_empty());
    }

    #[test]
    fn test_outcome_deserializes_from_sparse_json() {
        // Only a couple of fields present; everything else defaults.
        let json = r#"{"meta": {"score": 85}, "overall": {"score": 72, "recommendations": ["Add a sitemap"]}}"#;
        let outcome: AuditOutcome = serde_json::from_str(json).expect("sparse JSON should parse");
        assert_eq!(outcome.score_of(ScoreCategory::Meta), Some(85));
        assert_eq!(outcome.score_of(ScoreCategory::Overall), Some(72));
        assert_eq!(outcome.score_of(ScoreCategory::Schema), None);
        let recs = outcome.overall.unwrap().recommendations.unwrap();
        assert_eq!(recs, vec![RawRecommendation::Text("Add a sitemap".into())]);
    }

    #[test]
    fn test_raw_recommendation_object_form() {
        let json = r#"[{"message": "Shorten the title", "priority": "high"}, "Plain advice"]"#;
        let recs: Vec<RawRecommendation> = serde_json::from_str(json).expect("should parse");
        match &recs[0] {
            RawRecommendation::Detailed {
                message, priority, ..
            } => {
                assert_eq!(message.as_deref(), Some("Shorten the title"));
                assert_eq!(priority.as_deref(), Some("high"));
            }
            other => panic!("expected detailed recommendation, got {other:?}"),
        }
        assert_eq!(recs[1], RawRecommendation::Text("Plain advice".into()));
    }
}
