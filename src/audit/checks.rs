//! Page checks for the built-in HTTP auditor.
//!
//! Each check inspects the fetched page and produces one category's score
//! and issues. Scores start at 100 and lose points per finding; the overall
//! score is a weighted mean with aggregated cross-category issues and
//! recommendations.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::metrics::ScoreCategory;

use super::{
    AuditOutcome, CategoryReport, OverallReport, PageSnapshot, RawIssue, RawRecommendation,
};

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "title";
const META_DESCRIPTION_SELECTOR_STR: &str = "meta[name='description']";
const CANONICAL_SELECTOR_STR: &str = "link[rel='canonical']";
const VIEWPORT_SELECTOR_STR: &str = "meta[name='viewport']";
const JSON_LD_SELECTOR_STR: &str = "script[type='application/ld+json']";
const OG_TAG_SELECTOR_STR: &str = "meta[property^='og:']";
const TWITTER_TAG_SELECTOR_STR: &str = "meta[name^='twitter:']";
const IMG_SELECTOR_STR: &str = "img";
const HTML_SELECTOR_STR: &str = "html";

/// Security-relevant response headers checked by the security audit.
const SECURITY_HEADERS: [&str; 5] = [
    "Strict-Transport-Security",
    "Content-Security-Policy",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "Referrer-Policy",
];

fn selector(s: &'static str) -> Selector {
    // Selector strings are compile-time constants; a parse failure is a
    // programming error, not a runtime condition.
    Selector::parse(s).unwrap_or_else(|e| panic!("invalid selector '{s}': {e}"))
}

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(TITLE_SELECTOR_STR));
static META_DESCRIPTION_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector(META_DESCRIPTION_SELECTOR_STR));
static CANONICAL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(CANONICAL_SELECTOR_STR));
static VIEWPORT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(VIEWPORT_SELECTOR_STR));
static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(JSON_LD_SELECTOR_STR));
static OG_TAG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(OG_TAG_SELECTOR_STR));
static TWITTER_TAG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector(TWITTER_TAG_SELECTOR_STR));
static IMG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(IMG_SELECTOR_STR));
static HTML_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector(HTML_SELECTOR_STR));

fn error(message: impl Into<String>) -> RawIssue {
    RawIssue {
        kind: Some("error".to_string()),
        message: Some(message.into()),
        severity: Some("high".to_string()),
        tag: None,
        category: None,
    }
}

fn warning(message: impl Into<String>) -> RawIssue {
    RawIssue {
        kind: Some("warning".to_string()),
        message: Some(message.into()),
        severity: Some("medium".to_string()),
        tag: None,
        category: None,
    }
}

/// Everything the auditor observed about one HTTP response, handed to the
/// sync check pipeline after all network awaits are done.
pub(crate) struct FetchedPage<'a> {
    /// Final URL after redirects.
    pub url: &'a Url,
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: &'a reqwest::header::HeaderMap,
    /// Response body.
    pub body: &'a str,
    /// Milliseconds the fetch took.
    pub response_time_ms: u64,
    /// Whether /sitemap.xml answered with a success status.
    pub sitemap_found: bool,
}

/// Runs every check over a fetched page and assembles the audit outcome.
pub(crate) fn build_outcome(page: &FetchedPage<'_>) -> AuditOutcome {
    let document = Html::parse_document(page.body);

    let meta = check_meta(&document);
    let schema = check_schema(&document);
    let social = check_social(&document);
    let sitemap = check_sitemap(page.sitemap_found);
    let performance = check_performance(page.response_time_ms, page.body.len(), page.status);
    let accessibility = check_accessibility(&document);
    let security = check_security(page.url, page.headers);

    let snapshot = page_snapshot(&document, &schema, &social);

    let categories = [
        (ScoreCategory::Meta, &meta),
        (ScoreCategory::Schema, &schema),
        (ScoreCategory::Social, &social),
        (ScoreCategory::Sitemap, &sitemap),
        (ScoreCategory::Performance, &performance),
        (ScoreCategory::Accessibility, &accessibility),
        (ScoreCategory::Security, &security),
    ];
    let overall = roll_up(&categories);

    AuditOutcome {
        meta: Some(meta),
        schema: Some(schema),
        social: Some(social),
        sitemap: Some(sitemap),
        performance: Some(performance),
        accessibility: Some(accessibility),
        security: Some(security),
        overall: Some(overall),
        page: Some(snapshot),
    }
}

fn check_meta(document: &Html) -> CategoryReport {
    let mut score: i64 = 100;
    let mut issues = Vec::new();

    let title: Option<String> = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());
    match title {
        None => {
            score -= 30;
            issues.push(error("Missing <title> element"));
        }
        Some(title) if title.chars().count() < 30 || title.chars().count() > 60 => {
            score -= 10;
            issues.push(warning(format!(
                "Title length {} is outside the 30-60 character range",
                title.chars().count()
            )));
        }
        Some(_) => {}
    }

    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|d| !d.is_empty());
    match description {
        None => {
            score -= 25;
            issues.push(error("Missing meta description"));
        }
        Some(d) if d.chars().count() < 50 || d.chars().count() > 160 => {
            score -= 10;
            issues.push(warning(format!(
                "Meta description length {} is outside the 50-160 character range",
                d.chars().count()
            )));
        }
        Some(_) => {}
    }

    if document.select(&CANONICAL_SELECTOR).next().is_none() {
        score -= 10;
        issues.push(warning("Missing canonical link"));
    }

    if document.select(&VIEWPORT_SELECTOR).next().is_none() {
        score -= 10;
        issues.push(warning("Missing viewport meta tag"));
    }

    CategoryReport {
        score: Some(score.max(0)),
        issues: Some(issues),
    }
}

fn check_schema(document: &Html) -> CategoryReport {
    let mut issues = Vec::new();
    let mut valid_blocks = 0usize;
    let mut invalid_blocks = 0usize;

    for script in document.select(&JSON_LD_SELECTOR) {
        let raw = script.text().collect::<String>();
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(_) => valid_blocks += 1,
            Err(_) => {
                invalid_blocks += 1;
                issues.push(warning("JSON-LD block failed to parse"));
            }
        }
    }

    let score = if valid_blocks == 0 && invalid_blocks == 0 {
        issues.push(error("No JSON-LD structured data found"));
        40
    } else if invalid_blocks > 0 {
        70
    } else {
        100
    };

    CategoryReport {
        score: Some(score),
        issues: Some(issues),
    }
}

fn check_social(document: &Html) -> CategoryReport {
    let mut score: i64 = 100;
    let mut issues = Vec::new();

    let og_properties: Vec<String> = document
        .select(&OG_TAG_SELECTOR)
        .filter_map(|el| el.value().attr("property"))
        .map(str::to_string)
        .collect();
    let has_twitter = document.select(&TWITTER_TAG_SELECTOR).next().is_some();

    if og_properties.is_empty() && !has_twitter {
        return CategoryReport {
            score: Some(0),
            issues: Some(vec![error("No social sharing tags found")]),
        };
    }

    for required in ["og:title", "og:description", "og:image"] {
        if !og_properties.iter().any(|p| p == required) {
            score -= 20;
            issues.push(warning(format!("Missing {required} tag")));
        }
    }
    if !has_twitter {
        score -= 15;
        issues.push(warning("Missing Twitter card tags"));
    }

    CategoryReport {
        score: Some(score.max(0)),
        issues: Some(issues),
    }
}

fn check_sitemap(found: bool) -> CategoryReport {
    if found {
        CategoryReport {
            score: Some(100),
            issues: Some(Vec::new()),
        }
    } else {
        CategoryReport {
            score: Some(0),
            issues: Some(vec![error("sitemap.xml is not reachable")]),
        }
    }
}

fn check_performance(response_time_ms: u64, body_bytes: usize, status: u16) -> CategoryReport {
    let mut issues = Vec::new();

    let mut score: i64 = match response_time_ms {
        0..=800 => 100,
        801..=2000 => 85,
        2001..=5000 => 60,
        _ => 30,
    };
    if response_time_ms > 2000 {
        issues.push(warning(format!(
            "Page responded in {response_time_ms}ms"
        )));
    }

    // 2MB: beyond that, mobile load times suffer noticeably.
    if body_bytes > 2 * 1024 * 1024 {
        score -= 15;
        issues.push(warning(format!(
            "Page weighs {} bytes",
            body_bytes
        )));
    }

    if status >= 400 {
        score = 0;
        issues.push(error(format!("Page returned HTTP status {status}")));
    }

    CategoryReport {
        score: Some(score.max(0)),
        issues: Some(issues),
    }
}

fn check_accessibility(document: &Html) -> CategoryReport {
    let mut score: i64 = 100;
    let mut issues = Vec::new();

    let missing_alt = document
        .select(&IMG_SELECTOR)
        .filter(|img| {
            img.value()
                .attr("alt")
                .map(|alt| alt.trim().is_empty())
                .unwrap_or(true)
        })
        .count();
    if missing_alt > 0 {
        score -= (missing_alt as i64 * 5).min(40);
        issues.push(error(format!(
            "{missing_alt} image(s) missing alt text"
        )));
    }

    let has_lang = document
        .select(&HTML_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("lang"))
        .map(|lang| !lang.trim().is_empty())
        .unwrap_or(false);
    if !has_lang {
        score -= 15;
        issues.push(warning("Missing lang attribute on <html>"));
    }

    CategoryReport {
        score: Some(score.max(0)),
        issues: Some(issues),
    }
}

fn check_security(url: &Url, headers: &reqwest::header::HeaderMap) -> CategoryReport {
    let mut score: i64 = 100;
    let mut issues = Vec::new();

    let https = url.scheme() == "https";
    if !https {
        score -= 40;
        issues.push(error("Page is not served over HTTPS"));
    }

    for header in SECURITY_HEADERS {
        // HSTS only applies over HTTPS; skip it for plain HTTP pages.
        if header == "Strict-Transport-Security" && !https {
            continue;
        }
        if !headers.contains_key(header) {
            score -= 10;
            issues.push(warning(format!("Missing {header} header")));
        }
    }

    CategoryReport {
        score: Some(score.max(0)),
        issues: Some(issues),
    }
}

/// Weighted mean over the component categories plus aggregated issues and
/// recommendations. Categories scoring under 50 surface as overall errors,
/// under 70 as overall warnings.
fn roll_up(categories: &[(ScoreCategory, &CategoryReport)]) -> OverallReport {
    // Weights sum to 100; headline concerns (meta, performance) count double.
    let weight = |category: ScoreCategory| -> i64 {
        match category {
            ScoreCategory::Meta | ScoreCategory::Performance => 20,
            ScoreCategory::Accessibility | ScoreCategory::Security => 15,
            _ => 10,
        }
    };

    let mut weighted_sum = 0i64;
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    for (category, report) in categories {
        let score = report.score.unwrap_or(0);
        weighted_sum += score * weight(*category);

        if score < 50 {
            let mut issue = error(format!("{category} checks scored {score}"));
            issue.category = Some(category.to_string());
            issues.push(issue);
            recommendations.push(RawRecommendation::Detailed {
                message: Some(format!("Fix the failing {category} checks")),
                priority: Some("high".to_string()),
                category: Some(category.to_string()),
            });
        } else if score < 70 {
            let mut issue = warning(format!("{category} checks scored {score}"));
            issue.category = Some(category.to_string());
            issues.push(issue);
            recommendations.push(RawRecommendation::Detailed {
                message: Some(format!("Review the {category} findings")),
                priority: Some("medium".to_string()),
                category: Some(category.to_string()),
            });
        }
    }

    OverallReport {
        score: Some(weighted_sum / 100),
        issues: Some(issues),
        recommendations: Some(recommendations),
    }
}

fn page_snapshot(
    document: &Html,
    schema: &CategoryReport,
    social: &CategoryReport,
) -> PageSnapshot {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string());
    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|d| d.trim().to_string());

    PageSnapshot {
        title,
        description,
        has_structured_data: Some(schema.score.unwrap_or(0) > 40),
        has_social_tags: Some(social.score.unwrap_or(0) > 0),
    }
}
