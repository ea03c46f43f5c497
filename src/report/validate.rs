use crate::types::gem::{GemsDocument, ScoredGem};
use chrono::DateTime;
use std::fmt;
use url::Url;

pub const ACTIVITY_WEEKS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.path, self.message)
    }
}

/// Checks a document against the contract the presentation layer relies on.
pub fn validate_document(document: &GemsDocument) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if DateTime::parse_from_rfc3339(&document.last_mined).is_err() {
        issues.push(issue("last_mined", "not an RFC 3339 timestamp"));
    }
    if document.count != document.gems.len() {
        issues.push(issue(
            "count",
            &format!(
                "count ({}) does not match gems length ({})",
                document.count,
                document.gems.len()
            ),
        ));
    }
    for (index, gem) in document.gems.iter().enumerate() {
        validate_gem(&format!("gems.{index}"), gem, &mut issues);
    }

    issues
}

fn validate_gem(prefix: &str, gem: &ScoredGem, issues: &mut Vec<ValidationIssue>) {
    let at = |field: &str| format!("{prefix}.{field}");

    if gem.name.trim().is_empty() {
        issues.push(issue(&at("name"), "empty name"));
    }
    match gem.full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && name == gem.name => {}
        _ => issues.push(issue(&at("full_name"), "expected owner/name")),
    }
    for (field, value) in [
        ("url", &gem.url),
        ("good_first_issues_url", &gem.good_first_issues_url),
    ] {
        if Url::parse(value).is_err() {
            issues.push(issue(&at(field), "invalid url"));
        }
    }
    if !gem.gem_score.is_finite() {
        issues.push(issue(&at("gem_score"), "not a finite number"));
    }
    if !gem.momentum_trend.is_finite() || gem.momentum_trend < 0.0 {
        issues.push(issue(&at("momentum_trend"), "must be finite and non-negative"));
    }
    if gem.activity.len() != ACTIVITY_WEEKS {
        issues.push(issue(
            &at("activity"),
            &format!("expected {ACTIVITY_WEEKS} entries, got {}", gem.activity.len()),
        ));
    }
}

fn issue(path: &str, message: &str) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        message: message.to_string(),
    }
}
