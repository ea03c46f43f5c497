use crate::types::config::KeywordLists;
use crate::types::signal::RepositorySignal;
use regex::Regex;
use std::sync::LazyLock;

// Names produced by daily-update bots: embedded ISO dates or long numeric runs.
static DATED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("date pattern is valid"));
static NUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{6,}").expect("numeric pattern is valid"));

/// Keyword classifier for churn and hype repositories.
///
/// Matching is a case-insensitive substring scan over the repository name
/// and description.
#[derive(Debug, Clone)]
pub struct Classifier {
    churn: Vec<String>,
    hype: Vec<String>,
}

impl Classifier {
    pub fn new(keywords: &KeywordLists) -> Self {
        Self {
            churn: lowercase_all(&keywords.churn),
            hype: lowercase_all(&keywords.hype),
        }
    }

    pub fn is_likely_churn(&self, name: &str, description: &str) -> bool {
        let name = name.to_lowercase();
        let description = description.to_lowercase();
        if matches_any(&self.churn, &name, &description) {
            return true;
        }
        DATED_NAME.is_match(&name) || NUMERIC_RUN.is_match(&name)
    }

    pub fn is_hype(&self, name: &str, description: &str) -> bool {
        matches_any(&self.hype, &name.to_lowercase(), &description.to_lowercase())
    }

    pub fn signal_is_churn(&self, signal: &RepositorySignal) -> bool {
        self.is_likely_churn(&signal.name, signal.description_or_empty())
    }

    pub fn signal_is_hype(&self, signal: &RepositorySignal) -> bool {
        self.is_hype(&signal.name, signal.description_or_empty())
    }
}

fn lowercase_all(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|keyword| keyword.to_lowercase()).collect()
}

fn matches_any(keywords: &[String], name: &str, description: &str) -> bool {
    keywords
        .iter()
        .any(|keyword| name.contains(keyword.as_str()) || description.contains(keyword.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(&KeywordLists::default())
    }

    #[test]
    fn churn_keyword_in_name_is_flagged() {
        assert!(classifier().is_likely_churn("my-proxy-list", ""));
    }

    #[test]
    fn plain_awesome_prefix_is_not_churn() {
        assert!(!classifier().is_likely_churn("awesome-thing", ""));
    }

    #[test]
    fn dated_snapshot_name_is_churn() {
        assert!(classifier().is_likely_churn("update-2023-10-01", ""));
    }

    #[test]
    fn long_numeric_run_is_churn() {
        assert!(classifier().is_likely_churn("build-20231001", ""));
        assert!(!classifier().is_likely_churn("vec3", ""));
    }

    #[test]
    fn churn_keyword_in_description_is_flagged_case_insensitively() {
        assert!(classifier().is_likely_churn("tool", "Solutions to LeetCode problems"));
    }

    #[test]
    fn hype_examples() {
        let c = classifier();
        assert!(c.is_hype("ai-generator", ""));
        assert!(!c.is_hype("database-driver", ""));
        assert!(c.is_hype("pipeline", "Run Stable Diffusion locally"));
    }

    #[test]
    fn hype_and_churn_are_independent() {
        let c = classifier();
        assert!(c.is_hype("gpt-proxy", ""));
        assert!(c.is_likely_churn("gpt-proxy", ""));
        assert!(c.is_hype("llm-runtime", ""));
        assert!(!c.is_likely_churn("llm-runtime", ""));
    }

    #[test]
    fn injected_keyword_lists_replace_defaults() {
        let c = Classifier::new(&KeywordLists {
            churn: vec!["Snapshot".to_string()],
            hype: vec!["Quantum".to_string()],
        });
        assert!(c.is_likely_churn("daily-snapshot", ""));
        assert!(!c.is_likely_churn("my-proxy-list", ""));
        assert!(c.is_hype("qubits", "quantum toolkit"));
        assert!(!c.is_hype("ai-generator", ""));
    }

    #[test]
    fn signal_with_missing_description_is_classified() {
        let now = chrono::Utc::now();
        let signal = RepositorySignal::fixture("ai-generator", now);
        assert!(classifier().signal_is_hype(&signal));
        assert!(!classifier().signal_is_churn(&signal));
    }
}
