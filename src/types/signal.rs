use chrono::{DateTime, Utc};

/// Commit counts for four disjoint weekly windows; `w1` is the most recent week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyCommits {
    pub w1: u64,
    pub w2: u64,
    pub w3: u64,
    pub w4: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestRelease {
    pub tag: String,
    pub published_at: String,
}

/// Enrichment results resolved by the orchestration layer before scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub trending: bool,
    pub on_hacker_news: bool,
    pub summary: Option<String>,
    pub bundle_size: Option<u64>,
}

/// Normalised per-repository telemetry consumed by the scoring engine.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySignal {
    pub owner: String,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub license: Option<String>,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    pub created_at: DateTime<Utc>,
    pub pushed_at: Option<String>,
    pub commits: WeeklyCommits,
    pub merged_prs_in_window: u64,
    pub last_merged_at: Option<DateTime<Utc>>,
    pub labeled_issues: u64,
    pub has_good_first_issues: bool,
    pub latest_release: Option<LatestRelease>,
    pub enrichment: Enrichment,
}

impl RepositorySignal {
    /// Unique `owner/name` key.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    #[cfg(test)]
    pub(crate) fn fixture(name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            owner: "octo".to_string(),
            name: name.to_string(),
            url: format!("https://github.com/octo/{name}"),
            description: None,
            language: Some("Rust".to_string()),
            license: Some("MIT".to_string()),
            topics: Vec::new(),
            stars: 500,
            forks: 10,
            open_issues: 4,
            created_at,
            pushed_at: Some(created_at.to_rfc3339()),
            commits: WeeklyCommits::default(),
            merged_prs_in_window: 0,
            last_merged_at: None,
            labeled_issues: 0,
            has_good_first_issues: false,
            latest_release: None,
            enrichment: Enrichment::default(),
        }
    }
}
