use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag: String,
    pub published_at: String,
}

/// A scored repository as emitted in `gems.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGem {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub url: String,
    pub stars: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub language: String,
    pub gem_score: f64,
    pub momentum_trend: f64,
    pub recent_commits: u64,
    pub merged_prs_count: u64,
    pub topics: Vec<String>,
    pub activity: Vec<u64>,
    pub good_first_issues_url: String,
    pub has_good_first_issues: bool,
    pub pushed_at: Option<String>,
    pub is_hype: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    pub latest_release: Option<ReleaseInfo>,
    #[serde(default)]
    pub featured: bool,
    pub maintenance_score: u64,
    #[serde(default)]
    pub bundle_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GemsDocument {
    pub last_mined: String,
    pub count: usize,
    pub gems: Vec<ScoredGem>,
}

impl GemsDocument {
    /// Builds a document whose `count` always matches `gems.len()`.
    pub fn new(last_mined: String, gems: Vec<ScoredGem>) -> Self {
        Self {
            last_mined,
            count: gems.len(),
            gems,
        }
    }

    pub fn hype_count(&self) -> usize {
        self.gems.iter().filter(|gem| gem.is_hype).count()
    }
}
