use serde::Deserialize;

/// A repository node as returned by the search API.
///
/// Every field is optional; defaults are applied once in `normalize`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepository {
    pub name: Option<String>,
    pub owner: Option<RawOwner>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub stargazer_count: Option<u64>,
    pub fork_count: Option<u64>,
    pub created_at: Option<String>,
    pub pushed_at: Option<String>,
    pub primary_language: Option<Named>,
    pub license_info: Option<RawLicense>,
    pub repository_topics: Option<Nodes<RawTopicNode>>,
    pub merged_prs: Option<Nodes<RawMergedPr>>,
    pub latest_release: Option<RawRelease>,
    pub default_branch_ref: Option<RawBranchRef>,
    pub issues: Option<TotalCount>,
    pub open_issues: Option<TotalCount>,
    pub repository_labels: Option<TotalCount>,
    pub enrichment: Option<RawEnrichment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOwner {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLicense {
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Option<Vec<Option<T>>>,
}

impl<T> Nodes<T> {
    pub fn present(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().flatten().flatten()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTopicNode {
    pub topic: Option<Named>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMergedPr {
    pub merged_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRelease {
    pub tag_name: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBranchRef {
    pub target: Option<RawCommitWindows>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommitWindows {
    pub w1: Option<TotalCount>,
    pub w2: Option<TotalCount>,
    pub w3: Option<TotalCount>,
    pub w4: Option<TotalCount>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnrichment {
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub on_hacker_news: bool,
    pub summary: Option<String>,
    pub bundle_size: Option<u64>,
}

pub fn count(value: Option<&TotalCount>) -> u64 {
    value.and_then(|count| count.total_count).unwrap_or(0)
}
