pub mod plan;
pub mod raw;

use crate::error::{MinerError, Result};
use crate::types::signal::{Enrichment, LatestRelease, RepositorySignal, WeeklyCommits};
use chrono::{DateTime, Duration, Utc};
use raw::{count, RawRepository};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

const MAX_TOPICS: usize = 3;

/// Discovery output handed to the scoring core.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Full {
        #[serde(default)]
        trending: Vec<String>,
        repositories: Vec<serde_json::Value>,
    },
    Nodes(Vec<serde_json::Value>),
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub signals: Vec<RepositorySignal>,
    pub malformed: usize,
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions<'a> {
    pub now: DateTime<Utc>,
    pub merged_pr_lookback_days: u32,
    pub host_url: &'a str,
}

pub fn load_snapshot(path: &Path, options: &NormalizeOptions<'_>) -> Result<Snapshot> {
    if !path.exists() {
        return Err(MinerError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&content, options)?;
    info!(
        path = %path.display(),
        repositories = snapshot.signals.len(),
        malformed = snapshot.malformed,
        "loaded discovery snapshot"
    );
    Ok(snapshot)
}

/// Parses a snapshot, dropping individual records that cannot be normalised.
pub fn parse_snapshot(content: &str, options: &NormalizeOptions<'_>) -> Result<Snapshot> {
    let file: SnapshotFile = serde_json::from_str(content)
        .map_err(|e| MinerError::SnapshotParse(e.to_string()))?;
    let (trending, nodes) = match file {
        SnapshotFile::Full {
            trending,
            repositories,
        } => (trending, repositories),
        SnapshotFile::Nodes(nodes) => (Vec::new(), nodes),
    };
    let trending: HashSet<String> = trending.into_iter().collect();

    let mut signals = Vec::with_capacity(nodes.len());
    let mut malformed = 0;
    for (index, node) in nodes.into_iter().enumerate() {
        let parsed = serde_json::from_value::<RawRepository>(node)
            .map_err(|e| MinerError::MalformedRecord {
                key: format!("#{index}"),
                reason: e.to_string(),
            })
            .and_then(|raw| normalize(&raw, &trending, options));
        match parsed {
            Ok(signal) => signals.push(signal),
            Err(err) => {
                warn!(error = %err, "dropping malformed repository record");
                malformed += 1;
            }
        }
    }

    Ok(Snapshot {
        signals: dedupe(signals),
        malformed,
    })
}

/// Converts a raw node into a fully resolved signal.
pub fn normalize(
    raw: &RawRepository,
    trending: &HashSet<String>,
    options: &NormalizeOptions<'_>,
) -> Result<RepositorySignal> {
    let name = non_empty(raw.name.as_deref());
    let owner = non_empty(raw.owner.as_ref().and_then(|owner| owner.login.as_deref()));
    let (owner, name) = match (owner, name) {
        (Some(owner), Some(name)) => (owner.to_string(), name.to_string()),
        (owner, name) => {
            return Err(MinerError::MalformedRecord {
                key: format!("{}/{}", owner.unwrap_or("?"), name.unwrap_or("?")),
                reason: "missing owner login or name".to_string(),
            })
        }
    };
    let full_name = format!("{owner}/{name}");

    let created_at = raw
        .created_at
        .as_deref()
        .ok_or_else(|| MinerError::MalformedRecord {
            key: full_name.clone(),
            reason: "missing createdAt".to_string(),
        })
        .and_then(|value| {
            parse_timestamp(value).ok_or_else(|| MinerError::MalformedRecord {
                key: full_name.clone(),
                reason: format!("unparsable createdAt '{value}'"),
            })
        })?;

    let windows = raw
        .default_branch_ref
        .as_ref()
        .and_then(|branch| branch.target.as_ref());
    let commits = WeeklyCommits {
        w1: count(windows.and_then(|w| w.w1.as_ref())),
        w2: count(windows.and_then(|w| w.w2.as_ref())),
        w3: count(windows.and_then(|w| w.w3.as_ref())),
        w4: count(windows.and_then(|w| w.w4.as_ref())),
    };

    let merges: Vec<Option<DateTime<Utc>>> = raw
        .merged_prs
        .iter()
        .flat_map(|prs| prs.present())
        .map(|pr| pr.merged_at.as_deref().and_then(parse_timestamp))
        .collect();
    let cutoff = options.now - Duration::days(i64::from(options.merged_pr_lookback_days));
    let merged_prs_in_window = merges
        .iter()
        .flatten()
        .filter(|merged_at| **merged_at > cutoff)
        .count() as u64;
    let last_merged_at = merges.first().copied().flatten();

    let topics = raw
        .repository_topics
        .iter()
        .flat_map(|topics| topics.present())
        .filter_map(|node| node.topic.as_ref().and_then(|topic| topic.name.clone()))
        .take(MAX_TOPICS)
        .collect();

    let latest_release = raw.latest_release.as_ref().and_then(|release| {
        Some(LatestRelease {
            tag: release.tag_name.clone()?,
            published_at: release.published_at.clone()?,
        })
    });

    let raw_enrichment = raw.enrichment.clone().unwrap_or_default();
    let enrichment = Enrichment {
        trending: raw_enrichment.trending || trending.contains(&full_name),
        on_hacker_news: raw_enrichment.on_hacker_news,
        summary: raw_enrichment.summary,
        bundle_size: raw_enrichment.bundle_size,
    };

    let url = non_empty(raw.url.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| {
            format!(
                "{}/{full_name}",
                options.host_url.trim_end_matches('/')
            )
        });

    Ok(RepositorySignal {
        owner,
        name,
        url,
        description: raw.description.clone(),
        language: raw
            .primary_language
            .as_ref()
            .and_then(|language| non_empty(language.name.as_deref()))
            .map(str::to_string),
        license: raw
            .license_info
            .as_ref()
            .and_then(|license| license.spdx_id.clone()),
        topics,
        stars: raw.stargazer_count.unwrap_or(0),
        forks: raw.fork_count.unwrap_or(0),
        open_issues: count(raw.open_issues.as_ref()),
        created_at,
        pushed_at: raw.pushed_at.clone(),
        commits,
        merged_prs_in_window,
        last_merged_at,
        labeled_issues: count(raw.repository_labels.as_ref()),
        has_good_first_issues: count(raw.issues.as_ref()) > 0,
        latest_release,
        enrichment,
    })
}

/// Keeps one record per `owner/name`; the first position wins, the last value wins.
pub fn dedupe(signals: Vec<RepositorySignal>) -> Vec<RepositorySignal> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<RepositorySignal> = Vec::with_capacity(signals.len());
    for signal in signals {
        match positions.get(&signal.full_name()) {
            Some(&index) => unique[index] = signal,
            None => {
                positions.insert(signal.full_name(), unique.len());
                unique.push(signal);
            }
        }
    }
    unique
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
