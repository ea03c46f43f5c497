use crate::types::config::{DiscoverySettings, LanguagePolicy};
use chrono::{DateTime, Duration, Months, SecondsFormat, Utc};
use serde::Serialize;

/// Lower bounds of the four weekly commit windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeframes {
    pub w1: String,
    pub w2: String,
    pub w3: String,
    pub w4: String,
}

impl Timeframes {
    pub fn at(now: DateTime<Utc>) -> Self {
        let weeks_ago = |weeks: i64| {
            (now - Duration::days(7 * weeks)).to_rfc3339_opts(SecondsFormat::Millis, true)
        };
        Self {
            w1: weeks_ago(1),
            w2: weeks_ago(2),
            w3: weeks_ago(3),
            w4: weeks_ago(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedQuery {
    pub query: String,
    pub page_size: u32,
    pub max_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveryPlan {
    pub generated_at: String,
    pub timeframes: Timeframes,
    pub trending_limit: u32,
    pub queries: Vec<PlannedQuery>,
    pub retries: u32,
    pub backoff_schedule_ms: Vec<u64>,
}

impl DiscoveryPlan {
    pub fn build(
        now: DateTime<Utc>,
        settings: &DiscoverySettings,
        languages: &LanguagePolicy,
    ) -> Self {
        let base = base_query(now, settings);
        let mut queries = vec![PlannedQuery {
            query: base.clone(),
            page_size: settings.page_size,
            max_pages: settings.max_pages,
        }];
        queries.extend(languages.targets.iter().map(|language| PlannedQuery {
            query: format!("{base} language:{language}"),
            page_size: settings.page_size,
            max_pages: settings.language_max_pages,
        }));

        Self {
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            timeframes: Timeframes::at(now),
            trending_limit: settings.trending_limit,
            queries,
            retries: settings.retries,
            backoff_schedule_ms: backoff_schedule(settings.retries, settings.backoff_base_ms),
        }
    }
}

/// Search query for established repositories pushed to recently.
pub fn base_query(now: DateTime<Utc>, settings: &DiscoverySettings) -> String {
    let created_before = now
        .checked_sub_months(Months::new(settings.min_age_months))
        .unwrap_or(now);
    let pushed_after = now - Duration::days(i64::from(settings.pushed_within_days));
    format!(
        "stars:{}..{} created:<{} pushed:>{} sort:updated-desc",
        settings.min_stars,
        settings.max_stars,
        created_before.format("%Y-%m-%d"),
        pushed_after.format("%Y-%m-%d"),
    )
}

/// Delays before each retry: the wait after attempt `n` is `base * 2^n`.
pub fn backoff_schedule(retries: u32, base_ms: u64) -> Vec<u64> {
    (1..retries)
        .map(|attempt| base_ms.saturating_mul(1u64 << attempt.min(32)))
        .collect()
}
