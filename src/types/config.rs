use crate::error::MinerError;
use serde::Deserialize;
use std::collections::HashSet;

pub const DEFAULT_TARGET_LANGUAGES: &[&str] = &[
    "TypeScript",
    "JavaScript",
    "Rust",
    "Go",
    "Python",
    "Zig",
    "Swift",
    "Kotlin",
    "C++",
    "Mojo",
    "Odin",
];

pub const DEFAULT_MARKUP_LANGUAGES: &[&str] = &["Plain Text", "HTML", "CSS"];

pub const DEFAULT_BUNDLE_SIZE_LANGUAGES: &[&str] = &["TypeScript", "JavaScript"];

pub const DEFAULT_CHURN_KEYWORDS: &[&str] = &[
    "config",
    "vpn",
    "proxy",
    "list",
    "index",
    "blocklist",
    "iptv",
    "rules",
    "detect",
    "scripts",
    "backup",
    "hot-search",
    "trending",
    "awesome-list",
    "collection",
    "mirrors",
    "database",
    "dns",
    "auto-updated",
    "hosts",
    "payload",
    "cve",
    "poc",
    "homework",
    "assignment",
    "leetcode",
    "tutorial",
    "course",
];

pub const DEFAULT_HYPE_KEYWORDS: &[&str] = &[
    "ai",
    "llm",
    "gpt",
    "openai",
    "claude",
    "langchain",
    "agent",
    "deepseek",
    "gemini",
    "llama",
    "mistral",
    "rag",
    "vector",
    "embedding",
    "anthropic",
    "cohere",
    "stable diffusion",
    "midjourney",
    "prompt engineering",
];

/// Upper bound for any look-back window measured in days.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Raw, layered configuration as read from `gemminer.toml` files.
///
/// Every section is optional; the accessor methods resolve defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MinerConfig {
    pub scoring: Option<ScoringConfig>,
    pub languages: Option<LanguagesConfig>,
    pub classifier: Option<ClassifierConfig>,
    pub ranking: Option<RankingConfig>,
    pub discovery: Option<DiscoveryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub momentum_weight: Option<f64>,
    pub pr_velocity_weight: Option<f64>,
    pub labeled_issue_weight: Option<f64>,
    pub good_first_issue_bonus: Option<f64>,
    pub base_activity: Option<f64>,
    pub maturity_floor_months: Option<f64>,
    pub maturity_cap_months: Option<f64>,
    pub days_per_month: Option<f64>,
    pub merged_pr_lookback_days: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguagesConfig {
    pub targets: Option<Vec<String>>,
    pub markup: Option<Vec<String>>,
    pub target_multiplier: Option<f64>,
    pub markup_multiplier: Option<f64>,
    pub bundle_size_languages: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    pub churn_keywords: Option<Vec<String>>,
    pub hype_keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    Discovery,
    FullName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    pub hype_limit: Option<usize>,
    pub total_limit: Option<usize>,
    pub tie_break: Option<TieBreak>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    pub page_size: Option<u32>,
    pub max_pages: Option<u32>,
    pub language_max_pages: Option<u32>,
    pub trending_limit: Option<u32>,
    pub min_stars: Option<u64>,
    pub max_stars: Option<u64>,
    pub min_age_months: Option<u32>,
    pub pushed_within_days: Option<u32>,
    pub retries: Option<u32>,
    pub backoff_base_ms: Option<u64>,
    pub host_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub momentum_weight: f64,
    pub pr_velocity_weight: f64,
    pub labeled_issue_weight: f64,
    pub good_first_issue_bonus: f64,
    pub base_activity: f64,
    pub maturity_floor_months: f64,
    pub maturity_cap_months: f64,
    pub days_per_month: f64,
    pub merged_pr_lookback_days: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            momentum_weight: 20.0,
            pr_velocity_weight: 30.0,
            labeled_issue_weight: 2.0,
            good_first_issue_bonus: 50.0,
            base_activity: 10.0,
            maturity_floor_months: 6.0,
            maturity_cap_months: 60.0,
            days_per_month: 30.44,
            merged_pr_lookback_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePolicy {
    pub targets: Vec<String>,
    pub markup: Vec<String>,
    pub target_multiplier: f64,
    pub markup_multiplier: f64,
    pub bundle_size_languages: Vec<String>,
}

impl Default for LanguagePolicy {
    fn default() -> Self {
        Self {
            targets: owned(DEFAULT_TARGET_LANGUAGES),
            markup: owned(DEFAULT_MARKUP_LANGUAGES),
            target_multiplier: 1.2,
            markup_multiplier: 0.5,
            bundle_size_languages: owned(DEFAULT_BUNDLE_SIZE_LANGUAGES),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordLists {
    pub churn: Vec<String>,
    pub hype: Vec<String>,
}

impl Default for KeywordLists {
    fn default() -> Self {
        Self {
            churn: owned(DEFAULT_CHURN_KEYWORDS),
            hype: owned(DEFAULT_HYPE_KEYWORDS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingLimits {
    pub hype_limit: usize,
    pub total_limit: usize,
    pub tie_break: TieBreak,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            hype_limit: 75,
            total_limit: 250,
            tie_break: TieBreak::Discovery,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    pub page_size: u32,
    pub max_pages: u32,
    pub language_max_pages: u32,
    pub trending_limit: u32,
    pub min_stars: u64,
    pub max_stars: u64,
    pub min_age_months: u32,
    pub pushed_within_days: u32,
    pub retries: u32,
    pub backoff_base_ms: u64,
    pub host_url: String,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_pages: 3,
            language_max_pages: 2,
            trending_limit: 10,
            min_stars: 150,
            max_stars: 3000,
            min_age_months: 6,
            pushed_within_days: 7,
            retries: 3,
            backoff_base_ms: 1000,
            host_url: "https://github.com".to_string(),
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl MinerConfig {
    pub fn score_weights(&self) -> ScoreWeights {
        let defaults = ScoreWeights::default();
        match &self.scoring {
            Some(scoring) => ScoreWeights {
                momentum_weight: scoring.momentum_weight.unwrap_or(defaults.momentum_weight),
                pr_velocity_weight: scoring
                    .pr_velocity_weight
                    .unwrap_or(defaults.pr_velocity_weight),
                labeled_issue_weight: scoring
                    .labeled_issue_weight
                    .unwrap_or(defaults.labeled_issue_weight),
                good_first_issue_bonus: scoring
                    .good_first_issue_bonus
                    .unwrap_or(defaults.good_first_issue_bonus),
                base_activity: scoring.base_activity.unwrap_or(defaults.base_activity),
                maturity_floor_months: scoring
                    .maturity_floor_months
                    .unwrap_or(defaults.maturity_floor_months),
                maturity_cap_months: scoring
                    .maturity_cap_months
                    .unwrap_or(defaults.maturity_cap_months),
                days_per_month: scoring.days_per_month.unwrap_or(defaults.days_per_month),
                merged_pr_lookback_days: scoring
                    .merged_pr_lookback_days
                    .unwrap_or(defaults.merged_pr_lookback_days),
            },
            None => defaults,
        }
    }

    pub fn language_policy(&self) -> LanguagePolicy {
        let defaults = LanguagePolicy::default();
        match &self.languages {
            Some(languages) => LanguagePolicy {
                targets: languages.targets.clone().unwrap_or(defaults.targets),
                markup: languages.markup.clone().unwrap_or(defaults.markup),
                target_multiplier: languages
                    .target_multiplier
                    .unwrap_or(defaults.target_multiplier),
                markup_multiplier: languages
                    .markup_multiplier
                    .unwrap_or(defaults.markup_multiplier),
                bundle_size_languages: languages
                    .bundle_size_languages
                    .clone()
                    .unwrap_or(defaults.bundle_size_languages),
            },
            None => defaults,
        }
    }

    pub fn keyword_lists(&self) -> KeywordLists {
        let defaults = KeywordLists::default();
        match &self.classifier {
            Some(classifier) => KeywordLists {
                churn: classifier.churn_keywords.clone().unwrap_or(defaults.churn),
                hype: classifier.hype_keywords.clone().unwrap_or(defaults.hype),
            },
            None => defaults,
        }
    }

    pub fn ranking_limits(&self) -> RankingLimits {
        let defaults = RankingLimits::default();
        match &self.ranking {
            Some(ranking) => RankingLimits {
                hype_limit: ranking.hype_limit.unwrap_or(defaults.hype_limit),
                total_limit: ranking.total_limit.unwrap_or(defaults.total_limit),
                tie_break: ranking.tie_break.unwrap_or(defaults.tie_break),
            },
            None => defaults,
        }
    }

    pub fn discovery_settings(&self) -> DiscoverySettings {
        let defaults = DiscoverySettings::default();
        match &self.discovery {
            Some(discovery) => DiscoverySettings {
                page_size: discovery.page_size.unwrap_or(defaults.page_size),
                max_pages: discovery.max_pages.unwrap_or(defaults.max_pages),
                language_max_pages: discovery
                    .language_max_pages
                    .unwrap_or(defaults.language_max_pages),
                trending_limit: discovery.trending_limit.unwrap_or(defaults.trending_limit),
                min_stars: discovery.min_stars.unwrap_or(defaults.min_stars),
                max_stars: discovery.max_stars.unwrap_or(defaults.max_stars),
                min_age_months: discovery.min_age_months.unwrap_or(defaults.min_age_months),
                pushed_within_days: discovery
                    .pushed_within_days
                    .unwrap_or(defaults.pushed_within_days),
                retries: discovery.retries.unwrap_or(defaults.retries),
                backoff_base_ms: discovery.backoff_base_ms.unwrap_or(defaults.backoff_base_ms),
                host_url: discovery.host_url.clone().unwrap_or(defaults.host_url),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), MinerError> {
        let weights = self.score_weights();
        let named_weights = [
            ("scoring.momentum_weight", weights.momentum_weight),
            ("scoring.pr_velocity_weight", weights.pr_velocity_weight),
            ("scoring.labeled_issue_weight", weights.labeled_issue_weight),
            ("scoring.good_first_issue_bonus", weights.good_first_issue_bonus),
            ("scoring.base_activity", weights.base_activity),
        ];
        for (key, value) in named_weights {
            if !value.is_finite() || value <= 0.0 {
                return Err(MinerError::InvalidConfig(format!(
                    "{key} must be a positive number, got {value}"
                )));
            }
        }
        if !weights.days_per_month.is_finite() || weights.days_per_month <= 0.0 {
            return Err(MinerError::InvalidConfig(
                "scoring.days_per_month must be positive".to_string(),
            ));
        }
        for (key, value) in [
            ("scoring.maturity_floor_months", weights.maturity_floor_months),
            ("scoring.maturity_cap_months", weights.maturity_cap_months),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MinerError::InvalidConfig(format!(
                    "{key} must be a positive number, got {value}"
                )));
            }
        }
        if weights.maturity_floor_months > weights.maturity_cap_months {
            return Err(MinerError::InvalidConfig(format!(
                "scoring.maturity_floor_months ({}) exceeds maturity_cap_months ({})",
                weights.maturity_floor_months, weights.maturity_cap_months
            )));
        }

        validate_day_window(
            "scoring.merged_pr_lookback_days",
            weights.merged_pr_lookback_days,
        )?;

        let languages = self.language_policy();
        for (key, value) in [
            ("languages.target_multiplier", languages.target_multiplier),
            ("languages.markup_multiplier", languages.markup_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MinerError::InvalidConfig(format!(
                    "{key} must be a positive number, got {value}"
                )));
            }
        }

        let keywords = self.keyword_lists();
        validate_keywords("classifier.churn_keywords", &keywords.churn)?;
        validate_keywords("classifier.hype_keywords", &keywords.hype)?;

        let limits = self.ranking_limits();
        if limits.total_limit == 0 {
            return Err(MinerError::InvalidConfig(
                "ranking.total_limit must be at least 1".to_string(),
            ));
        }
        if limits.hype_limit > limits.total_limit {
            return Err(MinerError::InvalidConfig(format!(
                "ranking.hype_limit ({}) exceeds total_limit ({})",
                limits.hype_limit, limits.total_limit
            )));
        }

        let discovery = self.discovery_settings();
        if !(1..=100).contains(&discovery.page_size) {
            return Err(MinerError::InvalidConfig(format!(
                "discovery.page_size must be within 1..=100, got {}",
                discovery.page_size
            )));
        }
        if discovery.min_stars > discovery.max_stars {
            return Err(MinerError::InvalidConfig(format!(
                "discovery.min_stars ({}) exceeds max_stars ({})",
                discovery.min_stars, discovery.max_stars
            )));
        }
        validate_day_window("discovery.pushed_within_days", discovery.pushed_within_days)?;
        if discovery.min_age_months > MAX_WINDOW_DAYS / 30 {
            return Err(MinerError::InvalidConfig(format!(
                "discovery.min_age_months must be at most {}, got {}",
                MAX_WINDOW_DAYS / 30,
                discovery.min_age_months
            )));
        }
        if discovery.retries == 0 {
            return Err(MinerError::InvalidConfig(
                "discovery.retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_day_window(key: &str, days: u32) -> Result<(), MinerError> {
    if days > MAX_WINDOW_DAYS {
        return Err(MinerError::InvalidConfig(format!(
            "{key} must be at most {MAX_WINDOW_DAYS} days, got {days}"
        )));
    }
    Ok(())
}

fn validate_keywords(key: &str, keywords: &[String]) -> Result<(), MinerError> {
    let mut seen = HashSet::new();
    for keyword in keywords {
        if keyword.trim().is_empty() {
            return Err(MinerError::InvalidConfig(format!(
                "{key} contains an empty entry"
            )));
        }
        if !seen.insert(keyword.to_lowercase()) {
            return Err(MinerError::InvalidConfig(format!(
                "{key} lists '{keyword}' more than once"
            )));
        }
    }
    Ok(())
}
