pub mod activity;
pub mod classify;
pub mod maintenance;
pub mod score;
pub mod select;

use crate::error::{MinerError, Result};
use crate::types::config::{LanguagePolicy, MinerConfig, RankingLimits};
use crate::types::gem::{GemsDocument, ReleaseInfo, ScoredGem};
use crate::types::signal::RepositorySignal;
use chrono::{DateTime, SecondsFormat, Utc};
use classify::Classifier;
use score::{ActivityInputs, Profile, ScoreEngine, UNKNOWN_LANGUAGE};
use tracing::{debug, warn};

const GOOD_FIRST_ISSUE_QUERY: &str =
    "issues?q=is%3Aopen+is%3Aissue+label%3A%22good+first+issue%22";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MiningStats {
    pub discovered: usize,
    pub churn_dropped: usize,
    pub failed: usize,
    pub hype_admitted: usize,
    pub hype_skipped: usize,
}

#[derive(Debug, Clone)]
pub struct MiningOutcome {
    pub document: GemsDocument,
    pub stats: MiningStats,
}

/// Pure scoring pipeline: churn filter, scoring, and bounded selection.
pub struct Miner {
    classifier: Classifier,
    engine: ScoreEngine,
    languages: LanguagePolicy,
    limits: RankingLimits,
}

impl Miner {
    pub fn from_config(config: &MinerConfig) -> Self {
        let languages = config.language_policy();
        Self {
            classifier: Classifier::new(&config.keyword_lists()),
            engine: ScoreEngine::new(config.score_weights(), languages.clone()),
            languages,
            limits: config.ranking_limits(),
        }
    }

    pub fn mine(&self, signals: &[RepositorySignal], now: DateTime<Utc>) -> MiningOutcome {
        let mut stats = MiningStats {
            discovered: signals.len(),
            ..MiningStats::default()
        };

        let mut scored = Vec::with_capacity(signals.len());
        for signal in signals {
            if self.classifier.signal_is_churn(signal) {
                debug!(repo = %signal.full_name(), "dropping churn repository");
                stats.churn_dropped += 1;
                continue;
            }
            match self.score_signal(signal, now) {
                Ok(gem) => scored.push(gem),
                Err(err) => {
                    warn!(repo = %signal.full_name(), error = %err, "skipping repository");
                    stats.failed += 1;
                }
            }
        }

        let selection = select::select(scored, &self.limits);
        stats.hype_admitted = selection.hype_admitted;
        stats.hype_skipped = selection.hype_skipped;

        MiningOutcome {
            document: GemsDocument::new(
                now.to_rfc3339_opts(SecondsFormat::Millis, true),
                selection.gems,
            ),
            stats,
        }
    }

    pub fn score_signal(&self, signal: &RepositorySignal, now: DateTime<Utc>) -> Result<ScoredGem> {
        let full_name = signal.full_name();
        let summary = activity::summarize(&signal.commits);
        let breakdown = self.engine.breakdown(
            Profile {
                stars: signal.stars,
                created_at: signal.created_at,
                language: signal.language.as_deref(),
            },
            ActivityInputs {
                recent_commits: signal.commits.w1,
                merged_prs: signal.merged_prs_in_window,
                labeled_issues: signal.labeled_issues,
                has_good_first_issues: signal.has_good_first_issues,
            },
            now,
        );
        if !breakdown.score.is_finite() || !summary.momentum_trend.is_finite() {
            return Err(MinerError::DegenerateScore(full_name));
        }
        debug!(
            repo = %full_name,
            momentum = breakdown.momentum,
            pr_velocity = breakdown.pr_velocity,
            contribution = breakdown.contribution,
            visibility = breakdown.visibility_factor,
            maturity = breakdown.maturity_factor,
            multiplier = breakdown.language_multiplier,
            score = breakdown.score,
            trailing_average = summary.average,
            "scored repository"
        );

        let language = signal
            .language
            .clone()
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());
        let enrichment = &signal.enrichment;
        let featured = enrichment.trending && enrichment.on_hacker_news;
        let description = match (&enrichment.summary, featured) {
            (Some(summary), true) => Some(summary.clone()),
            _ => signal.description.clone(),
        };
        let bundle_size = if self.languages.bundle_size_languages.contains(&language) {
            enrichment.bundle_size
        } else {
            None
        };

        Ok(ScoredGem {
            name: signal.name.clone(),
            good_first_issues_url: format!(
                "{}/{}",
                signal.url.trim_end_matches('/'),
                GOOD_FIRST_ISSUE_QUERY
            ),
            full_name,
            description,
            url: signal.url.clone(),
            stars: signal.stars,
            forks_count: signal.forks,
            open_issues_count: signal.open_issues,
            language,
            gem_score: breakdown.score,
            momentum_trend: summary.momentum_trend,
            recent_commits: signal.commits.w1,
            merged_prs_count: signal.merged_prs_in_window,
            topics: signal.topics.clone(),
            activity: summary.activity.to_vec(),
            has_good_first_issues: signal.has_good_first_issues,
            pushed_at: signal.pushed_at.clone(),
            is_hype: self.classifier.signal_is_hype(signal),
            license: signal.license.clone(),
            latest_release: signal.latest_release.as_ref().map(|release| ReleaseInfo {
                tag: release.tag.clone(),
                published_at: release.published_at.clone(),
            }),
            featured,
            maintenance_score: maintenance::maintenance_score(signal.last_merged_at, now),
            bundle_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::signal::{Enrichment, LatestRelease, WeeklyCommits};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-06-15T00:00:00Z")
            .expect("fixed timestamp should parse")
            .with_timezone(&Utc)
    }

    fn signal(name: &str) -> RepositorySignal {
        RepositorySignal::fixture(name, now() - Duration::days(400))
    }

    fn miner() -> Miner {
        Miner::from_config(&MinerConfig::default())
    }

    #[test]
    fn churn_is_dropped_before_scoring() {
        let outcome = miner().mine(&[signal("my-proxy-list"), signal("fast-parser")], now());
        assert_eq!(outcome.document.count, 1);
        assert_eq!(outcome.document.gems[0].name, "fast-parser");
        assert_eq!(outcome.stats.churn_dropped, 1);
    }

    #[test]
    fn empty_input_yields_empty_document() {
        let outcome = miner().mine(&[], now());
        assert_eq!(outcome.document.count, 0);
        assert!(outcome.document.gems.is_empty());
        assert_eq!(outcome.document.last_mined, "2026-06-15T00:00:00.000Z");
    }

    #[test]
    fn scored_gem_carries_derived_metrics() {
        let mut s = signal("fast-parser");
        s.commits = WeeklyCommits {
            w1: 9,
            w2: 3,
            w3: 3,
            w4: 3,
        };
        s.merged_prs_in_window = 4;
        s.last_merged_at = Some(now() - Duration::days(10));
        s.latest_release = Some(LatestRelease {
            tag: "v1.2.0".to_string(),
            published_at: "2026-05-01T00:00:00Z".to_string(),
        });

        let gem = miner().score_signal(&s, now()).expect("signal should score");
        assert_eq!(gem.full_name, "octo/fast-parser");
        assert_eq!(gem.activity, vec![3, 3, 3, 9]);
        assert_eq!(gem.momentum_trend, 3.0);
        assert_eq!(gem.recent_commits, 9);
        assert_eq!(gem.merged_prs_count, 4);
        assert_eq!(gem.maintenance_score, 10);
        assert_eq!(
            gem.good_first_issues_url,
            "https://github.com/octo/fast-parser/issues?q=is%3Aopen+is%3Aissue+label%3A%22good+first+issue%22"
        );
        assert_eq!(
            gem.latest_release.as_ref().map(|r| r.tag.as_str()),
            Some("v1.2.0")
        );
        assert!(!gem.is_hype);
        assert!(gem.gem_score.is_finite());
    }

    #[test]
    fn unknown_language_is_reported_as_plain_text() {
        let mut s = signal("fast-parser");
        s.language = None;
        let gem = miner().score_signal(&s, now()).expect("signal should score");
        assert_eq!(gem.language, "Plain Text");
    }

    #[test]
    fn featured_requires_trending_and_hacker_news() {
        let mut s = signal("fast-parser");
        s.description = Some("original".to_string());
        s.enrichment = Enrichment {
            trending: true,
            on_hacker_news: false,
            summary: Some("summarised".to_string()),
            bundle_size: None,
        };
        let gem = miner().score_signal(&s, now()).expect("signal should score");
        assert!(!gem.featured);
        assert_eq!(gem.description.as_deref(), Some("original"));

        s.enrichment.on_hacker_news = true;
        let gem = miner().score_signal(&s, now()).expect("signal should score");
        assert!(gem.featured);
        assert_eq!(gem.description.as_deref(), Some("summarised"));
    }

    #[test]
    fn bundle_size_only_for_javascript_family() {
        let mut s = signal("tiny-router");
        s.enrichment.bundle_size = Some(2048);
        let gem = miner().score_signal(&s, now()).expect("signal should score");
        assert_eq!(gem.bundle_size, None);

        s.language = Some("TypeScript".to_string());
        let gem = miner().score_signal(&s, now()).expect("signal should score");
        assert_eq!(gem.bundle_size, Some(2048));
    }

    #[test]
    fn output_is_score_descending_and_counted() {
        let mut quiet = signal("quiet-lib");
        quiet.stars = 2900;
        let mut busy = signal("busy-lib");
        busy.commits.w1 = 40;
        busy.has_good_first_issues = true;
        let outcome = miner().mine(&[quiet, busy], now());
        assert_eq!(outcome.document.count, outcome.document.gems.len());
        assert_eq!(outcome.document.gems[0].name, "busy-lib");
    }
}
