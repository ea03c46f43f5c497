use crate::engine::activity::round2;
use crate::types::config::{LanguagePolicy, ScoreWeights};
use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Language reported when a repository has no detected primary language.
pub const UNKNOWN_LANGUAGE: &str = "Plain Text";

/// Score inputs that are not derived from the repository itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityInputs {
    pub recent_commits: u64,
    pub merged_prs: u64,
    pub labeled_issues: u64,
    pub has_good_first_issues: bool,
}

/// Repository attributes the formula reads.
#[derive(Debug, Clone, Copy)]
pub struct Profile<'a> {
    pub stars: u64,
    pub created_at: DateTime<Utc>,
    pub language: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub momentum: f64,
    pub pr_velocity: f64,
    pub contribution: f64,
    pub visibility_factor: f64,
    pub maturity_factor: f64,
    pub language_multiplier: f64,
    pub score: f64,
}

pub struct ScoreEngine {
    weights: ScoreWeights,
    languages: LanguagePolicy,
}

impl ScoreEngine {
    pub fn new(weights: ScoreWeights, languages: LanguagePolicy) -> Self {
        Self { weights, languages }
    }

    #[cfg(test)]
    pub fn calculate_score(
        &self,
        profile: Profile<'_>,
        inputs: ActivityInputs,
        now: DateTime<Utc>,
    ) -> f64 {
        self.breakdown(profile, inputs, now).score
    }

    /// Computes every formula component along with the rounded final score.
    ///
    /// Activity terms are log-compressed so commit volume has diminishing
    /// returns. Stars and age divide the numerator: popular or long-lived
    /// repositories rank lower for the same activity.
    pub fn breakdown(
        &self,
        profile: Profile<'_>,
        inputs: ActivityInputs,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        let w = &self.weights;

        let momentum = (inputs.recent_commits as f64 + 1.0).log2() * w.momentum_weight;
        let pr_velocity = (inputs.merged_prs as f64 + 1.0).log2() * w.pr_velocity_weight;
        let contribution = inputs.labeled_issues as f64 * w.labeled_issue_weight
            + if inputs.has_good_first_issues {
                w.good_first_issue_bonus
            } else {
                0.0
            };

        let stars = profile.stars.max(1) as f64;
        let visibility_factor = (stars + 1.0).log10();

        let age_months = self.age_in_months(profile.created_at, now);
        let maturity_factor = age_months.min(w.maturity_cap_months).sqrt();

        let language_multiplier = self.language_multiplier(profile.language);

        let raw = (momentum + pr_velocity + contribution + w.base_activity)
            / (visibility_factor * maturity_factor)
            * language_multiplier;

        ScoreBreakdown {
            momentum,
            pr_velocity,
            contribution,
            visibility_factor,
            maturity_factor,
            language_multiplier,
            score: round2(raw),
        }
    }

    /// Age in months, floored so brand-new repositories never divide by zero.
    pub fn age_in_months(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let elapsed_days = (now - created_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
        (elapsed_days / self.weights.days_per_month).max(self.weights.maturity_floor_months)
    }

    pub fn language_multiplier(&self, language: Option<&str>) -> f64 {
        let language = language.unwrap_or(UNKNOWN_LANGUAGE);
        if self.languages.markup.iter().any(|l| l == language) {
            self.languages.markup_multiplier
        } else if self.languages.targets.iter().any(|l| l == language) {
            self.languages.target_multiplier
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn engine() -> ScoreEngine {
        ScoreEngine::new(ScoreWeights::default(), LanguagePolicy::default())
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
            .expect("fixed timestamp should parse")
            .with_timezone(&Utc)
    }

    fn profile(stars: u64, language: Option<&str>) -> Profile<'_> {
        Profile {
            stars,
            created_at: now() - Duration::days(360),
            language,
        }
    }

    fn commits(recent_commits: u64) -> ActivityInputs {
        ActivityInputs {
            recent_commits,
            merged_prs: 0,
            labeled_issues: 0,
            has_good_first_issues: false,
        }
    }

    #[test]
    fn more_commits_score_higher_with_diminishing_returns() {
        let e = engine();
        let p = profile(1000, Some("Rust"));
        let low = e.calculate_score(p, commits(5), now());
        let high = e.calculate_score(p, commits(20), now());
        let very_high = e.calculate_score(p, commits(1000), now());
        assert!(high > low, "expected {high} > {low}");
        assert!(very_high < high * 5.0, "score grew too much for 50x commits");
    }

    #[test]
    fn more_stars_score_lower() {
        let e = engine();
        let few = e.calculate_score(profile(200, None), commits(10), now());
        let many = e.calculate_score(profile(2000, None), commits(10), now());
        assert!(few > many, "expected {few} > {many}");
    }

    #[test]
    fn target_language_outscores_plain_text() {
        let e = engine();
        let rust = e.calculate_score(profile(500, Some("Rust")), commits(10), now());
        let text = e.calculate_score(profile(500, Some("Plain Text")), commits(10), now());
        assert!(rust > text, "expected Rust ({rust}) > Plain Text ({text})");
    }

    #[test]
    fn language_multiplier_tiers() {
        let e = engine();
        assert_eq!(e.language_multiplier(Some("Go")), 1.2);
        assert_eq!(e.language_multiplier(Some("Haskell")), 1.0);
        assert_eq!(e.language_multiplier(Some("CSS")), 0.5);
        assert_eq!(e.language_multiplier(None), 0.5);
    }

    #[test]
    fn good_first_issues_boost_score() {
        let e = engine();
        let p = profile(500, None);
        let without = e.calculate_score(p, commits(10), now());
        let with = e.calculate_score(
            p,
            ActivityInputs {
                has_good_first_issues: true,
                ..commits(10)
            },
            now(),
        );
        assert!(with > without);
    }

    #[test]
    fn merged_prs_raise_score() {
        let e = engine();
        let p = profile(500, Some("Go"));
        let none = e.calculate_score(p, commits(10), now());
        let some = e.calculate_score(
            p,
            ActivityInputs {
                merged_prs: 7,
                ..commits(10)
            },
            now(),
        );
        assert!(some > none);
    }

    #[test]
    fn zero_stars_and_zero_age_are_finite() {
        let e = engine();
        let fresh = Profile {
            stars: 0,
            created_at: now(),
            language: None,
        };
        let score = e.calculate_score(fresh, commits(0), now());
        assert!(score.is_finite());
        assert!(!score.is_nan());
        assert!(score > 0.0);
    }

    #[test]
    fn future_creation_date_is_floored() {
        let e = engine();
        let age = e.age_in_months(now() + Duration::days(30), now());
        assert_eq!(age, 6.0);
    }

    #[test]
    fn maturity_is_capped() {
        let e = engine();
        let old = Profile {
            stars: 500,
            created_at: now() - Duration::days(365 * 20),
            language: Some("Rust"),
        };
        let breakdown = e.breakdown(old, commits(3), now());
        assert_eq!(breakdown.maturity_factor, 60f64.sqrt());
    }

    #[test]
    fn known_profile_matches_formula() {
        let e = engine();
        let p = Profile {
            stars: 99,
            created_at: now() - Duration::days(30),
            language: Some("Haskell"),
        };
        // momentum = log2(8) * 20 = 60, base = 10, visibility = log10(100) = 2,
        // maturity = sqrt(6)
        let expected = round2(70.0 / (2.0 * 6f64.sqrt()));
        assert_eq!(e.calculate_score(p, commits(7), now()), expected);
    }

    proptest! {
        #[test]
        fn prop_score_is_finite(
            stars in 0u64..10_000_000,
            age_days in -1_000i64..20_000,
            recent in 0u64..1_000_000,
            prs in 0u64..10_000,
            labels in 0u64..10_000,
            gfi in any::<bool>(),
        ) {
            let e = engine();
            let p = Profile {
                stars,
                created_at: now() - Duration::days(age_days),
                language: None,
            };
            let inputs = ActivityInputs {
                recent_commits: recent,
                merged_prs: prs,
                labeled_issues: labels,
                has_good_first_issues: gfi,
            };
            let score = e.calculate_score(p, inputs, now());
            prop_assert!(score.is_finite());
            prop_assert!(score > 0.0);
        }

        #[test]
        fn prop_score_monotonic_in_commits(low in 0u64..500, delta in 20u64..500) {
            let e = engine();
            let p = profile(300, Some("Rust"));
            let a = e.calculate_score(p, commits(low), now());
            let b = e.calculate_score(p, commits(low + delta), now());
            prop_assert!(b > a, "expected {} > {}", b, a);
        }
    }
}
