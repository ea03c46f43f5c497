use crate::types::config::{RankingLimits, TieBreak};
use crate::types::gem::ScoredGem;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub gems: Vec<ScoredGem>,
    pub hype_admitted: usize,
    pub hype_skipped: usize,
}

/// Orders gems by score and admits them under the hype quota and total cap.
///
/// The quota is applied while walking the sorted list, so a higher-ranked
/// hype gem always consumes quota before a lower-ranked one. Skipped hype
/// gems are not backfilled.
pub fn select(mut gems: Vec<ScoredGem>, limits: &RankingLimits) -> Selection {
    gems.sort_by(|a, b| compare(a, b, limits.tie_break));

    let mut selected = Vec::with_capacity(limits.total_limit.min(gems.len()));
    let mut hype_admitted = 0;
    let mut hype_skipped = 0;

    for gem in gems {
        if selected.len() >= limits.total_limit {
            break;
        }
        if gem.is_hype {
            if hype_admitted >= limits.hype_limit {
                hype_skipped += 1;
                continue;
            }
            hype_admitted += 1;
        }
        selected.push(gem);
    }

    Selection {
        gems: selected,
        hype_admitted,
        hype_skipped,
    }
}

fn compare(a: &ScoredGem, b: &ScoredGem, tie_break: TieBreak) -> Ordering {
    let by_score = b.gem_score.total_cmp(&a.gem_score);
    match tie_break {
        TieBreak::Discovery => by_score,
        TieBreak::FullName => by_score.then_with(|| a.full_name.cmp(&b.full_name)),
    }
}
