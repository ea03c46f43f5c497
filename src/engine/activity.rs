use crate::types::signal::WeeklyCommits;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySummary {
    /// Weekly commit counts ordered oldest to newest.
    pub activity: [u64; 4],
    pub average: f64,
    pub momentum_trend: f64,
}

/// Derives the sparkline series and the momentum trend from weekly windows.
///
/// The trend compares the current week against the trailing three-week
/// average. With a silent trailing window, any new activity counts as 1.0
/// and continued silence as 0.0.
pub fn summarize(commits: &WeeklyCommits) -> ActivitySummary {
    let WeeklyCommits { w1, w2, w3, w4 } = *commits;
    let average = (w2 + w3 + w4) as f64 / 3.0;
    let trend = if average > 0.0 {
        w1 as f64 / average
    } else if w1 > 0 {
        1.0
    } else {
        0.0
    };

    ActivitySummary {
        activity: [w4, w3, w2, w1],
        average,
        momentum_trend: round2(trend),
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
