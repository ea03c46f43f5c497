use chrono::{DateTime, Utc};

/// Reported when no merged pull request was observed.
pub const NO_MERGE_SENTINEL: u64 = 999;

const MILLIS_PER_DAY: u64 = 86_400_000;

/// Whole days between `now` and the last merge, in either direction.
pub fn maintenance_score(last_merged_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
    match last_merged_at {
        Some(merged_at) => (now - merged_at).num_milliseconds().unsigned_abs() / MILLIS_PER_DAY,
        None => NO_MERGE_SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-05-10T08:30:00Z")
            .expect("fixed timestamp should parse")
            .with_timezone(&Utc)
    }

    #[test]
    fn missing_merge_returns_sentinel() {
        assert_eq!(maintenance_score(None, now()), 999);
    }

    #[test]
    fn ten_days_ago_is_ten() {
        assert_eq!(maintenance_score(Some(now() - Duration::days(10)), now()), 10);
    }

    #[test]
    fn partial_days_are_floored() {
        let merged = now() - Duration::days(3) - Duration::hours(23);
        assert_eq!(maintenance_score(Some(merged), now()), 3);
    }

    #[test]
    fn future_timestamps_are_not_negative() {
        let merged = now() + Duration::days(2) + Duration::hours(1);
        assert_eq!(maintenance_score(Some(merged), now()), 2);
    }

    #[test]
    fn score_grows_with_elapsed_time() {
        let merged = now() - Duration::days(5);
        let later = now() + Duration::days(4);
        assert!(maintenance_score(Some(merged), later) > maintenance_score(Some(merged), now()));
    }
}
