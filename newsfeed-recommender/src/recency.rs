//! Linear freshness bonus.

use chrono::{DateTime, Utc};

use crate::RecencyBoost;

/// Bonus for an article published at `published`, evaluated at `now`.
///
/// Age is counted in whole elapsed days, never negative. Articles without a
/// parsable date get no bonus.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "linear decay over whole days"
)]
pub(crate) fn recency_boost(
    published: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    boost: RecencyBoost,
) -> f32 {
    let Some(published) = published else {
        return 0.0;
    };
    let days_old = (now - published).num_days().max(0) as f32;
    let window = boost.window_days as f32;
    (1.0_f32 - days_old / window).max(0.0) * boost.magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use newsfeed_core::test_support::reference_now;
    use rstest::rstest;

    #[rstest]
    #[case(Duration::zero(), 0.1)]
    #[case(Duration::hours(23), 0.1)]
    #[case(Duration::days(7), 0.05)]
    #[case(Duration::days(14), 0.0)]
    #[case(Duration::days(20), 0.0)]
    #[case(-Duration::days(3), 0.1)]
    #[expect(clippy::float_arithmetic, reason = "compare boosts")]
    fn decays_linearly(#[case] age: Duration, #[case] expected: f32) {
        let now = reference_now();
        let boost = recency_boost(Some(now - age), now, RecencyBoost::default());
        assert!((boost - expected).abs() < 1e-6, "age {age}: got {boost}");
    }

    #[rstest]
    fn undated_articles_get_no_boost() {
        assert_eq!(
            recency_boost(None, reference_now(), RecencyBoost::default()),
            0.0
        );
    }
}
