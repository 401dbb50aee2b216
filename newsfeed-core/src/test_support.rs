//! Builders shared by unit and behaviour tests.
//!
//! Timestamps are expressed relative to a caller-supplied `now` so fixtures
//! stay deterministic.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::{ActionType, Article, Interaction};

/// Fixed reference time used across test suites: 2024-05-01T12:00:00Z.
#[must_use]
pub fn reference_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_714_564_800, 0).unwrap_or_default()
}

/// Article with a title and description published `days_ago` before `now`.
#[must_use]
pub fn article_published(
    url: &str,
    title: &str,
    description: &str,
    now: DateTime<Utc>,
    days_ago: i64,
) -> Article {
    let published = now - Duration::days(days_ago);
    Article::new(url, title)
        .with_description(description)
        .with_published_at(published.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Article with only a URL and a publication date; it carries no text.
#[must_use]
pub fn textless_article(url: &str, now: DateTime<Utc>, days_ago: i64) -> Article {
    let published = now - Duration::days(days_ago);
    Article {
        url: url.to_owned(),
        published_at: Some(published.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ..Article::default()
    }
}

/// Log entry for `action` on an article with the given text.
#[must_use]
pub fn interaction(
    url: &str,
    title: &str,
    action_type: ActionType,
    timestamp: DateTime<Utc>,
) -> Interaction {
    Interaction::from_article(&Article::new(url, title), action_type, timestamp)
}
