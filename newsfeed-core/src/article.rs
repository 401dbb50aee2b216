//! News articles as delivered by the fetch collaborator.
//!
//! Field names follow the news API payload (`publishedAt`, `urlToImage`) when
//! the `serde` feature is enabled, so fetched JSON deserialises directly.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

/// Title the news API substitutes for withdrawn articles.
pub const REMOVED_TITLE: &str = "[Removed]";

/// Publisher metadata attached to an article.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArticleSource {
    /// Provider-specific source identifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<String>,
    /// Human-readable publisher name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
}

/// A single news article.
///
/// The `url` identifies the article; two records with the same URL are the
/// same article. `published_at` keeps the raw ISO-8601 string so a malformed
/// date never prevents the article from being displayed.
///
/// # Examples
/// ```
/// use newsfeed_core::Article;
///
/// let article = Article::new("https://example.com/a", "Rocket launch")
///     .with_description("Engines ignite at dawn")
///     .with_published_at("2024-05-01T08:00:00Z");
///
/// assert_eq!(article.text(), "Rocket launch Engines ignite at dawn");
/// assert!(article.published_at().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Article {
    /// Headline.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::string_or_null")
    )]
    pub title: String,
    /// Optional standfirst or summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Canonical article URL.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::string_or_null")
    )]
    pub url: String,
    /// Publication timestamp as supplied by the provider.
    #[cfg_attr(feature = "serde", serde(default))]
    pub published_at: Option<String>,
    /// Publisher metadata.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<ArticleSource>,
    /// Byline.
    #[cfg_attr(feature = "serde", serde(default))]
    pub author: Option<String>,
    /// Lead image URL.
    #[cfg_attr(feature = "serde", serde(default))]
    pub url_to_image: Option<String>,
    /// Truncated body text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub content: Option<String>,
}

impl Article {
    /// Construct an article with a URL and title; other fields start empty.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description while returning `self` for chaining.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the raw publication timestamp while returning `self` for chaining.
    #[must_use]
    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    /// Set the publisher name while returning `self` for chaining.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source = Some(ArticleSource {
            id: None,
            name: Some(name.into()),
        });
        self
    }

    /// Canonical text used for vectorisation: title and description joined
    /// by a space and trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        combined_text(&self.title, self.description.as_deref())
    }

    /// Parse the publication timestamp.
    ///
    /// Returns `None` when the date is absent or not valid RFC 3339.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.published_at.as_deref()?)
    }

    /// Publisher name, if known.
    #[must_use]
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref()?.name.as_deref()
    }

    /// Report whether the provider withdrew this article.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.title.trim() == REMOVED_TITLE
    }

    /// Report whether the article can take part in similarity scoring.
    #[must_use]
    pub fn is_scorable(&self) -> bool {
        !self.url.is_empty() && !self.text().is_empty()
    }
}

/// Join a title and optional description into one trimmed string.
///
/// # Examples
/// ```
/// use newsfeed_core::combined_text;
///
/// assert_eq!(combined_text("Title", None), "Title");
/// assert_eq!(combined_text("  ", Some(" body ")), "body");
/// ```
#[must_use]
pub fn combined_text(title: &str, description: Option<&str>) -> String {
    let joined = format!("{title} {}", description.unwrap_or_default());
    joined.trim().to_owned()
}

/// Parse an RFC 3339 timestamp into UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Return the most recently published article, ignoring unparsable dates.
///
/// Earlier entries win ties.
#[must_use]
pub fn latest_article(articles: &[Article]) -> Option<&Article> {
    let mut latest: Option<(&Article, DateTime<Utc>)> = None;
    for article in articles {
        let Some(published) = article.published_at() else {
            continue;
        };
        if latest.is_none_or(|(_, current)| published > current) {
            latest = Some((article, published));
        }
    }
    latest.map(|(article, _)| article)
}

/// A request-scoped pool of candidate articles.
///
/// Built with [`CandidatePool::from_articles`], the pool holds only
/// displayable articles with unique URLs, in their original order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidatePool {
    articles: Vec<Article>,
}

impl CandidatePool {
    /// Filter raw fetch results into a candidate pool.
    ///
    /// Drops withdrawn placeholders, articles without a URL or text, and
    /// repeated URLs (the first occurrence wins).
    #[must_use]
    pub fn from_articles<I>(articles: I) -> Self
    where
        I: IntoIterator<Item = Article>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut dropped = 0_usize;
        for article in articles {
            if article.is_placeholder() || !article.is_scorable() || seen.contains(&article.url) {
                dropped += 1;
                continue;
            }
            seen.insert(article.url.clone());
            kept.push(article);
        }
        if dropped > 0 {
            log::debug!("dropped {dropped} unusable candidate articles");
        }
        Self { articles: kept }
    }

    /// Borrow the pooled articles.
    #[must_use]
    pub fn as_slice(&self) -> &[Article] {
        &self.articles
    }

    /// Number of pooled articles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Report whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Consume the pool and return the articles.
    #[must_use]
    pub fn into_inner(self) -> Vec<Article> {
        self.articles
    }
}
