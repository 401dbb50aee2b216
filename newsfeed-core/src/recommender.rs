//! The recommendation seam shared by engines and their callers.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::Article;

/// Input to a single recommendation call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendRequest {
    /// Signed-in reader, if any.
    pub user_id: Option<String>,
    /// Candidate articles supplied by the fetch collaborator.
    pub candidates: Vec<Article>,
    /// Reference time for recency calculations.
    pub now: DateTime<Utc>,
}

impl RecommendRequest {
    /// Build an anonymous request over `candidates` evaluated at `now`.
    #[must_use]
    pub const fn new(candidates: Vec<Article>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: None,
            candidates,
            now,
        }
    }

    /// Attribute the request to `user_id`.
    #[must_use]
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Why a request was served by recency alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The request had no user id.
    MissingUser,
    /// The candidate pool was empty.
    NoCandidates,
    /// The user has no logged activity.
    NoHistory,
    /// Too few likes to build a reliable profile.
    InsufficientLikes {
        /// Likes found in the activity window.
        likes: usize,
        /// Likes required for personalisation.
        threshold: usize,
    },
    /// Neither the profile nor the candidates had usable text.
    NoVectorisableText,
    /// The vectoriser could not build a vocabulary from the corpus.
    DegenerateCorpus,
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUser => f.write_str("no user id"),
            Self::NoCandidates => f.write_str("no candidate articles"),
            Self::NoHistory => f.write_str("no activity history"),
            Self::InsufficientLikes { likes, threshold } => {
                write!(f, "only {likes} of {threshold} required likes")
            }
            Self::NoVectorisableText => f.write_str("no vectorisable text"),
            Self::DegenerateCorpus => f.write_str("degenerate corpus"),
        }
    }
}

/// How a recommendation was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Ranked by profile similarity with a recency boost.
    Personalised {
        /// Articles that received a similarity score.
        scored: usize,
        /// Articles appended by recency to reach the minimum.
        backfilled: usize,
    },
    /// Ordered by publication date only.
    RecencyFallback(FallbackReason),
}

/// Ranked articles together with the strategy that ranked them.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Articles in display order.
    pub articles: Vec<Article>,
    /// Strategy used for this call.
    pub strategy: Strategy,
}

impl Recommendation {
    /// Report whether the ranking used the reader's profile.
    #[must_use]
    pub const fn is_personalised(&self) -> bool {
        matches!(self.strategy, Strategy::Personalised { .. })
    }

    /// Consume the recommendation and return the articles.
    #[must_use]
    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }
}

/// Ranks candidate articles for a reader.
///
/// Implementations never fail: insufficient input degrades to a recency
/// ordering. They hold no per-call state, so one instance may serve
/// concurrent requests.
pub trait Recommender: Send + Sync {
    /// Rank `request.candidates` for `request.user_id`.
    fn recommend(&self, request: &RecommendRequest) -> Recommendation;
}
