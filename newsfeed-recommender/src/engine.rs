//! The content-based recommender.

use newsfeed_core::{
    ActionType, ActivityQuery, ActivityStore, Article, FallbackReason, RecommendRequest,
    Recommendation, Recommender, Strategy,
};

use crate::policy::{require_audience, require_history, require_likes, require_text};
use crate::ranking::{ScoredArticle, backfill, rank, recency_fallback};
use crate::recency::recency_boost;
use crate::similarity::ProfileVector;
use crate::vectorizer::{SparseVector, TfIdfVectorizer};
use crate::{ActivityProfile, ConfigError, RecommenderConfig};

/// Ranks candidates by TF-IDF similarity to the reader's recent activity.
///
/// Each call reads the activity window from the store, fits a fresh
/// vectoriser over profile and candidate texts, scores candidates by cosine
/// similarity plus a recency bonus, and backfills with recent articles. Any
/// shortfall in the inputs yields a recency-only ordering instead.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use newsfeed_core::{Article, MemoryActivityLog, RecommendRequest, Recommender};
/// use newsfeed_recommender::NewsRecommender;
///
/// let recommender = NewsRecommender::with_defaults(MemoryActivityLog::default());
/// let candidates = vec![Article::new("https://a", "Rocket launch")];
/// let request = RecommendRequest::new(candidates, Utc::now());
/// let recommendation = recommender.recommend(&request);
/// assert_eq!(recommendation.articles.len(), 1);
/// assert!(!recommendation.is_personalised());
/// ```
#[derive(Debug)]
pub struct NewsRecommender<S> {
    store: S,
    config: RecommenderConfig,
}

impl<S: ActivityStore> NewsRecommender<S> {
    /// Build a recommender over `store` after validating `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn new(store: S, config: RecommenderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            config: config.validate()?,
        })
    }

    /// Build a recommender with the default configuration.
    #[must_use]
    pub fn with_defaults(store: S) -> Self {
        Self {
            store,
            config: RecommenderConfig::default(),
        }
    }

    fn activity_query(&self) -> ActivityQuery {
        ActivityQuery::new(self.config.activity_limit).with_action_types(ActionType::ALL)
    }

    fn personalise(&self, request: &RecommendRequest) -> Result<Recommendation, FallbackReason> {
        let user_id = require_audience(request)?;
        let history = self.store.recent_activity(user_id, &self.activity_query());
        require_history(&history)?;

        let profile = ActivityProfile::build(&history, self.config.weights);
        require_likes(&profile, self.config.positive_interactions_threshold)?;

        let candidates: Vec<&Article> = request
            .candidates
            .iter()
            .filter(|article| article.is_scorable())
            .collect();
        require_text(&profile, &candidates)?;

        let corpus: Vec<String> = profile
            .entries()
            .iter()
            .map(|entry| entry.text.clone())
            .chain(candidates.iter().map(|article| article.text()))
            .collect();
        let matrix = TfIdfVectorizer::new(self.config.vectorizer)
            .fit_transform(corpus.as_slice())
            .map_err(|err| {
                log::warn!("vectoriser rejected corpus: {err}");
                FallbackReason::DegenerateCorpus
            })?;
        let (profile_rows, candidate_rows) = matrix
            .rows()
            .split_at_checked(profile.entries().len())
            .ok_or(FallbackReason::DegenerateCorpus)?;

        let weights: Vec<f32> = profile.entries().iter().map(|entry| entry.weight).collect();
        let profile_vector = ProfileVector::weighted(profile_rows, &weights, matrix.dimension());
        let scored = candidates
            .iter()
            .zip(candidate_rows)
            .map(|(&article, row)| ScoredArticle {
                score: self.final_score(&profile_vector, row, article, request),
                article: article.clone(),
            })
            .collect();

        let (articles, backfilled) = backfill(
            rank(scored),
            &request.candidates,
            self.config.min_recommendations,
            self.config.page_size,
        );
        let scored_count = articles.len().saturating_sub(backfilled);
        log::debug!(
            "personalised {} for {user_id}: {scored_count} scored, {backfilled} backfilled",
            articles.len()
        );
        Ok(Recommendation {
            articles,
            strategy: Strategy::Personalised {
                scored: scored_count,
                backfilled,
            },
        })
    }

    #[expect(clippy::float_arithmetic, reason = "similarity plus recency bonus")]
    fn final_score(
        &self,
        profile: &ProfileVector,
        row: &SparseVector,
        article: &Article,
        request: &RecommendRequest,
    ) -> f32 {
        profile.cosine(row)
            + recency_boost(article.published_at(), request.now, self.config.recency)
    }
}

impl<S: ActivityStore> Recommender for NewsRecommender<S> {
    fn recommend(&self, request: &RecommendRequest) -> Recommendation {
        match self.personalise(request) {
            Ok(recommendation) => recommendation,
            Err(reason) => {
                log::info!("serving recency fallback: {reason}");
                Recommendation {
                    articles: recency_fallback(&request.candidates, self.config.page_size),
                    strategy: Strategy::RecencyFallback(reason),
                }
            }
        }
    }
}
