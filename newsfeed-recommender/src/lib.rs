//! Content-based ranking for newsfeed articles.
//!
//! [`NewsRecommender`] implements the [`Recommender`](newsfeed_core::Recommender)
//! trait. For each request it:
//! - reads the reader's recent activity and collapses it into an
//!   [`ActivityProfile`] of signed weights per article;
//! - fits a fresh TF-IDF vocabulary over profile and candidate texts;
//! - scores candidates by cosine similarity to the weighted profile vector,
//!   plus a linear recency bonus;
//! - sorts by score and backfills with the newest remaining candidates.
//!
//! Requests without a user, history, enough likes or usable text are served
//! newest-first instead. The pipeline never returns an error.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use newsfeed_core::{
//!     ActionType, Article, Interaction, MemoryActivityLog, RecommendRequest, Recommender,
//! };
//! use newsfeed_recommender::{NewsRecommender, RecommenderConfig};
//!
//! let now = Utc::now();
//! let liked = Article::new("https://n/liked", "Rocket launch");
//! let store = MemoryActivityLog::with_interactions(
//!     "reader",
//!     [Interaction::from_article(&liked, ActionType::Like, now)],
//! );
//! let config = RecommenderConfig {
//!     positive_interactions_threshold: 1,
//!     ..RecommenderConfig::default()
//! };
//! let recommender = NewsRecommender::new(store, config).expect("valid config");
//!
//! let candidates = vec![
//!     Article::new("https://n/bakery", "Local bakery opens"),
//!     Article::new("https://n/rocket", "SpaceX launch rocket today"),
//! ];
//! let request = RecommendRequest::new(candidates, now).for_user("reader");
//! let ranked = recommender.recommend(&request);
//! assert_eq!(ranked.articles[0].url, "https://n/rocket");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod engine;
mod error;
mod policy;
mod profile;
mod ranking;
mod recency;
mod similarity;
mod vectorizer;


pub use config::{
    ActionWeights, DEFAULT_MIN_RECOMMENDATIONS, DEFAULT_PAGE_SIZE,
    DEFAULT_POSITIVE_INTERACTIONS_THRESHOLD, RecencyBoost, RecommenderConfig, VectorizerConfig,
};
pub use engine::NewsRecommender;
pub use error::ConfigError;
pub use profile::{ActivityProfile, ProfileEntry};
