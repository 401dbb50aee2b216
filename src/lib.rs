//! Facade crate for the newsfeed recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the content-based
//! recommender behind a feature flag.

#![forbid(unsafe_code)]

pub use newsfeed_core::{
    ActionType, ActivityQuery, ActivitySink, ActivitySinkError, ActivityStore, Article,
    ArticleSource, CandidatePool, FallbackReason, Interaction, MemoryActivityLog,
    RecommendRequest, Recommendation, Recommender, RecordActionError, RecordOutcome,
    SessionViews, Strategy, UserAction, latest_article, record_action,
};

#[cfg(feature = "recommender")]
pub use newsfeed_recommender::{
    ActionWeights, ConfigError, NewsRecommender, RecencyBoost, RecommenderConfig,
    VectorizerConfig,
};
