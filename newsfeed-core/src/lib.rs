//! Core domain types for the newsfeed engine.
//!
//! This crate defines articles, activity log entries, the interfaces to the
//! external activity store, per-session action recording, and the
//! [`Recommender`] trait implemented by ranking engines. It performs no I/O
//! of its own.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod activity;
mod article;
mod memory;
mod recommender;
#[cfg(feature = "serde")]
mod serde_helpers;
mod session;
mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use activity::{ActionType, Interaction, ParseActionError, UserAction};
pub use article::{
    Article, ArticleSource, CandidatePool, REMOVED_TITLE, combined_text, latest_article,
    parse_timestamp,
};
pub use memory::MemoryActivityLog;
pub use recommender::{FallbackReason, RecommendRequest, Recommendation, Recommender, Strategy};
pub use session::{RecordActionError, RecordOutcome, SessionViews, record_action};
pub use store::{
    ActivityQuery, ActivitySink, ActivitySinkError, ActivityStore, DEFAULT_ACTIVITY_LIMIT,
};
