//! Error types for the recommender crate.

use thiserror::Error;

/// Errors raised by [`RecommenderConfig::validate`](crate::RecommenderConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// An action weight was NaN or infinite.
    #[error("{action} weight must be finite")]
    NonFiniteWeight {
        /// Action whose weight is invalid.
        action: &'static str,
    },
    /// The like weight must reward matching articles.
    #[error("like weight must be positive, got {value}")]
    LikeWeightNotPositive {
        /// Rejected weight.
        value: f32,
    },
    /// Views are a weak positive signal and cannot be negative.
    #[error("view weight must not be negative, got {value}")]
    NegativeViewWeight {
        /// Rejected weight.
        value: f32,
    },
    /// The dislike weight must penalise matching articles.
    #[error("dislike weight must be negative, got {value}")]
    DislikeWeightNotNegative {
        /// Rejected weight.
        value: f32,
    },
    /// A page must hold at least one article.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The recency window must span at least one day.
    #[error("recency window must be at least 1 day")]
    ZeroRecencyWindow,
    /// The recency bonus must be a finite, non-negative number.
    #[error("recency magnitude must be finite and non-negative, got {value}")]
    InvalidRecencyMagnitude {
        /// Rejected magnitude.
        value: f32,
    },
    /// `max_df` is a document share in `(0, 1]`.
    #[error("max_df must lie in (0, 1], got {value}")]
    InvalidMaxDf {
        /// Rejected share.
        value: f32,
    },
    /// The vocabulary must be allowed at least one term.
    #[error("max_features must be at least 1")]
    ZeroMaxFeatures,
}

/// Reasons the vectoriser cannot encode a corpus.
///
/// Always absorbed by the recommender into a recency fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum VectorizeError {
    /// No document contained a single token.
    #[error("empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,
    /// The document-frequency bounds exclude every possible term.
    #[error("max_df corresponds to {max_docs} documents, below min_df of {min_docs}")]
    ContradictoryBounds {
        /// Document count permitted by `max_df`.
        max_docs: usize,
        /// Document count required by `min_df`.
        min_docs: usize,
    },
    /// Every term fell outside the document-frequency bounds.
    #[error("no terms remain after pruning; try a lower min_df or a higher max_df")]
    NoTermsRemain,
}
