//! Tunable parameters for the recommender.
//!
//! Every knob has a named default; [`RecommenderConfig::validate`] rejects
//! combinations that would make ranking meaningless.

use newsfeed_core::{ActionType, DEFAULT_ACTIVITY_LIMIT};

use crate::ConfigError;

/// Number of articles returned by default.
pub const DEFAULT_PAGE_SIZE: usize = 30;
/// Minimum number of articles a personalised response should contain.
pub const DEFAULT_MIN_RECOMMENDATIONS: usize = 5;
/// Likes required before personalisation kicks in.
pub const DEFAULT_POSITIVE_INTERACTIONS_THRESHOLD: usize = 3;

/// Signed weight attached to each logged action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionWeights {
    /// Weight of a like; must be positive.
    pub like: f32,
    /// Weight of a view; must not be negative.
    pub view: f32,
    /// Weight of a dislike; must be negative.
    pub dislike: f32,
}

impl ActionWeights {
    /// Weight for `action`.
    #[must_use]
    pub const fn weight_for(self, action: ActionType) -> f32 {
        match action {
            ActionType::Like => self.like,
            ActionType::View => self.view,
            ActionType::Dislike => self.dislike,
        }
    }

    fn validate(self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("like", self.like),
            ("view", self.view),
            ("dislike", self.dislike),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { action: name });
            }
        }
        if self.like <= 0.0_f32 {
            return Err(ConfigError::LikeWeightNotPositive { value: self.like });
        }
        if self.view < 0.0_f32 {
            return Err(ConfigError::NegativeViewWeight { value: self.view });
        }
        if self.dislike >= 0.0_f32 {
            return Err(ConfigError::DislikeWeightNotNegative {
                value: self.dislike,
            });
        }
        Ok(())
    }
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self {
            like: 1.0_f32,
            view: 0.2_f32,
            dislike: -1.0_f32,
        }
    }
}

/// Linear freshness bonus added to similarity scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyBoost {
    /// Age in days at which the bonus reaches zero.
    pub window_days: u32,
    /// Bonus for an article published today.
    pub magnitude: f32,
}

impl Default for RecencyBoost {
    fn default() -> Self {
        Self {
            window_days: 14,
            magnitude: 0.1_f32,
        }
    }
}

/// Vocabulary bounds for the TF-IDF vectoriser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorizerConfig {
    /// Keep at most this many terms, most frequent first.
    pub max_features: usize,
    /// Drop terms appearing in fewer documents than this.
    pub min_df: usize,
    /// Drop terms appearing in more than this share of documents.
    pub max_df: f32,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_df: 2,
            max_df: 0.85_f32,
        }
    }
}

/// Complete recommender configuration.
///
/// # Examples
/// ```
/// use newsfeed_recommender::RecommenderConfig;
///
/// let config = RecommenderConfig {
///     page_size: 10,
///     ..RecommenderConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderConfig {
    /// Per-action profile weights.
    pub weights: ActionWeights,
    /// Freshness bonus.
    pub recency: RecencyBoost,
    /// Vectoriser vocabulary bounds.
    pub vectorizer: VectorizerConfig,
    /// Maximum number of articles returned.
    pub page_size: usize,
    /// Backfill personalised results up to this many articles.
    pub min_recommendations: usize,
    /// Likes required before personalising.
    pub positive_interactions_threshold: usize,
    /// Number of recent interactions read from the activity store.
    pub activity_limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            weights: ActionWeights::default(),
            recency: RecencyBoost::default(),
            vectorizer: VectorizerConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            min_recommendations: DEFAULT_MIN_RECOMMENDATIONS,
            positive_interactions_threshold: DEFAULT_POSITIVE_INTERACTIONS_THRESHOLD,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }
}

impl RecommenderConfig {
    /// Check every parameter, returning the config unchanged when valid.
    ///
    /// # Errors
    /// Returns [`ConfigError`] describing the first invalid parameter.
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.weights.validate()?;
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.recency.window_days == 0 {
            return Err(ConfigError::ZeroRecencyWindow);
        }
        if !self.recency.magnitude.is_finite() || self.recency.magnitude < 0.0_f32 {
            return Err(ConfigError::InvalidRecencyMagnitude {
                value: self.recency.magnitude,
            });
        }
        let max_df = self.vectorizer.max_df;
        if !(max_df > 0.0_f32 && max_df <= 1.0_f32) {
            return Err(ConfigError::InvalidMaxDf { value: max_df });
        }
        if self.vectorizer.max_features == 0 {
            return Err(ConfigError::ZeroMaxFeatures);
        }
        Ok(self)
    }
}
