//! Recommend command implementation for the newsfeed CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use clap::Parser;
use newsfeed_core::{
    Article, CandidatePool, Interaction, MemoryActivityLog, RecommendRequest, Recommendation,
    Recommender,
};
use newsfeed_recommender::{NewsRecommender, RecommenderConfig};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{load_json, require_existing};
use crate::{
    ARG_RECOMMEND_ACTIVITY, ARG_RECOMMEND_ACTIVITY_LIMIT, ARG_RECOMMEND_CANDIDATES,
    ARG_RECOMMEND_DISLIKE_WEIGHT, ARG_RECOMMEND_LIKE_THRESHOLD, ARG_RECOMMEND_LIKE_WEIGHT,
    ARG_RECOMMEND_MAX_DF, ARG_RECOMMEND_MAX_FEATURES, ARG_RECOMMEND_MIN_DF,
    ARG_RECOMMEND_MIN_RECOMMENDATIONS, ARG_RECOMMEND_NOW, ARG_RECOMMEND_PAGE_SIZE,
    ARG_RECOMMEND_RECENCY_MAGNITUDE, ARG_RECOMMEND_RECENCY_WINDOW, ARG_RECOMMEND_USER_ID,
    ARG_RECOMMEND_VIEW_WEIGHT, CliError, ENV_RECOMMEND_CANDIDATES,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Rank a batch of candidate articles for one reader. Candidates \
                 are a JSON array of articles in news-API shape; the activity \
                 log is a JSON array of interactions. Tuning options can come \
                 from CLI flags, configuration files, or environment variables.",
    about = "Rank candidate articles for a reader"
)]
#[ortho_config(prefix = "NEWSFEED")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON array of candidate articles.
    #[arg(long = ARG_RECOMMEND_CANDIDATES, value_name = "path")]
    #[serde(default)]
    pub(crate) candidates: Option<Utf8PathBuf>,
    /// Path to a JSON array of the reader's logged interactions.
    #[arg(long = ARG_RECOMMEND_ACTIVITY, value_name = "path")]
    #[serde(default)]
    pub(crate) activity: Option<Utf8PathBuf>,
    /// Reader to personalise for; omit for a newest-first feed.
    #[arg(long = ARG_RECOMMEND_USER_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    /// Reference time as RFC 3339; defaults to the current time.
    #[arg(long = ARG_RECOMMEND_NOW, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) now: Option<String>,
    /// Maximum number of articles to print.
    #[arg(long = ARG_RECOMMEND_PAGE_SIZE, value_name = "count")]
    #[serde(default)]
    pub(crate) page_size: Option<usize>,
    /// Backfill personalised results up to this many articles.
    #[arg(long = ARG_RECOMMEND_MIN_RECOMMENDATIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) min_recommendations: Option<usize>,
    /// Likes required before personalising.
    #[arg(long = ARG_RECOMMEND_LIKE_THRESHOLD, value_name = "count")]
    #[serde(default)]
    pub(crate) like_threshold: Option<usize>,
    /// Number of recent interactions to consider.
    #[arg(long = ARG_RECOMMEND_ACTIVITY_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) activity_limit: Option<usize>,
    /// Profile weight of a like.
    #[arg(long = ARG_RECOMMEND_LIKE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) like_weight: Option<f32>,
    /// Profile weight of a view.
    #[arg(long = ARG_RECOMMEND_VIEW_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) view_weight: Option<f32>,
    /// Profile weight of a dislike.
    #[arg(
        long = ARG_RECOMMEND_DISLIKE_WEIGHT,
        value_name = "weight",
        allow_negative_numbers = true
    )]
    #[serde(default)]
    pub(crate) dislike_weight: Option<f32>,
    /// Age in days at which the freshness bonus reaches zero.
    #[arg(long = ARG_RECOMMEND_RECENCY_WINDOW, value_name = "days")]
    #[serde(default)]
    pub(crate) recency_window_days: Option<u32>,
    /// Freshness bonus for an article published today.
    #[arg(long = ARG_RECOMMEND_RECENCY_MAGNITUDE, value_name = "bonus")]
    #[serde(default)]
    pub(crate) recency_magnitude: Option<f32>,
    /// Vocabulary size cap.
    #[arg(long = ARG_RECOMMEND_MAX_FEATURES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_features: Option<usize>,
    /// Minimum number of documents a term must appear in.
    #[arg(long = ARG_RECOMMEND_MIN_DF, value_name = "count")]
    #[serde(default)]
    pub(crate) min_df: Option<usize>,
    /// Maximum share of documents a term may appear in.
    #[arg(long = ARG_RECOMMEND_MAX_DF, value_name = "share")]
    #[serde(default)]
    pub(crate) max_df: Option<f32>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    /// Candidate articles file.
    pub(crate) candidates: Utf8PathBuf,
    /// Optional activity log file.
    pub(crate) activity: Option<Utf8PathBuf>,
    /// Reader to personalise for.
    pub(crate) user_id: Option<String>,
    /// Fixed reference time, if supplied.
    pub(crate) now: Option<DateTime<Utc>>,
    /// Validated ranking parameters.
    pub(crate) recommender: RecommenderConfig,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.candidates, ARG_RECOMMEND_CANDIDATES)?;
        if let Some(activity) = &self.activity {
            require_existing(activity, ARG_RECOMMEND_ACTIVITY)?;
        }
        Ok(())
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let candidates = args.candidates.ok_or(CliError::MissingArgument {
            field: ARG_RECOMMEND_CANDIDATES,
            env: ENV_RECOMMEND_CANDIDATES,
        })?;
        let now = args.now.as_deref().map(parse_now).transpose()?;

        let defaults = RecommenderConfig::default();
        let mut recommender = defaults;
        recommender.page_size = args.page_size.unwrap_or(defaults.page_size);
        recommender.min_recommendations = args
            .min_recommendations
            .unwrap_or(defaults.min_recommendations);
        recommender.positive_interactions_threshold = args
            .like_threshold
            .unwrap_or(defaults.positive_interactions_threshold);
        recommender.activity_limit = args.activity_limit.unwrap_or(defaults.activity_limit);
        recommender.weights.like = args.like_weight.unwrap_or(defaults.weights.like);
        recommender.weights.view = args.view_weight.unwrap_or(defaults.weights.view);
        recommender.weights.dislike = args.dislike_weight.unwrap_or(defaults.weights.dislike);
        recommender.recency.window_days = args
            .recency_window_days
            .unwrap_or(defaults.recency.window_days);
        recommender.recency.magnitude = args
            .recency_magnitude
            .unwrap_or(defaults.recency.magnitude);
        recommender.vectorizer.max_features = args
            .max_features
            .unwrap_or(defaults.vectorizer.max_features);
        recommender.vectorizer.min_df = args.min_df.unwrap_or(defaults.vectorizer.min_df);
        recommender.vectorizer.max_df = args.max_df.unwrap_or(defaults.vectorizer.max_df);

        Ok(Self {
            candidates,
            activity: args.activity,
            user_id: args.user_id,
            now,
            recommender: recommender.validate()?,
        })
    }
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| CliError::InvalidNow {
            value: raw.to_owned(),
            source,
        })
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let recommendation = execute_recommend(args)?;
    write_articles(writer, &recommendation.into_articles())
}

fn execute_recommend(args: RecommendArgs) -> Result<Recommendation, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;

    let pool = load_candidates(&config.candidates)?;
    let activity = match &config.activity {
        Some(path) => load_activity(path)?,
        None => Vec::new(),
    };
    tracing::debug!(
        candidates = pool.len(),
        interactions = activity.len(),
        "loaded recommend inputs"
    );

    let store = match &config.user_id {
        Some(user_id) => MemoryActivityLog::with_interactions(user_id.trim(), activity),
        None => MemoryActivityLog::default(),
    };
    let recommender = NewsRecommender::new(store, config.recommender)?;
    let now = config.now.unwrap_or_else(Utc::now);
    let mut request = RecommendRequest::new(pool.into_inner(), now);
    request.user_id = config.user_id;

    let recommendation = recommender.recommend(&request);
    tracing::info!(
        articles = recommendation.articles.len(),
        strategy = ?recommendation.strategy,
        "ranked candidates"
    );
    Ok(recommendation)
}

/// Loads candidate articles and filters them into a pool.
pub(super) fn load_candidates(path: &Utf8Path) -> Result<CandidatePool, CliError> {
    let articles: Vec<Article> = load_json(path, ARG_RECOMMEND_CANDIDATES)?;
    Ok(CandidatePool::from_articles(articles))
}

/// Loads a JSON-encoded activity log.
///
/// The file must hold a JSON array. Rows that do not decode as an
/// [`Interaction`] are skipped with a warning.
pub(super) fn load_activity(path: &Utf8Path) -> Result<Vec<Interaction>, CliError> {
    let rows: Vec<serde_json::Value> = load_json(path, ARG_RECOMMEND_ACTIVITY)?;
    let total = rows.len();
    let activity: Vec<Interaction> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(interaction) => Some(interaction),
            Err(err) => {
                tracing::warn!(row = index, error = %err, "skipping malformed activity row");
                None
            }
        })
        .collect();
    if activity.len() < total {
        tracing::debug!(
            kept = activity.len(),
            skipped = total.saturating_sub(activity.len()),
            "filtered activity log"
        );
    }
    Ok(activity)
}

fn write_articles(writer: &mut dyn Write, articles: &[Article]) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(articles).map_err(CliError::SerialiseRecommendations)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
