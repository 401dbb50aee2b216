//! Command-line interface for ranking newsfeed candidates offline.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod input;
mod logging;
mod recommend;

pub use error::CliError;
use recommend::{RecommendArgs, run_recommend};

const ARG_RECOMMEND_CANDIDATES: &str = "candidates";
const ARG_RECOMMEND_ACTIVITY: &str = "activity";
const ARG_RECOMMEND_USER_ID: &str = "user-id";
const ARG_RECOMMEND_NOW: &str = "now";
const ARG_RECOMMEND_PAGE_SIZE: &str = "page-size";
const ARG_RECOMMEND_MIN_RECOMMENDATIONS: &str = "min-recommendations";
const ARG_RECOMMEND_LIKE_THRESHOLD: &str = "like-threshold";
const ARG_RECOMMEND_ACTIVITY_LIMIT: &str = "activity-limit";
const ARG_RECOMMEND_LIKE_WEIGHT: &str = "like-weight";
const ARG_RECOMMEND_VIEW_WEIGHT: &str = "view-weight";
const ARG_RECOMMEND_DISLIKE_WEIGHT: &str = "dislike-weight";
const ARG_RECOMMEND_RECENCY_WINDOW: &str = "recency-window-days";
const ARG_RECOMMEND_RECENCY_MAGNITUDE: &str = "recency-magnitude";
const ARG_RECOMMEND_MAX_FEATURES: &str = "max-features";
const ARG_RECOMMEND_MIN_DF: &str = "min-df";
const ARG_RECOMMEND_MAX_DF: &str = "max-df";
const ENV_RECOMMEND_CANDIDATES: &str = "NEWSFEED_CMDS_RECOMMEND_CANDIDATES";

/// Run the newsfeed CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration or inputs are invalid,
/// or when the ranked output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init(cli.verbose);
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "newsfeed",
    about = "Offline ranking utilities for the newsfeed engine",
    version
)]
struct Cli {
    /// Log pipeline progress at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank candidate articles for a reader.
    Recommend(RecommendArgs),
}

#[cfg(test)]
mod tests;
