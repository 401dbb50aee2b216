#![expect(
    clippy::expect_used,
    reason = "tests should fail fast when setup breaks"
)]

//! Behavioural coverage for end-to-end ranking.

use std::cell::RefCell;

use chrono::{DateTime, Duration, Utc};
use newsfeed_core::test_support::{
    article_published, interaction, reference_now, textless_article,
};
use newsfeed_core::{
    ActionType, Article, Interaction, MemoryActivityLog, RecommendRequest, Recommendation,
    Recommender, Strategy,
};
use newsfeed_recommender::{NewsRecommender, RecommenderConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

const READER: &str = "reader";

/// Inputs and output of one ranking scenario.
pub struct RankingContext {
    now: DateTime<Utc>,
    user_id: RefCell<Option<String>>,
    activity: RefCell<Vec<Interaction>>,
    threshold: RefCell<usize>,
    candidates: RefCell<Vec<Article>>,
    result: RefCell<Option<Recommendation>>,
}

#[fixture]
/// Build a fresh context for each scenario run.
pub fn context() -> RankingContext {
    RankingContext {
        now: reference_now(),
        user_id: RefCell::new(None),
        activity: RefCell::new(Vec::new()),
        threshold: RefCell::new(RecommenderConfig::default().positive_interactions_threshold),
        candidates: RefCell::new(Vec::new()),
        result: RefCell::new(None),
    }
}

fn recommendation(context: &RankingContext) -> Recommendation {
    context
        .result
        .borrow()
        .clone()
        .expect("recommendations should have been requested")
}

fn position(recommendation: &Recommendation, url: &str) -> usize {
    recommendation
        .articles
        .iter()
        .position(|article| article.url == url)
        .expect("article should be recommended")
}

#[given("a reader who liked an article about a rocket launch")]
fn liked_rocket(context: &RankingContext) {
    *context.user_id.borrow_mut() = Some(READER.to_owned());
    *context.threshold.borrow_mut() = 1;
    context.activity.borrow_mut().push(interaction(
        "https://n/liked",
        "Rocket launch",
        ActionType::Like,
        context.now,
    ));
}

#[given("a reader with three rocket likes")]
fn three_rocket_likes(context: &RankingContext) {
    *context.user_id.borrow_mut() = Some(READER.to_owned());
    let mut activity = context.activity.borrow_mut();
    for (hours, title) in [(0, "Rocket launch"), (1, "Rocket engine"), (2, "Rocket crew")] {
        activity.push(interaction(
            &format!("https://n/liked-{hours}"),
            title,
            ActionType::Like,
            context.now - Duration::hours(hours),
        ));
    }
}

#[given("an anonymous reader")]
fn anonymous_reader(context: &RankingContext) {
    *context.user_id.borrow_mut() = None;
}

#[given("candidates about a SpaceX rocket and a local bakery published today")]
fn rocket_and_bakery(context: &RankingContext) {
    *context.candidates.borrow_mut() = vec![
        article_published("https://n/bakery", "Local bakery opens", "", context.now, 0),
        article_published(
            "https://n/rocket",
            "SpaceX launch rocket today",
            "",
            context.now,
            0,
        ),
    ];
}

#[given("candidates published over the last three days")]
fn spread_over_three_days(context: &RankingContext) {
    *context.candidates.borrow_mut() = vec![
        article_published("https://n/2", "Two days", "", context.now, 2),
        article_published("https://n/0", "Today", "", context.now, 0),
        article_published("https://n/1", "Yesterday", "", context.now, 1),
    ];
}

#[given("two text candidates and eight untitled candidates")]
fn sparse_candidates(context: &RankingContext) {
    let mut candidates = vec![
        article_published("https://n/s1", "Rocket launch window", "", context.now, 5),
        article_published("https://n/s2", "Bakery opens", "", context.now, 1),
    ];
    candidates.extend((0..8).map(|days| {
        textless_article(&format!("https://n/t{days}"), context.now, days)
    }));
    *context.candidates.borrow_mut() = candidates;
}

#[when("the reader asks for recommendations")]
fn ask(context: &RankingContext) {
    let config = RecommenderConfig {
        positive_interactions_threshold: *context.threshold.borrow(),
        ..RecommenderConfig::default()
    };
    let store =
        MemoryActivityLog::with_interactions(READER, context.activity.borrow().iter().cloned());
    let recommender = NewsRecommender::new(store, config).expect("valid configuration");
    let mut request = RecommendRequest::new(context.candidates.borrow().clone(), context.now);
    request.user_id = context.user_id.borrow().clone();
    *context.result.borrow_mut() = Some(recommender.recommend(&request));
}

#[then("the rocket article ranks above the bakery article")]
fn rocket_above_bakery(context: &RankingContext) {
    let recommendation = recommendation(context);
    assert!(
        position(&recommendation, "https://n/rocket")
            < position(&recommendation, "https://n/bakery")
    );
}

#[then("the articles are ordered newest first")]
fn newest_first(context: &RankingContext) {
    let urls: Vec<String> = recommendation(context)
        .articles
        .into_iter()
        .map(|article| article.url)
        .collect();
    assert_eq!(urls, vec!["https://n/0", "https://n/1", "https://n/2"]);
}

#[then("exactly five articles are returned")]
fn five_articles(context: &RankingContext) {
    assert_eq!(recommendation(context).articles.len(), 5);
}

#[then("the response is personalised")]
fn personalised(context: &RankingContext) {
    assert!(recommendation(context).is_personalised());
}

#[then("the response falls back to recency")]
fn falls_back(context: &RankingContext) {
    assert!(matches!(
        recommendation(context).strategy,
        Strategy::RecencyFallback(_)
    ));
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn liked_topic_lifts_related_articles(context: RankingContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn anonymous_readers_get_newest(context: RankingContext) {
    let _ = context;
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn sparse_results_are_topped_up(context: RankingContext) {
    let _ = context;
}
