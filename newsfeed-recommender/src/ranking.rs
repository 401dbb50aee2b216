//! Ordering, backfill and recency fallback.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use newsfeed_core::Article;

/// A candidate with its final score.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoredArticle {
    pub(crate) score: f32,
    pub(crate) article: Article,
}

/// Sort by score, highest first, keeping input order for ties, then drop
/// repeated URLs so each article keeps its best score.
pub(crate) fn rank(mut scored: Vec<ScoredArticle>) -> Vec<Article> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    dedupe_by_url(scored.into_iter().map(|entry| entry.article))
}

/// Order articles by publication date, newest first.
///
/// Missing or unparsable dates sort last; ties keep their input order.
pub(crate) fn recency_order(articles: &[Article]) -> Vec<&Article> {
    let mut dated: Vec<(Option<DateTime<Utc>>, &Article)> = articles
        .iter()
        .map(|article| (article.published_at(), article))
        .collect();
    dated.sort_by(|(left, _), (right, _)| newest_first(*left, *right));
    dated.into_iter().map(|(_, article)| article).collect()
}

fn newest_first(left: Option<DateTime<Utc>>, right: Option<DateTime<Utc>>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep the first article for each non-empty URL.
pub(crate) fn dedupe_by_url<I>(articles: I) -> Vec<Article>
where
    I: IntoIterator<Item = Article>,
{
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| !article.url.is_empty() && seen.insert(article.url.clone()))
        .collect()
}

/// Recency-only response: newest first, unique URLs, at most `page_size`.
pub(crate) fn recency_fallback(candidates: &[Article], page_size: usize) -> Vec<Article> {
    let mut articles = dedupe_by_url(recency_order(candidates).into_iter().cloned());
    articles.truncate(page_size);
    articles
}

/// Top up `selected` with the newest unselected candidates until it holds
/// `minimum` articles, then cut it to `page_size`.
///
/// Returns the final list and the number of articles appended.
pub(crate) fn backfill(
    mut selected: Vec<Article>,
    pool: &[Article],
    minimum: usize,
    page_size: usize,
) -> (Vec<Article>, usize) {
    let target = minimum.min(page_size);
    let mut appended = 0_usize;
    if selected.len() < target {
        let mut seen: HashSet<String> = selected.iter().map(|a| a.url.clone()).collect();
        for article in recency_order(pool) {
            if selected.len() >= target {
                break;
            }
            if article.url.is_empty() || !seen.insert(article.url.clone()) {
                continue;
            }
            selected.push(article.clone());
            appended += 1;
        }
    }
    selected.truncate(page_size);
    (selected, appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsfeed_core::test_support::{article_published, reference_now, textless_article};
    use rstest::rstest;

    fn urls(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.url.as_str()).collect()
    }

    fn scored(score: f32, url: &str, title: &str) -> ScoredArticle {
        ScoredArticle {
            score,
            article: article_published(url, title, "", reference_now(), 0),
        }
    }

    #[rstest]
    fn rank_is_stable_for_equal_scores() {
        let rows = vec![scored(0.5, "a", "A"), scored(0.9, "b", "B"), scored(0.5, "c", "C")];
        assert_eq!(urls(&rank(rows)), vec!["b", "a", "c"]);
    }

    #[rstest]
    fn rank_keeps_best_score_per_url() {
        let ranked = rank(vec![scored(0.1, "a", "Low"), scored(0.7, "a", "High")]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "High");
    }

    #[rstest]
    fn undated_and_broken_dates_sort_last() {
        let now = reference_now();
        let articles = vec![
            Article::new("undated", "U"),
            article_published("old", "O", "", now, 5),
            Article::new("broken", "B").with_published_at("soon"),
            article_published("new", "N", "", now, 1),
        ];
        let ordered: Vec<&str> = recency_order(&articles)
            .into_iter()
            .map(|a| a.url.as_str())
            .collect();
        assert_eq!(ordered, vec!["new", "old", "undated", "broken"]);
    }

    #[rstest]
    fn fallback_dedupes_and_truncates() {
        let now = reference_now();
        let articles = vec![
            article_published("a", "A", "", now, 3),
            article_published("b", "B", "", now, 1),
            article_published("a", "A again", "", now, 0),
            textless_article("", now, 0),
            article_published("c", "C", "", now, 2),
        ];
        let fallback = recency_fallback(&articles, 2);
        assert_eq!(urls(&fallback), vec!["a", "b"]);
        assert_eq!(fallback[0].title, "A again");
    }

    #[rstest]
    fn backfill_tops_up_with_newest_unselected() {
        let now = reference_now();
        let selected = vec![article_published("s", "S", "", now, 9)];
        let pool = vec![
            selected[0].clone(),
            textless_article("t3", now, 3),
            textless_article("t1", now, 1),
            textless_article("t2", now, 2),
        ];
        let (articles, appended) = backfill(selected, &pool, 3, 30);
        assert_eq!(urls(&articles), vec!["s", "t1", "t2"]);
        assert_eq!(appended, 2);
    }

    #[rstest]
    fn backfill_respects_page_size() {
        let now = reference_now();
        let selected: Vec<Article> = (0..4)
            .map(|i| article_published(&format!("s{i}"), "S", "", now, i))
            .collect();
        let (articles, appended) = backfill(selected, &[], 2, 3);
        assert_eq!(articles.len(), 3);
        assert_eq!(appended, 0);
    }
}
