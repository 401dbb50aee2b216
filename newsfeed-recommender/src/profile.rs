//! Collapse an activity log into one signed weight per article.

use std::collections::HashMap;

use newsfeed_core::{ActionType, Interaction};

use crate::ActionWeights;

/// One article in the reader's profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEntry {
    /// Article URL.
    pub url: String,
    /// Canonical article text.
    pub text: String,
    /// Strongest signed signal seen for the URL.
    pub weight: f32,
}

/// Per-URL signals derived from recent activity.
///
/// Entries keep the order in which each URL was first seen, so vectoriser
/// rows are deterministic for a given log.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityProfile {
    entries: Vec<ProfileEntry>,
    like_count: usize,
}

impl ActivityProfile {
    /// Build a profile from interactions ordered newest-first.
    ///
    /// Rows without a URL or text are skipped and do not count as likes. For
    /// each URL the entry with the largest absolute weight is kept; on equal
    /// magnitude the later row replaces the earlier one.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use newsfeed_core::{ActionType, Article, Interaction};
    /// use newsfeed_recommender::{ActionWeights, ActivityProfile};
    ///
    /// let article = Article::new("https://example.com/a", "Rocket launch");
    /// let log = vec![
    ///     Interaction::from_article(&article, ActionType::View, Utc::now()),
    ///     Interaction::from_article(&article, ActionType::Dislike, Utc::now()),
    /// ];
    /// let profile = ActivityProfile::build(&log, ActionWeights::default());
    /// assert_eq!(profile.entries()[0].weight, -1.0);
    /// ```
    #[must_use]
    pub fn build(interactions: &[Interaction], weights: ActionWeights) -> Self {
        let mut entries: Vec<ProfileEntry> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut like_count = 0_usize;

        for interaction in interactions {
            let text = interaction.text();
            if interaction.article_url.is_empty() || text.is_empty() {
                continue;
            }
            if interaction.action_type == ActionType::Like {
                like_count += 1;
            }
            let weight = weights.weight_for(interaction.action_type);
            if let Some(&index) = positions.get(&interaction.article_url) {
                if let Some(existing) = entries.get_mut(index)
                    && weight.abs() >= existing.weight.abs()
                {
                    existing.text = text;
                    existing.weight = weight;
                }
                continue;
            }
            positions.insert(interaction.article_url.clone(), entries.len());
            entries.push(ProfileEntry {
                url: interaction.article_url.clone(),
                text,
                weight,
            });
        }

        log::debug!(
            "processed {} unique articles ({like_count} likes)",
            entries.len()
        );
        Self {
            entries,
            like_count,
        }
    }

    /// Profile entries in first-seen order.
    #[must_use]
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Number of valid like interactions, counting repeats.
    #[must_use]
    pub const fn like_count(&self) -> usize {
        self.like_count
    }

    /// Report whether the profile holds no usable entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
