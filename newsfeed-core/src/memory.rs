//! In-memory activity log.
//!
//! Backs the CLI and the test suites. Entries live for the lifetime of the
//! value; nothing is persisted.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::{ActivityQuery, ActivitySink, ActivitySinkError, ActivityStore, Interaction};

/// Activity log held in a mutex-guarded map keyed by user id.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use newsfeed_core::{
///     ActionType, ActivityQuery, ActivitySink, ActivityStore, Article, Interaction,
///     MemoryActivityLog,
/// };
///
/// let log = MemoryActivityLog::default();
/// let article = Article::new("https://example.com/a", "Rocket launch");
/// log.append("reader", Interaction::from_article(&article, ActionType::Like, Utc::now()))
///     .expect("memory log accepts entries");
///
/// let recent = log.recent_activity("reader", &ActivityQuery::default());
/// assert_eq!(recent.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    entries: Mutex<HashMap<String, Vec<Interaction>>>,
}

impl MemoryActivityLog {
    /// Create a log holding `interactions` for a single user.
    pub fn with_interactions<I>(user_id: impl Into<String>, interactions: I) -> Self
    where
        I: IntoIterator<Item = Interaction>,
    {
        let mut entries = HashMap::new();
        entries.insert(user_id.into(), interactions.into_iter().collect());
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Number of entries stored for `user_id`.
    #[must_use]
    pub fn len_for(&self, user_id: &str) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.get(user_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

impl ActivityStore for MemoryActivityLog {
    fn recent_activity(&self, user_id: &str, query: &ActivityQuery) -> Vec<Interaction> {
        let Ok(entries) = self.entries.lock() else {
            log::warn!("activity log lock poisoned; returning no history");
            return Vec::new();
        };
        let Some(user_entries) = entries.get(user_id) else {
            return Vec::new();
        };
        let mut matching: Vec<Interaction> = user_entries
            .iter()
            .filter(|interaction| query.matches(interaction.action_type))
            .cloned()
            .collect();
        // Stable: entries appended later win timestamp ties.
        matching.reverse();
        matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matching.truncate(query.limit);
        matching
    }
}

impl ActivitySink for MemoryActivityLog {
    fn append(&self, user_id: &str, interaction: Interaction) -> Result<(), ActivitySinkError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ActivitySinkError::Unavailable {
                reason: "activity log lock poisoned".to_owned(),
            })?;
        entries
            .entry(user_id.to_owned())
            .or_default()
            .push(interaction);
        Ok(())
    }
}
