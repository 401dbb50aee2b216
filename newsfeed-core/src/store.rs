//! Interfaces to the activity store collaborator.
//!
//! The store itself (persistence, indexing, retries) lives outside this
//! workspace. The recommender reads through [`ActivityStore`] and the action
//! recorder writes through [`ActivitySink`].

use thiserror::Error;

use crate::{ActionType, Interaction};

/// Activity window used when no limit is specified.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 100;

/// Filter and bound for an activity lookup.
///
/// # Examples
/// ```
/// use newsfeed_core::{ActionType, ActivityQuery};
///
/// let query = ActivityQuery::new(10).with_action_types([ActionType::Like]);
/// assert!(query.matches(ActionType::Like));
/// assert!(!query.matches(ActionType::View));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityQuery {
    /// Only return these action types; `None` returns every type.
    pub action_types: Option<Vec<ActionType>>,
    /// Maximum number of interactions to return.
    pub limit: usize,
}

impl ActivityQuery {
    /// Query the newest `limit` interactions of any type.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            action_types: None,
            limit,
        }
    }

    /// Restrict the query to the given action types.
    #[must_use]
    pub fn with_action_types<I>(mut self, action_types: I) -> Self
    where
        I: IntoIterator<Item = ActionType>,
    {
        self.action_types = Some(action_types.into_iter().collect());
        self
    }

    /// Report whether an action type passes the filter.
    #[must_use]
    pub fn matches(&self, action_type: ActionType) -> bool {
        self.action_types
            .as_ref()
            .is_none_or(|types| types.contains(&action_type))
    }
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_LIMIT)
    }
}

/// Read access to a user's activity log.
///
/// Implementations return interactions newest-first, apply the action-type
/// filter before the limit, and return an empty list when the user has no
/// activity or the lookup fails. Failures are the store's concern; callers
/// treat an empty result as "no history".
///
/// # Examples
///
/// ```rust
/// use newsfeed_core::{ActivityQuery, ActivityStore, Interaction};
///
/// struct EmptyStore;
///
/// impl ActivityStore for EmptyStore {
///     fn recent_activity(&self, _user_id: &str, _query: &ActivityQuery) -> Vec<Interaction> {
///         Vec::new()
///     }
/// }
///
/// assert!(EmptyStore.recent_activity("reader", &ActivityQuery::default()).is_empty());
/// ```
pub trait ActivityStore: Send + Sync {
    /// Return the newest interactions for `user_id` matching `query`.
    fn recent_activity(&self, user_id: &str, query: &ActivityQuery) -> Vec<Interaction>;
}

/// Errors raised by [`ActivitySink::append`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivitySinkError {
    /// The backing log could not accept the entry.
    #[error("activity log unavailable: {reason}")]
    Unavailable {
        /// Description of the failure.
        reason: String,
    },
}

/// Write access to a user's activity log.
pub trait ActivitySink {
    /// Append an interaction to the log of `user_id`.
    ///
    /// # Errors
    /// Returns [`ActivitySinkError`] when the log rejects the entry.
    fn append(&self, user_id: &str, interaction: Interaction) -> Result<(), ActivitySinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unfiltered_query_matches_everything() {
        let query = ActivityQuery::default();
        assert_eq!(query.limit, DEFAULT_ACTIVITY_LIMIT);
        assert!(ActionType::ALL.iter().all(|&action| query.matches(action)));
    }

    #[rstest]
    fn empty_filter_matches_nothing() {
        let query = ActivityQuery::new(5).with_action_types([]);
        assert!(ActionType::ALL.iter().all(|&action| !query.matches(action)));
    }
}
