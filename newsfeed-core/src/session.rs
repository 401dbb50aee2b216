//! Recording reader actions into the activity log.
//!
//! A session remembers which URLs it has already logged as viewed, so
//! scrolling back over an article does not inflate its view signal.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{ActionType, ActivitySink, ActivitySinkError, Article, Interaction, UserAction};

/// URLs already logged as viewed during the current session.
///
/// The set is owned by the caller and passed to [`record_action`]; the core
/// keeps no session state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionViews {
    viewed: HashSet<String>,
}

impl SessionViews {
    /// Start an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report whether `url` was already logged as viewed.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.viewed.contains(url)
    }

    /// Mark `url` as viewed, returning `true` when it was not seen before.
    pub fn mark_viewed(&mut self, url: &str) -> bool {
        if self.viewed.contains(url) {
            return false;
        }
        self.viewed.insert(url.to_owned())
    }

    /// Forget every viewed URL, e.g. after sign-out.
    pub fn reset(&mut self) {
        self.viewed.clear();
    }

    /// Number of URLs viewed this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.viewed.len()
    }

    /// Report whether no URL has been viewed this session.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.viewed.is_empty()
    }
}

/// What [`record_action`] did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// An interaction of this type was appended to the log.
    Logged(ActionType),
    /// The URL was already viewed this session; nothing was appended.
    DuplicateView,
    /// The action does not produce an activity log entry.
    NotLogged,
}

/// Errors returned by [`record_action`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordActionError {
    /// No signed-in user to attribute the action to.
    #[error("cannot record an action without a user id")]
    MissingUserId,
    /// The article has no URL to key the interaction by.
    #[error("cannot record an action on an article without a url")]
    MissingUrl,
    /// The activity log rejected the entry.
    #[error(transparent)]
    Sink(#[from] ActivitySinkError),
}

/// Record a reader action on an article.
///
/// Validates the user id and article URL, skips views already logged in
/// `session`, and appends the resulting [`Interaction`] to `sink`. A view is
/// marked as seen before appending, so a failed append is not retried by a
/// later scroll.
///
/// # Errors
/// Returns [`RecordActionError::MissingUserId`] when `user_id` is absent or
/// blank, [`RecordActionError::MissingUrl`] when the article has no URL, and
/// [`RecordActionError::Sink`] when the append fails.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use newsfeed_core::{
///     ActionType, Article, MemoryActivityLog, RecordOutcome, SessionViews, UserAction,
///     record_action,
/// };
///
/// let log = MemoryActivityLog::default();
/// let mut session = SessionViews::new();
/// let article = Article::new("https://example.com/a", "Rocket launch");
///
/// let mut view = || {
///     record_action(&log, &mut session, Some("reader"), &article, UserAction::View, Utc::now())
/// };
/// let first = view();
/// let again = view();
///
/// assert_eq!(first, Ok(RecordOutcome::Logged(ActionType::View)));
/// assert_eq!(again, Ok(RecordOutcome::DuplicateView));
/// ```
pub fn record_action<S>(
    sink: &S,
    session: &mut SessionViews,
    user_id: Option<&str>,
    article: &Article,
    action: UserAction,
    timestamp: DateTime<Utc>,
) -> Result<RecordOutcome, RecordActionError>
where
    S: ActivitySink + ?Sized,
{
    let reader = user_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(RecordActionError::MissingUserId)?;
    if article.url.is_empty() {
        return Err(RecordActionError::MissingUrl);
    }
    let Some(action_type) = action.logged_action() else {
        log::debug!("{action} on {} is not logged as activity", article.url);
        return Ok(RecordOutcome::NotLogged);
    };
    if action_type == ActionType::View && !session.mark_viewed(&article.url) {
        log::debug!("skipping repeat view of {}", article.url);
        return Ok(RecordOutcome::DuplicateView);
    }
    sink.append(
        reader,
        Interaction::from_article(article, action_type, timestamp),
    )?;
    log::debug!("logged {action_type} for {}", article.url);
    Ok(RecordOutcome::Logged(action_type))
}
