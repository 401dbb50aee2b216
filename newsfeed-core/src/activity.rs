//! Logged interactions and the user actions that produce them.
//!
//! [`UserAction`] is what a reader does in the UI. Only some actions reach
//! the activity log, where they are recorded as an [`ActionType`] on an
//! [`Interaction`].
//!
//! # Examples
//! ```
//! use newsfeed_core::{ActionType, UserAction};
//!
//! assert_eq!(UserAction::Unlike.logged_action(), Some(ActionType::Dislike));
//! assert_eq!(UserAction::Save.logged_action(), None);
//! assert_eq!(ActionType::Like.to_string(), "like");
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::article::{Article, combined_text};

/// Interaction kinds recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActionType {
    /// The reader opened or scrolled past the article.
    View,
    /// Explicit positive feedback.
    Like,
    /// Explicit negative feedback.
    Dislike,
}

impl ActionType {
    /// Every logged action type.
    pub const ALL: [Self; 3] = [Self::Like, Self::View, Self::Dislike];

    /// Return the action type as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActionType {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            _ => Err(ParseActionError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Actions a reader can take on an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    /// Article was displayed.
    View,
    /// Article was bookmarked.
    Save,
    /// Article was liked.
    Like,
    /// Article was disliked.
    Dislike,
    /// Bookmark was removed.
    Unsave,
    /// Like was withdrawn.
    Unlike,
}

impl UserAction {
    /// The activity log entry this action produces, if any.
    ///
    /// Withdrawing a like counts as negative feedback. Bookmarks are kept by
    /// the store but do not feed recommendations.
    #[must_use]
    pub const fn logged_action(self) -> Option<ActionType> {
        match self {
            Self::View => Some(ActionType::View),
            Self::Like => Some(ActionType::Like),
            Self::Dislike | Self::Unlike => Some(ActionType::Dislike),
            Self::Save | Self::Unsave => None,
        }
    }

    /// Return the action as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Save => "save",
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Unsave => "unsave",
            Self::Unlike => "unlike",
        }
    }
}

impl std::fmt::Display for UserAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "save" => Ok(Self::Save),
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            "unsave" => Ok(Self::Unsave),
            "unlike" => Ok(Self::Unlike),
            _ => Err(ParseActionError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{value}'")]
pub struct ParseActionError {
    /// Rejected input.
    pub value: String,
}

/// One entry of a user's activity log.
///
/// The article fields are copied at logging time so the profile can be
/// rebuilt without refetching articles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interaction {
    /// URL of the article acted upon.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::string_or_null")
    )]
    pub article_url: String,
    /// Article title at logging time.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::string_or_null")
    )]
    pub article_title: String,
    /// Article description at logging time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub article_description: Option<String>,
    /// Logged action.
    pub action_type: ActionType,
    /// When the action happened.
    pub timestamp: DateTime<Utc>,
    /// Publisher name at logging time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub article_source: Option<String>,
    /// Raw publication date at logging time.
    #[cfg_attr(feature = "serde", serde(default))]
    pub published_at: Option<String>,
}

impl Interaction {
    /// Build a log entry for `action` on `article` at `timestamp`.
    #[must_use]
    pub fn from_article(
        article: &Article,
        action_type: ActionType,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            article_url: article.url.clone(),
            article_title: article.title.clone(),
            article_description: article.description.clone(),
            action_type,
            timestamp,
            article_source: article.source_name().map(str::to_owned),
            published_at: article.published_at.clone(),
        }
    }

    /// Canonical text of the logged article, matching [`Article::text`].
    #[must_use]
    pub fn text(&self) -> String {
        combined_text(&self.article_title, self.article_description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(UserAction::View, Some(ActionType::View))]
    #[case(UserAction::Like, Some(ActionType::Like))]
    #[case(UserAction::Dislike, Some(ActionType::Dislike))]
    #[case(UserAction::Unlike, Some(ActionType::Dislike))]
    #[case(UserAction::Save, None)]
    #[case(UserAction::Unsave, None)]
    fn maps_user_actions_to_log_entries(
        #[case] action: UserAction,
        #[case] expected: Option<ActionType>,
    ) {
        assert_eq!(action.logged_action(), expected);
    }

    #[rstest]
    #[case("like", ActionType::Like)]
    #[case(" VIEW ", ActionType::View)]
    #[case("Dislike", ActionType::Dislike)]
    fn parses_action_types(#[case] raw: &str, #[case] expected: ActionType) {
        assert_eq!(ActionType::from_str(raw), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_action_types() {
        let err = ActionType::from_str("save").expect_err("save is not logged");
        assert_eq!(err.value, "save");
    }

    #[rstest]
    fn display_matches_as_str() {
        for action in ActionType::ALL {
            assert_eq!(action.to_string(), action.as_str());
        }
        assert_eq!(UserAction::Unsave.to_string(), "unsave");
    }

    #[rstest]
    fn interaction_copies_article_fields() {
        let article = Article::new("https://x", "Title")
            .with_description("Body")
            .with_source_name("Wire")
            .with_published_at("2024-01-01T00:00:00Z");
        let interaction = Interaction::from_article(&article, ActionType::Like, Utc::now());
        assert_eq!(interaction.article_url, "https://x");
        assert_eq!(interaction.text(), "Title Body");
        assert_eq!(interaction.article_source.as_deref(), Some("Wire"));
        assert_eq!(interaction.published_at, article.published_at);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_log_entries_with_missing_fields() {
        let raw = r#"{"action_type": "dislike", "timestamp": "2024-01-01T00:00:00Z"}"#;
        let interaction: Interaction = serde_json::from_str(raw).expect("valid interaction");
        assert_eq!(interaction.action_type, ActionType::Dislike);
        assert!(interaction.article_url.is_empty());
        assert!(interaction.text().is_empty());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_null_url_and_title_as_empty() {
        let raw = r#"[
            {"article_url": "https://x", "article_title": "Rocket", "action_type": "like",
             "timestamp": "2024-01-01T00:00:00Z"},
            {"article_url": null, "article_title": null, "action_type": "view",
             "timestamp": "2024-01-02T00:00:00Z"}
        ]"#;
        let log: Vec<Interaction> = serde_json::from_str(raw).expect("null strings decode");
        assert_eq!(log.len(), 2);
        let nulled = log.get(1).expect("second row");
        assert!(nulled.article_url.is_empty());
        assert!(nulled.article_title.is_empty());
        assert_eq!(nulled.action_type, ActionType::View);
    }
}
