//! Checks deciding whether a request can be personalised.
//!
//! Each check returns the [`FallbackReason`] that short-circuits the
//! pipeline; they run in the order declared here.

use newsfeed_core::{Article, FallbackReason, Interaction, RecommendRequest};

use crate::ActivityProfile;

/// Require a user id and at least one candidate.
pub(crate) fn require_audience(request: &RecommendRequest) -> Result<&str, FallbackReason> {
    let user_id = request
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(FallbackReason::MissingUser)?;
    if request.candidates.is_empty() {
        return Err(FallbackReason::NoCandidates);
    }
    Ok(user_id)
}

/// Require some logged activity.
pub(crate) const fn require_history(history: &[Interaction]) -> Result<(), FallbackReason> {
    if history.is_empty() {
        return Err(FallbackReason::NoHistory);
    }
    Ok(())
}

/// Require enough likes for a meaningful profile.
pub(crate) const fn require_likes(
    profile: &ActivityProfile,
    threshold: usize,
) -> Result<(), FallbackReason> {
    let likes = profile.like_count();
    if likes < threshold {
        return Err(FallbackReason::InsufficientLikes { likes, threshold });
    }
    Ok(())
}

/// Require text on both sides of the comparison.
pub(crate) fn require_text(
    profile: &ActivityProfile,
    candidates: &[&Article],
) -> Result<(), FallbackReason> {
    if profile.is_empty() || candidates.is_empty() {
        return Err(FallbackReason::NoVectorisableText);
    }
    Ok(())
}
