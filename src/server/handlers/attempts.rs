//! Quiz attempts and flashcard review sessions.

use serde_json::json;

use crate::domain::{AppError, AppResult, EventType, SetId};
use crate::progression::policy;
use crate::server::types::{ReviewRequest, SubmitAttemptRequest};
use crate::server::{parse_body, query_param, AppState, Reply};

pub fn submit(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    body: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let req: SubmitAttemptRequest = parse_body(body)?;
    let graded = state.grader.grade(set_id, user_id, &req.answers, req.duration_ms)?;
    Ok((201, json!(graded)))
}

pub fn list(state: &AppState, auth_header: Option<&str>, set_id: SetId) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    state.store.set_by_id(set_id)?;
    let attempts = state.store.attempts_for_set(set_id, user_id)?;
    Ok((200, json!(attempts)))
}

/// Record a flashcard review session. The card count comes from the JSON body
/// or, failing that, a `cards` query parameter.
pub fn review(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    body: &str,
    query: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    state.store.set_by_id(set_id)?;

    let cards_reviewed = if body.trim().is_empty() {
        match query_param(query, "cards") {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::invalid("invalid cards parameter"))?,
            None => return Err(AppError::invalid("cardsReviewed is required")),
        }
    } else {
        let req: ReviewRequest = parse_body(body)?;
        req.cards_reviewed
    };
    if cards_reviewed <= 0 {
        return Err(AppError::invalid("cardsReviewed must be positive"));
    }

    let base = policy::xp_for_review(cards_reviewed);
    let outcome =
        state
            .progression
            .award_xp(user_id, base, EventType::FlashcardReview, Some(set_id))?;

    Ok((
        200,
        json!({
            "cardsReviewed": cards_reviewed,
            "xpEarned": outcome.awarded,
            "totalXp": outcome.total_xp,
            "level": outcome.level,
        }),
    ))
}
