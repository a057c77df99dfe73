//! XP ledger endpoints.

use serde_json::json;

use crate::domain::{AppError, AppResult, EventType};
use crate::server::types::PostXpEventRequest;
use crate::server::{parse_body, AppState, Reply};

pub fn history(state: &AppState, auth_header: Option<&str>) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let user = state.auth.current_user(user_id)?;
    let events = state.store.events_for_user(user_id)?;
    Ok((
        200,
        json!({ "totalXp": user.xp, "level": user.level, "events": events }),
    ))
}

/// Manually post an XP event. Only the known event types are accepted and the
/// award still flows through the progression engine, so the daily cap and
/// level recompute apply exactly as they would for the built-in flows.
pub fn post_event(state: &AppState, auth_header: Option<&str>, body: &str) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let req: PostXpEventRequest = parse_body(body)?;

    let event_type = EventType::parse(&req.event_type)?;
    if req.xp_amount < 0 {
        return Err(AppError::invalid("xpAmount must not be negative"));
    }

    let outcome =
        state
            .progression
            .award_xp(user_id, req.xp_amount, event_type, req.source_set)?;
    Ok((
        201,
        json!({
            "xpEarned": outcome.awarded,
            "totalXp": outcome.total_xp,
            "level": outcome.level,
        }),
    ))
}
