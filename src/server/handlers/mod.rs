//! Per-resource request handlers. Each takes the shared state plus already
//! parsed path pieces and returns a status/JSON pair.

pub mod attempts;
pub mod auth;
pub mod cards;
pub mod checklist;
pub mod leaderboard;
pub mod questions;
pub mod sets;
pub mod xp;

use crate::domain::{AppError, AppResult, SetId, StudySet, UserId};
use crate::server::AppState;

/// Load a set and check the caller owns it. Mutations on sets and their
/// contents all funnel through here.
pub(crate) fn owned_set(state: &AppState, set_id: SetId, user_id: UserId) -> AppResult<StudySet> {
    let set = state.store.set_by_id(set_id)?;
    if set.created_by != user_id {
        return Err(AppError::forbidden("Not authorized to modify this set"));
    }
    Ok(set)
}
