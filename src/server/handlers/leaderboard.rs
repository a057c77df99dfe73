//! Leaderboard endpoint. The top list is public; the caller's own rank is
//! included only when a valid token accompanies the request.

use serde_json::json;

use crate::domain::{AppError, AppResult};
use crate::server::{query_param, AppState, Reply};

const DEFAULT_TOP: i64 = 50;

pub fn get(state: &AppState, auth_header: Option<&str>, query: &str) -> AppResult<Reply> {
    let limit = match query_param(query, "top") {
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| AppError::invalid("invalid top parameter"))?,
        None => DEFAULT_TOP,
    };

    let top_users = state.leaderboard.top_users(limit)?;

    let user_rank = match state.require_user(auth_header) {
        Ok(user_id) => Some(state.leaderboard.rank_of(user_id)?),
        Err(_) => None,
    };

    Ok((200, json!({ "topUsers": top_users, "userRank": user_rank })))
}
