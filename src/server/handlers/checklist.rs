//! Daily checklist endpoints. Both accept an optional `date` query parameter
//! and default to the current UTC day.

use serde_json::json;

use crate::domain::{AppResult, TaskId};
use crate::server::{query_param, AppState, Reply};
use crate::time_bucket::current_day_bucket;

pub fn get(state: &AppState, auth_header: Option<&str>, query: &str) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let date = resolve_date(query);
    let items = state.checklist.checklist_for_date(user_id, &date)?;
    Ok((200, json!({ "date": date, "tasks": items })))
}

pub fn complete(
    state: &AppState,
    auth_header: Option<&str>,
    task_id: TaskId,
    query: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let date = resolve_date(query);
    let outcome = state.checklist.complete_task(user_id, task_id, &date)?;
    Ok((200, json!(outcome)))
}

fn resolve_date(query: &str) -> String {
    query_param(query, "date")
        .map(|d| d.to_string())
        .unwrap_or_else(current_day_bucket)
}
