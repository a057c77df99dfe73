//! Study set CRUD. Creating a set awards XP through the progression engine.

use chrono::Utc;
use serde_json::json;

use crate::domain::{AppResult, EventType, SetId, SetKind, Visibility};
use crate::progression::policy;
use crate::server::types::{CreateSetRequest, UpdateSetRequest};
use crate::server::{parse_body, query_param, AppState, Reply};

use super::owned_set;

pub fn create(state: &AppState, auth_header: Option<&str>, body: &str) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let req: CreateSetRequest = parse_body(body)?;

    let kind = SetKind::parse(&req.kind)?;
    let visibility = match req.visibility.as_deref() {
        Some(v) => Visibility::parse(v)?,
        None => Visibility::Private,
    };

    let set = state.store.insert_set(
        &req.title,
        req.description.as_deref(),
        req.subject.as_deref(),
        visibility,
        kind,
        user_id,
        &Utc::now().to_rfc3339(),
    )?;

    let outcome =
        state
            .progression
            .award_xp(user_id, policy::SET_CREATED, EventType::SetCreated, Some(set.id))?;

    let mut payload = serde_json::to_value(&set).unwrap_or_default();
    if let Some(obj) = payload.as_object_mut() {
        obj.insert("xpEarned".to_string(), json!(outcome.awarded));
    }
    Ok((201, payload))
}

pub fn list(state: &AppState, auth_header: Option<&str>, query: &str) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;

    let filter = crate::store::SetFilter {
        subject: query_param(query, "subject").map(|s| s.to_string()),
        created_by: match query_param(query, "createdBy") {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| crate::domain::AppError::invalid("invalid createdBy"))?,
            ),
            None => None,
        },
        public_only: query_param(query, "visibility") == Some("public"),
    };

    let sets = state.store.list_sets(user_id, &filter)?;
    Ok((200, json!(sets)))
}

pub fn get(state: &AppState, set_id: SetId) -> AppResult<Reply> {
    let set = state.store.set_by_id(set_id)?;
    Ok((200, json!(set)))
}

pub fn update(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    body: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;

    let req: UpdateSetRequest = parse_body(body)?;
    let visibility = match req.visibility.as_deref() {
        Some(v) => Some(Visibility::parse(v)?),
        None => None,
    };
    let set = state.store.update_set(
        set_id,
        req.title.as_deref(),
        req.description.as_deref(),
        req.subject.as_deref(),
        visibility,
    )?;
    Ok((200, json!(set)))
}

pub fn delete(state: &AppState, auth_header: Option<&str>, set_id: SetId) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;
    state.store.delete_set(set_id)?;
    Ok((200, json!({ "message": "Set deleted successfully" })))
}
