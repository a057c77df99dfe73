//! Flashcard CRUD under a set.

use serde_json::json;

use crate::domain::{AppError, AppResult, CardId, SetId};
use crate::server::types::{CreateCardRequest, UpdateCardRequest};
use crate::server::{parse_body, AppState, Reply};

use super::owned_set;

pub fn list(state: &AppState, set_id: SetId) -> AppResult<Reply> {
    state.store.set_by_id(set_id)?;
    let cards = state.store.cards_in_set(set_id)?;
    Ok((200, json!(cards)))
}

pub fn create(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    body: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;

    let req: CreateCardRequest = parse_body(body)?;
    let card = state
        .store
        .insert_card(set_id, &req.question, &req.answer, req.hint.as_deref(), req.ord)?;
    Ok((201, json!(card)))
}

pub fn update(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    card_id: CardId,
    body: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;
    require_card_in_set(state, set_id, card_id)?;

    let req: UpdateCardRequest = parse_body(body)?;
    let card = state.store.update_card(
        card_id,
        req.question.as_deref(),
        req.answer.as_deref(),
        req.hint.as_deref(),
        req.ord,
    )?;
    Ok((200, json!(card)))
}

pub fn delete(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    card_id: CardId,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;
    require_card_in_set(state, set_id, card_id)?;

    state.store.delete_card(card_id)?;
    Ok((200, json!({ "message": "Flashcard deleted successfully" })))
}

fn require_card_in_set(state: &AppState, set_id: SetId, card_id: CardId) -> AppResult<()> {
    let card = state.store.card_by_id(card_id)?;
    if card.set_id != set_id {
        return Err(AppError::not_found("Flashcard not found"));
    }
    Ok(())
}
