//! Quiz question CRUD under a set.

use serde_json::json;

use crate::domain::{AppError, AppResult, QuestionId, QuestionKind, SetId};
use crate::server::types::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::server::{parse_body, AppState, Reply};

use super::owned_set;

pub fn list(state: &AppState, set_id: SetId) -> AppResult<Reply> {
    state.store.set_by_id(set_id)?;
    let questions = state.store.questions_in_set(set_id)?;
    Ok((200, json!(questions)))
}

pub fn create(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    body: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;

    let req: CreateQuestionRequest = parse_body(body)?;
    let kind = match req.kind.as_deref() {
        Some(k) => QuestionKind::parse(k)?,
        None => QuestionKind::Mcq,
    };

    match kind {
        QuestionKind::Mcq => {
            let choices = req
                .choices
                .as_deref()
                .filter(|c| !c.is_empty())
                .ok_or_else(|| AppError::invalid("MCQ question requires choices"))?;
            let correct = req
                .correct_index
                .ok_or_else(|| AppError::invalid("MCQ question requires correctIndex"))?;
            if correct < 0 || correct as usize >= choices.len() {
                return Err(AppError::invalid("correctIndex out of range"));
            }
        }
        QuestionKind::Short => {
            if req.answer_text.as_deref().map_or(true, |a| a.trim().is_empty()) {
                return Err(AppError::invalid("Short-answer question requires answerText"));
            }
        }
    }

    let question = state.store.insert_question(
        set_id,
        kind,
        &req.question_text,
        req.choices.as_deref(),
        req.correct_index,
        req.answer_text.as_deref(),
        req.hint.as_deref(),
        req.ord,
    )?;
    Ok((201, json!(question)))
}

pub fn update(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    question_id: QuestionId,
    body: &str,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;
    require_question_in_set(state, set_id, question_id)?;

    let req: UpdateQuestionRequest = parse_body(body)?;
    let question = state.store.update_question(
        question_id,
        req.question_text.as_deref(),
        req.choices.as_deref(),
        req.correct_index,
        req.answer_text.as_deref(),
        req.hint.as_deref(),
        req.ord,
    )?;
    Ok((200, json!(question)))
}

pub fn delete(
    state: &AppState,
    auth_header: Option<&str>,
    set_id: SetId,
    question_id: QuestionId,
) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    owned_set(state, set_id, user_id)?;
    require_question_in_set(state, set_id, question_id)?;

    state.store.delete_question(question_id)?;
    Ok((200, json!({ "message": "Question deleted successfully" })))
}

fn require_question_in_set(state: &AppState, set_id: SetId, question_id: QuestionId) -> AppResult<()> {
    let question = state.store.question_by_id(question_id)?;
    if question.set_id != set_id {
        return Err(AppError::not_found("Question not found"));
    }
    Ok(())
}
