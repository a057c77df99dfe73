//! Registration, login, and profile.

use serde_json::json;

use crate::auth::{password, Registration};
use crate::server::types::{
    LoginRequest, PasswordStrengthRequest, RegisterRequest, UpdateProfileRequest,
};
use crate::server::{parse_body, AppState, Reply};
use crate::domain::{AppResult, PublicUser};

pub fn register(state: &AppState, body: &str) -> AppResult<Reply> {
    let req: RegisterRequest = parse_body(body)?;
    let session = state.auth.register(&Registration {
        student_id: req.student_id,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        password: req.password,
        password_confirm: req.password_confirm,
    })?;
    Ok((
        201,
        json!({
            "message": "User registered successfully",
            "token": session.token,
            "user": session.user,
        }),
    ))
}

pub fn login(state: &AppState, body: &str) -> AppResult<Reply> {
    let req: LoginRequest = parse_body(body)?;
    let session = state.auth.login(&req.email, &req.password)?;
    Ok((200, json!({ "token": session.token, "user": session.user })))
}

pub fn me(state: &AppState, auth_header: Option<&str>) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let user = state.auth.current_user(user_id)?;
    Ok((200, json!({ "user": user })))
}

pub fn update_me(state: &AppState, auth_header: Option<&str>, body: &str) -> AppResult<Reply> {
    let user_id = state.require_user(auth_header)?;
    let req: UpdateProfileRequest = parse_body(body)?;
    let user = state
        .store
        .update_user_names(user_id, req.first_name.as_deref(), req.last_name.as_deref())?;
    Ok((200, json!({ "user": PublicUser::from(user) })))
}

/// Live feedback for the signup form's strength meter; no auth required.
pub fn password_strength(body: &str) -> AppResult<Reply> {
    let req: PasswordStrengthRequest = parse_body(body)?;
    Ok((
        200,
        json!({
            "strength": password::password_strength(&req.password),
            "valid": password::is_valid_password(&req.password),
        }),
    ))
}
