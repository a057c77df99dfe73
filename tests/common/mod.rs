//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::Utc;

use studyhall::auth::Registration;
use studyhall::domain::{QuestionKind, SetId, SetKind, UserId, Visibility};
use studyhall::server::AppState;
use studyhall::store::Store;

pub const EMAIL_DOMAIN: &str = "@mavs.uta.edu";
pub const PASSWORD: &str = "Hunter2!abcd";

pub fn test_state() -> AppState {
    let store = Store::open_in_memory().expect("Failed to open in-memory store");
    AppState::new(store, EMAIL_DOMAIN.to_string())
}

/// Register through the auth service; seeds the default tasks and starter
/// sets like a real signup.
pub fn register(state: &AppState, tag: u32) -> (UserId, String) {
    let session = state
        .auth
        .register(&Registration {
            student_id: format!("100000{tag:04}"),
            email: format!("user{tag}{EMAIL_DOMAIN}"),
            first_name: format!("First{tag}"),
            last_name: format!("Last{tag}"),
            password: PASSWORD.to_string(),
            password_confirm: PASSWORD.to_string(),
        })
        .expect("Failed to register user");
    (session.user.id, session.token)
}

/// Insert a bare user row with no seeded tasks or sets. Keeps XP math
/// isolated from signup side effects.
pub fn bare_user(state: &AppState, tag: u32) -> UserId {
    state
        .store
        .insert_user(
            &format!("200000{tag:04}"),
            &format!("bare{tag}{EMAIL_DOMAIN}"),
            "Bare",
            &format!("User{tag}"),
            "not-a-real-hash",
            &Utc::now().to_rfc3339(),
        )
        .expect("Failed to insert user")
        .id
}

pub fn quiz_set(state: &AppState, owner: UserId, title: &str) -> SetId {
    state
        .store
        .insert_set(title, None, None, Visibility::Private, SetKind::Quiz, owner, &Utc::now().to_rfc3339())
        .expect("Failed to insert quiz set")
        .id
}

pub fn flashcard_set(state: &AppState, owner: UserId, title: &str) -> SetId {
    state
        .store
        .insert_set(
            title,
            None,
            None,
            Visibility::Private,
            SetKind::Flashcard,
            owner,
            &Utc::now().to_rfc3339(),
        )
        .expect("Failed to insert flashcard set")
        .id
}

pub fn add_mcq(state: &AppState, set_id: SetId, text: &str, choices: &[&str], correct: i64) -> i64 {
    let choices: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
    state
        .store
        .insert_question(set_id, QuestionKind::Mcq, text, Some(&choices), Some(correct), None, None, 0)
        .expect("Failed to insert MCQ question")
        .id
}

pub fn add_short(state: &AppState, set_id: SetId, text: &str, answer: &str) -> i64 {
    state
        .store
        .insert_question(set_id, QuestionKind::Short, text, None, None, Some(answer), None, 0)
        .expect("Failed to insert short-answer question")
        .id
}
