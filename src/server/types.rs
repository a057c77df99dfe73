//! Request DTOs for the JSON API.

use serde::Deserialize;

use crate::domain::SetId;
use crate::quiz::SubmittedAnswer;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordStrengthRequest {
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSetRequest {
    pub title: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    /// Defaults to private.
    pub visibility: Option<String>,
    /// "flashcard" or "quiz".
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSetRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub question: String,
    pub answer: String,
    pub hint: Option<String>,
    #[serde(default)]
    pub ord: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub hint: Option<String>,
    pub ord: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    /// "mcq" (default) or "short".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub question_text: String,
    pub choices: Option<Vec<String>>,
    pub correct_index: Option<i64>,
    pub answer_text: Option<String>,
    pub hint: Option<String>,
    #[serde(default)]
    pub ord: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub question_text: Option<String>,
    pub choices: Option<Vec<String>>,
    pub correct_index: Option<i64>,
    pub answer_text: Option<String>,
    pub hint: Option<String>,
    pub ord: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    pub answers: Vec<SubmittedAnswer>,
    #[serde(default)]
    pub duration_ms: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub cards_reviewed: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostXpEventRequest {
    pub event_type: String,
    pub xp_amount: i64,
    pub source_set: Option<SetId>,
}
