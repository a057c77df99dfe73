use serde::{Deserialize, Serialize};

use super::{AppError, QuestionId, SetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Short,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "mcq",
            QuestionKind::Short => "short",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "mcq" => Ok(QuestionKind::Mcq),
            "short" => Ok(QuestionKind::Short),
            other => Err(AppError::invalid(format!("unknown question kind: {other}"))),
        }
    }
}

/// One quiz question. MCQ questions carry `choices` plus `correct_index`;
/// short-answer questions carry the reference `answer_text` they are graded
/// against.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub set_id: SetId,
    pub kind: QuestionKind,
    pub question_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<i64>,
    /// Reference answer for short-answer grading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub ord: i64,
}
