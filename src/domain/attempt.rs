use serde::{Deserialize, Serialize};

use super::{AttemptId, QuestionId, SetId, UserId};

/// Per-question outcome inside an attempt. Stored as the JSON `details`
/// column so past attempts can be reviewed without re-grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<serde_json::Value>,
}

/// Immutable record of one grading event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: AttemptId,
    pub set_id: SetId,
    pub user_id: UserId,
    pub score: f64,
    pub xp_earned: i64,
    pub started_at: String,
    pub completed_at: String,
    pub duration_ms: i64,
    pub details: Vec<QuestionResult>,
}
