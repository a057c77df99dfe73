use serde::Serialize;

use super::{AppError, SetId, UserId};

/// The XP-worthy actions the progression engine knows about. The ledger only
/// ever contains these four; unknown types are rejected at the API edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    QuizComplete,
    FlashcardReview,
    SetCreated,
    DailyBonus,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::QuizComplete => "quiz_complete",
            EventType::FlashcardReview => "flashcard_review",
            EventType::SetCreated => "set_created",
            EventType::DailyBonus => "daily_bonus",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "quiz_complete" => Ok(EventType::QuizComplete),
            "flashcard_review" => Ok(EventType::FlashcardReview),
            "set_created" => Ok(EventType::SetCreated),
            "daily_bonus" => Ok(EventType::DailyBonus),
            other => Err(AppError::invalid(format!("unknown event type: {other}"))),
        }
    }
}

/// Append-only ledger entry. Consulted by the engine to enforce daily caps
/// and by the checklist to deduplicate the daily bonus.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpEvent {
    pub id: i64,
    pub user_id: UserId,
    pub event_type: String,
    pub xp_amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_set: Option<SetId>,
    pub created_at: String,
    pub day_bucket: String,
}
