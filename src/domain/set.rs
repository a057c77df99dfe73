use serde::{Deserialize, Serialize};

use super::{AppError, SetId, UserId};

/// What a study set contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    Flashcard,
    Quiz,
}

impl SetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetKind::Flashcard => "flashcard",
            SetKind::Quiz => "quiz",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "flashcard" => Ok(SetKind::Flashcard),
            "quiz" => Ok(SetKind::Quiz),
            other => Err(AppError::invalid(format!("unknown set kind: {other}"))),
        }
    }
}

/// Who can see a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(AppError::invalid(format!("unknown visibility: {other}"))),
        }
    }
}

/// A flashcard or quiz set owned by one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySet {
    pub id: SetId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub visibility: Visibility,
    pub kind: SetKind,
    pub created_by: UserId,
    pub created_at: String,
}
