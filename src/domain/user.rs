use serde::Serialize;

use super::UserId;

/// A registered user. XP is cumulative and never decreases; level is always
/// derived from XP by the progression engine, never edited independently.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub xp: i64,
    pub level: i64,
    pub created_at: String,
    pub last_login: Option<String>,
}

/// The user shape exposed over the API (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub student_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub xp: i64,
    pub level: i64,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            student_id: u.student_id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            xp: u.xp,
            level: u.level,
            created_at: u.created_at,
            last_login: u.last_login,
        }
    }
}
