//! Opaque bearer tokens.

use rusqlite::{params, OptionalExtension};

use super::Store;
use crate::domain::{AppResult, UserId};

impl Store {
    pub fn insert_session(&self, token: &str, user_id: UserId, created_at: &str) -> AppResult<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![token, user_id, created_at],
        )?;
        Ok(())
    }

    pub fn session_user(&self, token: &str) -> AppResult<Option<UserId>> {
        let conn = self.conn();
        Ok(conn
            .query_row("SELECT user_id FROM sessions WHERE token = ?1", [token], |r| r.get(0))
            .optional()?)
    }
}
