//! User rows.

use rusqlite::{params, OptionalExtension, Row};

use super::Store;
use crate::domain::{AppError, AppResult, User, UserId};

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        student_id: row.get(1)?,
        email: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        password_hash: row.get(5)?,
        xp: row.get(6)?,
        level: row.get(7)?,
        created_at: row.get(8)?,
        last_login: row.get(9)?,
    })
}

const USER_COLS: &str =
    "id, student_id, email, first_name, last_name, password_hash, xp, level, created_at, last_login";

impl Store {
    pub fn insert_user(
        &self,
        student_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
        created_at: &str,
    ) -> AppResult<User> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO users (student_id, email, first_name, last_name, password_hash, xp, level, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, 1, ?6)",
            params![student_id, email, first_name, last_name, password_hash, created_at],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);
        self.user_by_id(id)
    }

    pub fn user_by_id(&self, id: UserId) -> AppResult<User> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {USER_COLS} FROM users WHERE id = ?1"),
            [id],
            row_to_user,
        )
        .optional()?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    pub fn user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let conn = self.conn();
        Ok(conn
            .query_row(
                &format!("SELECT {USER_COLS} FROM users WHERE email = ?1"),
                [email],
                row_to_user,
            )
            .optional()?)
    }

    pub fn student_id_exists(&self, student_id: &str) -> AppResult<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE student_id = ?1",
            [student_id],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn email_exists(&self, email: &str) -> AppResult<bool> {
        let conn = self.conn();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM users WHERE email = ?1", [email], |r| r.get(0))?;
        Ok(count > 0)
    }

    pub fn touch_last_login(&self, id: UserId, at: &str) -> AppResult<()> {
        let conn = self.conn();
        conn.execute("UPDATE users SET last_login = ?1 WHERE id = ?2", params![at, id])?;
        Ok(())
    }

    pub fn update_user_names(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> AppResult<User> {
        {
            let conn = self.conn();
            if let Some(first) = first_name {
                conn.execute("UPDATE users SET first_name = ?1 WHERE id = ?2", params![first, id])?;
            }
            if let Some(last) = last_name {
                conn.execute("UPDATE users SET last_name = ?1 WHERE id = ?2", params![last, id])?;
            }
        }
        self.user_by_id(id)
    }
}
