//! Quiz attempt rows. Attempts are insert-only; `details` keeps the
//! per-question breakdown as JSON.

use rusqlite::{params, Connection, Row};

use super::Store;
use crate::domain::{AppResult, AttemptId, QuestionResult, QuizAttempt, SetId, UserId};

fn row_to_attempt(row: &Row<'_>) -> rusqlite::Result<QuizAttempt> {
    let details_json: String = row.get(8)?;
    let details = serde_json::from_str::<Vec<QuestionResult>>(&details_json).unwrap_or_default();
    Ok(QuizAttempt {
        id: row.get(0)?,
        set_id: row.get(1)?,
        user_id: row.get(2)?,
        score: row.get(3)?,
        xp_earned: row.get(4)?,
        started_at: row.get(5)?,
        completed_at: row.get(6)?,
        duration_ms: row.get(7)?,
        details,
    })
}

const ATTEMPT_COLS: &str =
    "id, set_id, user_id, score, xp_earned, started_at, completed_at, duration_ms, details";

/// Insert an attempt row on an existing connection or transaction. The
/// grader writes it in the same transaction as the XP award, so a failure
/// here rolls the award back too.
#[allow(clippy::too_many_arguments)]
pub(crate) fn append_attempt(
    conn: &Connection,
    set_id: SetId,
    user_id: UserId,
    score: f64,
    xp_earned: i64,
    started_at: &str,
    completed_at: &str,
    duration_ms: i64,
    details: &[QuestionResult],
) -> rusqlite::Result<AttemptId> {
    let details_json = serde_json::to_string(details).unwrap_or_else(|_| "[]".to_string());
    conn.execute(
        "INSERT INTO quiz_attempts (set_id, user_id, score, xp_earned, started_at, completed_at, duration_ms, details)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![set_id, user_id, score, xp_earned, started_at, completed_at, duration_ms, details_json],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Store {
    /// A user's attempts against one set, newest first.
    pub fn attempts_for_set(&self, set_id: SetId, user_id: UserId) -> AppResult<Vec<QuizAttempt>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ATTEMPT_COLS} FROM quiz_attempts
             WHERE set_id = ?1 AND user_id = ?2 ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map(params![set_id, user_id], row_to_attempt)?;
        let mut attempts = Vec::new();
        for row in rows {
            attempts.push(row?);
        }
        Ok(attempts)
    }
}
