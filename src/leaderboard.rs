//! Leaderboard queries
//!
//! Read-only aggregation over the identity store: top-N users by XP and a
//! requesting user's 1-based rank.

use serde::Serialize;

use crate::domain::{AppError, AppResult, UserId};
use crate::store::Store;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: UserId,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub xp: i64,
    pub level: i64,
}

#[derive(Clone)]
pub struct LeaderboardQuery {
    store: Store,
}

impl LeaderboardQuery {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Top users by descending XP; ties break by id ascending so the order
    /// is stable across requests.
    pub fn top_users(&self, limit: i64) -> AppResult<Vec<LeaderboardEntry>> {
        let conn = self.store.conn();
        let mut stmt = conn.prepare(
            "SELECT id, student_id, first_name, last_name, xp, level
             FROM users ORDER BY xp DESC, id ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit.max(0)], |row| {
            Ok(LeaderboardEntry {
                id: row.get(0)?,
                student_id: row.get(1)?,
                first_name: row.get(2)?,
                last_name: row.get(3)?,
                xp: row.get(4)?,
                level: row.get(5)?,
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// 1-based rank: one plus the number of users with strictly greater XP.
    /// Tied users share a rank.
    pub fn rank_of(&self, user_id: UserId) -> AppResult<i64> {
        let conn = self.store.conn();
        let exists: i64 =
            conn.query_row("SELECT COUNT(*) FROM users WHERE id = ?1", [user_id], |r| r.get(0))?;
        if exists == 0 {
            return Err(AppError::not_found("User not found"));
        }
        Ok(conn.query_row(
            "SELECT 1 + COUNT(*) FROM users
             WHERE xp > (SELECT xp FROM users WHERE id = ?1)",
            [user_id],
            |r| r.get(0),
        )?)
    }
}
