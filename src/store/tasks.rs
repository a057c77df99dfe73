//! Daily task and per-date status rows.

use rusqlite::{params, OptionalExtension, Row};

use super::Store;
use crate::domain::{AppError, AppResult, ChecklistItem, DailyTask, TaskId, UserId};

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<DailyTask> {
    Ok(DailyTask {
        id: row.get(0)?,
        user_id: row.get(1)?,
        task_text: row.get(2)?,
        is_default: row.get::<_, i64>(3)? != 0,
        deprecated: row.get::<_, i64>(4)? != 0,
    })
}

const TASK_COLS: &str = "id, user_id, task_text, is_default, deprecated";

impl Store {
    pub fn insert_task(&self, user_id: UserId, task_text: &str, is_default: bool) -> AppResult<TaskId> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO daily_tasks (user_id, task_text, is_default) VALUES (?1, ?2, ?3)",
            params![user_id, task_text, is_default as i64],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn task_by_id(&self, id: TaskId) -> AppResult<DailyTask> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {TASK_COLS} FROM daily_tasks WHERE id = ?1"),
            [id],
            row_to_task,
        )
        .optional()?
        .ok_or_else(|| AppError::not_found("Task not found"))
    }

    /// Active tasks joined with their completion state for `date`.
    pub fn checklist_for_date(&self, user_id: UserId, date: &str) -> AppResult<Vec<ChecklistItem>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT t.id, t.task_text, t.is_default, s.completed, s.completed_at
             FROM daily_tasks t
             LEFT JOIN daily_task_status s ON s.task_id = t.id AND s.date = ?2
             WHERE t.user_id = ?1 AND t.deprecated = 0
             ORDER BY t.id",
        )?;
        let rows = stmt.query_map(params![user_id, date], |row| {
            let completed: Option<i64> = row.get(3)?;
            Ok(ChecklistItem {
                task_id: row.get(0)?,
                task_text: row.get(1)?,
                is_default: row.get::<_, i64>(2)? != 0,
                completed: completed.unwrap_or(0) != 0,
                completed_at: row.get(4)?,
            })
        })?;
        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Mark a task complete for one date. Re-completing just refreshes the
    /// timestamp; the (task, date) row stays unique.
    pub fn upsert_task_completion(&self, task_id: TaskId, date: &str, completed_at: &str) -> AppResult<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO daily_task_status (task_id, date, completed, completed_at)
             VALUES (?1, ?2, 1, ?3)
             ON CONFLICT(task_id, date) DO UPDATE SET completed = 1, completed_at = ?3",
            params![task_id, date, completed_at],
        )?;
        Ok(())
    }

    /// True when every active task for the user has a completed status row
    /// for `date`.
    pub fn all_tasks_complete(&self, user_id: UserId, date: &str) -> AppResult<bool> {
        let conn = self.conn();
        let (total, done): (i64, i64) = conn.query_row(
            "SELECT COUNT(*),
                    COUNT(CASE WHEN s.completed = 1 THEN 1 END)
             FROM daily_tasks t
             LEFT JOIN daily_task_status s ON s.task_id = t.id AND s.date = ?2
             WHERE t.user_id = ?1 AND t.deprecated = 0",
            params![user_id, date],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;
        Ok(total > 0 && total == done)
    }
}
