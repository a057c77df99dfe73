//! XP ledger rows. Append-only; the progression engine writes them inside
//! its own transaction, so the insert helper here takes a live connection.

use rusqlite::{params, Connection, Row};

use super::Store;
use crate::domain::{AppResult, SetId, UserId, XpEvent};

/// Ledger row waiting to be appended.
#[derive(Debug, Clone)]
pub struct NewXpEvent<'a> {
    pub user_id: UserId,
    pub event_type: &'a str,
    pub xp_amount: i64,
    pub source_set: Option<SetId>,
    pub created_at: &'a str,
    pub day_bucket: &'a str,
}

fn row_to_event(row: &Row<'_>) -> rusqlite::Result<XpEvent> {
    Ok(XpEvent {
        id: row.get(0)?,
        user_id: row.get(1)?,
        event_type: row.get(2)?,
        xp_amount: row.get(3)?,
        source_set: row.get(4)?,
        created_at: row.get(5)?,
        day_bucket: row.get(6)?,
    })
}

const EVENT_COLS: &str = "id, user_id, event_type, xp_amount, source_set, created_at, day_bucket";

/// Insert a ledger row on an existing connection or transaction.
pub(crate) fn append_event(conn: &Connection, event: &NewXpEvent<'_>) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO xp_events (user_id, event_type, xp_amount, source_set, created_at, day_bucket)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            event.user_id,
            event.event_type,
            event.xp_amount,
            event.source_set,
            event.created_at,
            event.day_bucket
        ],
    )?;
    Ok(())
}

/// Distinct source sets already rewarded today for (user, event type). The
/// daily cap compares this against the full-XP set limit.
pub(crate) fn distinct_sets_on_day(
    conn: &Connection,
    user_id: UserId,
    event_type: &str,
    day_bucket: &str,
) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(DISTINCT source_set) FROM xp_events
         WHERE user_id = ?1 AND event_type = ?2 AND day_bucket = ?3 AND source_set IS NOT NULL",
        params![user_id, event_type, day_bucket],
        |r| r.get(0),
    )
}

impl Store {
    pub fn append_event(&self, event: &NewXpEvent<'_>) -> AppResult<()> {
        let conn = self.conn();
        append_event(&conn, event)?;
        Ok(())
    }

    /// A user's ledger, newest first.
    pub fn events_for_user(&self, user_id: UserId) -> AppResult<Vec<XpEvent>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLS} FROM xp_events WHERE user_id = ?1 ORDER BY id DESC"
        ))?;
        let rows = stmt.query_map([user_id], row_to_event)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    /// Whether any ledger row of `event_type` exists for the user on `day`.
    pub fn event_exists_on_day(&self, user_id: UserId, event_type: &str, day: &str) -> AppResult<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM xp_events WHERE user_id = ?1 AND event_type = ?2 AND day_bucket = ?3",
            params![user_id, event_type, day],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }
}
