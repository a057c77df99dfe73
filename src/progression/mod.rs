//! Progression engine
//!
//! Converts raw XP-worthy events into awarded amounts, updates the user's
//! cumulative XP and derived level, and appends an immutable ledger entry.
//! The whole read-modify-write-append sequence runs inside one SQLite
//! transaction, so a failed award never applies partial XP.

pub mod policy;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::domain::{AppError, AppResult, EventType, SetId, UserId};
use crate::store::{self, NewXpEvent, Store};
use crate::time_bucket::{current_day_bucket, day_bucket};

pub use policy::level_for_xp;

/// Result of one award: what was actually granted and where it left the user.
#[derive(Debug, Clone, Copy)]
pub struct AwardOutcome {
    pub awarded: i64,
    pub total_xp: i64,
    pub level: i64,
}

#[derive(Clone)]
pub struct ProgressionEngine {
    store: Store,
}

impl ProgressionEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Award XP for an event happening now.
    ///
    /// Awards tied to a source set are subject to the daily cap: the first
    /// [`policy::DAILY_FULL_XP_SETS`] distinct sets per UTC day (per event
    /// type) earn the full base amount, anything beyond that is halved,
    /// repeat or not. Sourceless awards are never capped.
    pub fn award_xp(
        &self,
        user_id: UserId,
        base_amount: i64,
        event_type: EventType,
        source_set: Option<SetId>,
    ) -> AppResult<AwardOutcome> {
        self.award_xp_on_day(user_id, base_amount, event_type, source_set, &current_day_bucket())
    }

    /// Award XP, recording the ledger entry under an explicit day bucket.
    /// The checklist uses this so the daily bonus is deduplicated against
    /// the date being completed rather than the server's current day.
    pub fn award_xp_on_day(
        &self,
        user_id: UserId,
        base_amount: i64,
        event_type: EventType,
        source_set: Option<SetId>,
        day: &str,
    ) -> AppResult<AwardOutcome> {
        let created_at = Utc::now().to_rfc3339();
        let mut conn = self.store.conn();
        let tx = conn.transaction()?;
        let outcome = apply_award(&tx, user_id, base_amount, event_type, source_set, day, &created_at)?;
        tx.commit()?;

        debug!(
            user_id,
            event = event_type.as_str(),
            base = base_amount,
            awarded = outcome.awarded,
            total = outcome.total_xp,
            "xp awarded"
        );

        Ok(outcome)
    }

    /// Run an award inside a transaction the caller already holds, so extra
    /// rows written alongside it (e.g. a quiz attempt) commit or roll back
    /// together with the XP update.
    pub(crate) fn award_in_tx(
        &self,
        tx: &Connection,
        user_id: UserId,
        base_amount: i64,
        event_type: EventType,
        source_set: Option<SetId>,
        day: &str,
        created_at: &str,
    ) -> AppResult<AwardOutcome> {
        apply_award(tx, user_id, base_amount, event_type, source_set, day, created_at)
    }

    /// Append a zero-amount ledger entry without touching XP or level.
    /// Marks that an event happened (e.g. a quiz finished below 100%) so the
    /// checklist and audit trail still see it.
    pub fn record_event(
        &self,
        user_id: UserId,
        event_type: EventType,
        source_set: Option<SetId>,
    ) -> AppResult<()> {
        let now = Utc::now();
        self.store.append_event(&NewXpEvent {
            user_id,
            event_type: event_type.as_str(),
            xp_amount: 0,
            source_set,
            created_at: &now.to_rfc3339(),
            day_bucket: &day_bucket(now),
        })
    }
}

/// The read-modify-write-append core shared by both award entry points.
fn apply_award(
    conn: &Connection,
    user_id: UserId,
    base_amount: i64,
    event_type: EventType,
    source_set: Option<SetId>,
    day: &str,
    created_at: &str,
) -> AppResult<AwardOutcome> {
    let current_xp: i64 = conn
        .query_row("SELECT xp FROM users WHERE id = ?1", [user_id], |r| r.get(0))
        .optional()?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let actual = match source_set {
        // Set-independent bonuses bypass the cap entirely.
        None => base_amount,
        Some(_) => {
            let distinct = store::distinct_sets_on_day(conn, user_id, event_type.as_str(), day)?;
            if distinct < policy::DAILY_FULL_XP_SETS {
                base_amount
            } else {
                base_amount / 2
            }
        }
    };

    // XP never decreases; an oversized amount pins the total at i64::MAX
    // rather than wrapping it negative.
    let new_xp = current_xp.saturating_add(actual.max(0));
    let new_level = level_for_xp(new_xp);
    conn.execute(
        "UPDATE users SET xp = ?1, level = ?2 WHERE id = ?3",
        rusqlite::params![new_xp, new_level, user_id],
    )?;

    store::append_event(
        conn,
        &NewXpEvent {
            user_id,
            event_type: event_type.as_str(),
            xp_amount: actual,
            source_set,
            created_at,
            day_bucket: day,
        },
    )?;

    Ok(AwardOutcome { awarded: actual, total_xp: new_xp, level: new_level })
}
