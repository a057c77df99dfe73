//! Daily checklist engine
//!
//! Tracks per-date task completion and triggers the daily bonus through the
//! progression engine. There is no scheduled reset: status rows are keyed by
//! date, so a new day simply has no rows yet.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::domain::{AppError, AppResult, ChecklistItem, EventType, TaskId, UserId};
use crate::progression::{policy, ProgressionEngine};
use crate::store::Store;
use crate::time_bucket::parse_day_bucket;

/// Outcome of completing one task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOutcome {
    pub task_id: TaskId,
    pub completed: bool,
    pub all_completed: bool,
    /// XP granted by the daily bonus this call; 0 when the bonus was already
    /// awarded for the date or the checklist is not finished yet.
    pub bonus_xp_awarded: i64,
}

#[derive(Clone)]
pub struct ChecklistEngine {
    store: Store,
    progression: ProgressionEngine,
}

impl ChecklistEngine {
    pub fn new(store: Store, progression: ProgressionEngine) -> Self {
        Self { store, progression }
    }

    /// Active tasks with their completion state for `date`.
    pub fn checklist_for_date(&self, user_id: UserId, date: &str) -> AppResult<Vec<ChecklistItem>> {
        validate_date(date)?;
        self.store.checklist_for_date(user_id, date)
    }

    /// Mark a task complete for `date` and award the daily bonus when this
    /// completes the whole checklist. Idempotent: re-completing a task
    /// refreshes its timestamp and never double-awards the bonus.
    pub fn complete_task(&self, user_id: UserId, task_id: TaskId, date: &str) -> AppResult<CompletionOutcome> {
        validate_date(date)?;

        let task = self.store.task_by_id(task_id)?;
        if task.user_id != user_id {
            return Err(AppError::forbidden("Not authorized to complete this task"));
        }

        self.store
            .upsert_task_completion(task_id, date, &Utc::now().to_rfc3339())?;

        let all_completed = self.store.all_tasks_complete(user_id, date)?;

        let mut bonus = 0;
        if all_completed {
            let already_awarded =
                self.store
                    .event_exists_on_day(user_id, EventType::DailyBonus.as_str(), date)?;
            if !already_awarded {
                let outcome = self.progression.award_xp_on_day(
                    user_id,
                    policy::DAILY_BONUS,
                    EventType::DailyBonus,
                    None,
                    date,
                )?;
                bonus = outcome.awarded;
                info!(user_id, date, bonus, "daily checklist completed");
            }
        }

        Ok(CompletionOutcome {
            task_id,
            completed: true,
            all_completed,
            bonus_xp_awarded: bonus,
        })
    }
}

fn validate_date(date: &str) -> AppResult<()> {
    parse_day_bucket(date)
        .map(|_| ())
        .ok_or_else(|| AppError::invalid(format!("invalid date: {date} (expected YYYY-MM-DD)")))
}
