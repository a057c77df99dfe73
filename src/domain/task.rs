use serde::Serialize;

use super::{TaskId, UserId};

/// A daily checklist task. Deprecated tasks are kept in storage for history
/// but excluded from display and completion accounting.
#[derive(Debug, Clone)]
pub struct DailyTask {
    pub id: TaskId,
    pub user_id: UserId,
    pub task_text: String,
    pub is_default: bool,
    pub deprecated: bool,
}

/// A task joined with its completion state for one calendar date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub task_id: TaskId,
    pub task_text: String,
    pub is_default: bool,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}
