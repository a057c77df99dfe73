//! Domain types shared across the store, engines, and API layer.

mod attempt;
mod card;
mod error;
mod event;
mod question;
mod set;
mod task;
mod user;

pub use attempt::{QuestionResult, QuizAttempt};
pub use card::Flashcard;
pub use error::{AppError, AppResult};
pub use event::{EventType, XpEvent};
pub use question::{QuestionKind, QuizQuestion};
pub use set::{SetKind, StudySet, Visibility};
pub use task::{ChecklistItem, DailyTask};
pub use user::{PublicUser, User};

/// Row identifiers are plain SQLite rowids.
pub type UserId = i64;
pub type SetId = i64;
pub type CardId = i64;
pub type QuestionId = i64;
pub type TaskId = i64;
pub type AttemptId = i64;
