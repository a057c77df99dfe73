//! SQLite persistence layer
//!
//! One `Store` wraps the application database behind a mutex; every request
//! is handled end-to-end against it, with SQLite transactions providing
//! atomicity for the progression engine's read-modify-write-append sequence.

mod attempts;
mod cards;
mod events;
mod questions;
mod sessions;
mod sets;
mod tasks;
mod users;

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::Connection;

pub use events::NewXpEvent;
pub(crate) use attempts::append_attempt;
pub(crate) use events::{append_event, distinct_sets_on_day};
pub use sets::SetFilter;

/// Database wrapper shared by all engines.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open or create the database at a specific path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        Self::from_connection(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Get a handle on the connection. Engines that need a transaction take
    /// the guard mutably and hold it for the whole operation.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("db lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: explicit `deprecated` flag on daily tasks. Earlier
        // deployments soft-deleted the "Study for 30 minutes" task by
        // matching its text at read time; the flag replaces that, so any
        // surviving rows with the legacy text get flagged here once.
        if version < 2 {
            let has_deprecated: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('daily_tasks') WHERE name = 'deprecated'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);
            if !has_deprecated {
                conn.execute_batch("ALTER TABLE daily_tasks ADD COLUMN deprecated INTEGER NOT NULL DEFAULT 0;")?;
            }
            conn.execute(
                "UPDATE daily_tasks SET deprecated = 1
                 WHERE lower(task_text) LIKE '%30 minutes%' OR lower(task_text) LIKE '%study for 30%'",
                [],
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }
}

/// SQL schema for the application database.
const SCHEMA_SQL: &str = r#"
-- Registered users (XP is cumulative, level derived from it)
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    xp INTEGER NOT NULL DEFAULT 0,
    level INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    last_login TEXT
);
CREATE INDEX IF NOT EXISTS idx_users_xp ON users(xp);

-- Bearer session tokens
CREATE TABLE IF NOT EXISTS sessions (
    token TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL
);

-- Study sets (flashcard or quiz)
CREATE TABLE IF NOT EXISTS sets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    subject TEXT,
    visibility TEXT NOT NULL DEFAULT 'private',
    kind TEXT NOT NULL,
    created_by INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_sets_created_by ON sets(created_by);
CREATE INDEX IF NOT EXISTS idx_sets_subject ON sets(subject);

-- Flashcards, ordered within their set
CREATE TABLE IF NOT EXISTS flashcards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    set_id INTEGER NOT NULL REFERENCES sets(id) ON DELETE CASCADE,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    hint TEXT,
    ord INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_flashcards_set ON flashcards(set_id);

-- Quiz questions; choices is a JSON array for MCQ, answer_text is the
-- reference answer for short-answer grading
CREATE TABLE IF NOT EXISTS quiz_questions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    set_id INTEGER NOT NULL REFERENCES sets(id) ON DELETE CASCADE,
    kind TEXT NOT NULL,
    question_text TEXT NOT NULL,
    choices TEXT,
    correct_index INTEGER,
    answer_text TEXT,
    hint TEXT,
    ord INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_questions_set ON quiz_questions(set_id);

-- Immutable grading records; details is a JSON array of per-question results
CREATE TABLE IF NOT EXISTS quiz_attempts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    set_id INTEGER NOT NULL REFERENCES sets(id),
    user_id INTEGER NOT NULL REFERENCES users(id),
    score REAL NOT NULL,
    xp_earned INTEGER NOT NULL,
    started_at TEXT NOT NULL,
    completed_at TEXT NOT NULL,
    duration_ms INTEGER NOT NULL,
    details TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_attempts_user ON quiz_attempts(user_id);
CREATE INDEX IF NOT EXISTS idx_attempts_set ON quiz_attempts(set_id);

-- Daily checklist tasks
CREATE TABLE IF NOT EXISTS daily_tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    task_text TEXT NOT NULL,
    is_default INTEGER NOT NULL DEFAULT 0,
    deprecated INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_tasks_user ON daily_tasks(user_id);

-- Per-date completion state, unique per (task, date)
CREATE TABLE IF NOT EXISTS daily_task_status (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id INTEGER NOT NULL REFERENCES daily_tasks(id) ON DELETE CASCADE,
    date TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    completed_at TEXT,
    UNIQUE(task_id, date)
);

-- Append-only XP ledger; day_bucket is the UTC calendar day used by the
-- daily cap queries, created_at keeps full precision for audit
CREATE TABLE IF NOT EXISTS xp_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    event_type TEXT NOT NULL,
    xp_amount INTEGER NOT NULL,
    source_set INTEGER,
    created_at TEXT NOT NULL,
    day_bucket TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_events_user_day ON xp_events(user_id, day_bucket);
CREATE INDEX IF NOT EXISTS idx_events_type ON xp_events(event_type);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (2);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_and_init() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test_studyhall.db");
        let store = Store::open(&db_path).unwrap();

        let conn = store.conn();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap();
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"sets".to_string()));
        assert!(tables.contains(&"xp_events".to_string()));
        assert!(tables.contains(&"daily_task_status".to_string()));
    }

    #[test]
    fn test_legacy_tasks_flagged_deprecated() {
        let store = Store::open_in_memory().unwrap();
        {
            let conn = store.conn();
            conn.execute(
                "INSERT INTO users (student_id, email, first_name, last_name, password_hash, created_at)
                 VALUES ('1000000001', 'a@mavs.uta.edu', 'A', 'B', 'x', '2024-01-01T00:00:00Z')",
                [],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO daily_tasks (user_id, task_text, is_default) VALUES (1, 'Study for 30 minutes', 1)",
                [],
            )
            .unwrap();
            // Force the migration to run again over the new row
            conn.execute("DELETE FROM schema_version", []).unwrap();
        }
        store.run_migrations().unwrap();

        let conn = store.conn();
        let deprecated: i64 = conn
            .query_row("SELECT deprecated FROM daily_tasks WHERE id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(deprecated, 1);
    }
}
