//! Study set rows.

use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{AppError, AppResult, SetId, SetKind, StudySet, UserId, Visibility};

use super::Store;

/// Listing filter; one field per supported query parameter.
#[derive(Debug, Clone, Default)]
pub struct SetFilter {
    pub subject: Option<String>,
    pub created_by: Option<UserId>,
    pub public_only: bool,
}

fn row_to_set(row: &Row<'_>) -> rusqlite::Result<StudySet> {
    let visibility: String = row.get(4)?;
    let kind: String = row.get(5)?;
    Ok(StudySet {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        subject: row.get(3)?,
        visibility: Visibility::parse(&visibility)
            .unwrap_or(Visibility::Private),
        kind: SetKind::parse(&kind).unwrap_or(SetKind::Flashcard),
        created_by: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const SET_COLS: &str = "id, title, description, subject, visibility, kind, created_by, created_at";

impl Store {
    #[allow(clippy::too_many_arguments)]
    pub fn insert_set(
        &self,
        title: &str,
        description: Option<&str>,
        subject: Option<&str>,
        visibility: Visibility,
        kind: SetKind,
        created_by: UserId,
        created_at: &str,
    ) -> AppResult<StudySet> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO sets (title, description, subject, visibility, kind, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                title,
                description,
                subject,
                visibility.as_str(),
                kind.as_str(),
                created_by,
                created_at
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);
        self.set_by_id(id)
    }

    pub fn set_by_id(&self, id: SetId) -> AppResult<StudySet> {
        let conn = self.conn();
        conn.query_row(&format!("SELECT {SET_COLS} FROM sets WHERE id = ?1"), [id], row_to_set)
            .optional()?
            .ok_or_else(|| AppError::not_found("Set not found"))
    }

    /// Sets visible to `viewer`: public ones plus the viewer's own, narrowed
    /// by the filter.
    pub fn list_sets(&self, viewer: UserId, filter: &SetFilter) -> AppResult<Vec<StudySet>> {
        let conn = self.conn();
        let mut sets = Vec::new();

        if let Some(creator) = filter.created_by {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SET_COLS} FROM sets
                 WHERE created_by = ?1 AND (visibility = 'public' OR created_by = ?2)
                 ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![creator, viewer], row_to_set)?;
            for row in rows {
                sets.push(row?);
            }
        } else if let Some(ref subject) = filter.subject {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SET_COLS} FROM sets
                 WHERE subject = ?1 AND (visibility = 'public' OR created_by = ?2)
                 ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![subject, viewer], row_to_set)?;
            for row in rows {
                sets.push(row?);
            }
        } else if filter.public_only {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SET_COLS} FROM sets WHERE visibility = 'public' ORDER BY id"
            ))?;
            let rows = stmt.query_map([], row_to_set)?;
            for row in rows {
                sets.push(row?);
            }
        } else {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SET_COLS} FROM sets
                 WHERE visibility = 'public' OR created_by = ?1
                 ORDER BY id"
            ))?;
            let rows = stmt.query_map([viewer], row_to_set)?;
            for row in rows {
                sets.push(row?);
            }
        }

        Ok(sets)
    }

    pub fn sets_by_creator(&self, creator: UserId) -> AppResult<Vec<StudySet>> {
        self.list_sets(creator, &SetFilter { created_by: Some(creator), ..Default::default() })
    }

    pub fn update_set(
        &self,
        id: SetId,
        title: Option<&str>,
        description: Option<&str>,
        subject: Option<&str>,
        visibility: Option<Visibility>,
    ) -> AppResult<StudySet> {
        {
            let conn = self.conn();
            if let Some(title) = title {
                conn.execute("UPDATE sets SET title = ?1 WHERE id = ?2", params![title, id])?;
            }
            if let Some(description) = description {
                conn.execute(
                    "UPDATE sets SET description = ?1 WHERE id = ?2",
                    params![description, id],
                )?;
            }
            if let Some(subject) = subject {
                conn.execute("UPDATE sets SET subject = ?1 WHERE id = ?2", params![subject, id])?;
            }
            if let Some(visibility) = visibility {
                conn.execute(
                    "UPDATE sets SET visibility = ?1 WHERE id = ?2",
                    params![visibility.as_str(), id],
                )?;
            }
        }
        self.set_by_id(id)
    }

    pub fn delete_set(&self, id: SetId) -> AppResult<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM sets WHERE id = ?1", [id])?;
        Ok(())
    }
}
