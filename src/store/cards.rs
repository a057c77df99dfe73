//! Flashcard rows.

use rusqlite::{params, OptionalExtension, Row};

use super::Store;
use crate::domain::{AppError, AppResult, CardId, Flashcard, SetId};

fn row_to_card(row: &Row<'_>) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: row.get(0)?,
        set_id: row.get(1)?,
        question: row.get(2)?,
        answer: row.get(3)?,
        hint: row.get(4)?,
        ord: row.get(5)?,
    })
}

const CARD_COLS: &str = "id, set_id, question, answer, hint, ord";

impl Store {
    pub fn insert_card(
        &self,
        set_id: SetId,
        question: &str,
        answer: &str,
        hint: Option<&str>,
        ord: i64,
    ) -> AppResult<Flashcard> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO flashcards (set_id, question, answer, hint, ord)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![set_id, question, answer, hint, ord],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);
        self.card_by_id(id)
    }

    pub fn card_by_id(&self, id: CardId) -> AppResult<Flashcard> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {CARD_COLS} FROM flashcards WHERE id = ?1"),
            [id],
            row_to_card,
        )
        .optional()?
        .ok_or_else(|| AppError::not_found("Flashcard not found"))
    }

    pub fn cards_in_set(&self, set_id: SetId) -> AppResult<Vec<Flashcard>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {CARD_COLS} FROM flashcards WHERE set_id = ?1 ORDER BY ord, id"
        ))?;
        let rows = stmt.query_map([set_id], row_to_card)?;
        let mut cards = Vec::new();
        for row in rows {
            cards.push(row?);
        }
        Ok(cards)
    }

    pub fn update_card(
        &self,
        id: CardId,
        question: Option<&str>,
        answer: Option<&str>,
        hint: Option<&str>,
        ord: Option<i64>,
    ) -> AppResult<Flashcard> {
        {
            let conn = self.conn();
            if let Some(question) = question {
                conn.execute("UPDATE flashcards SET question = ?1 WHERE id = ?2", params![question, id])?;
            }
            if let Some(answer) = answer {
                conn.execute("UPDATE flashcards SET answer = ?1 WHERE id = ?2", params![answer, id])?;
            }
            if let Some(hint) = hint {
                conn.execute("UPDATE flashcards SET hint = ?1 WHERE id = ?2", params![hint, id])?;
            }
            if let Some(ord) = ord {
                conn.execute("UPDATE flashcards SET ord = ?1 WHERE id = ?2", params![ord, id])?;
            }
        }
        self.card_by_id(id)
    }

    pub fn delete_card(&self, id: CardId) -> AppResult<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM flashcards WHERE id = ?1", [id])?;
        Ok(())
    }
}
