//! Quiz question rows. MCQ choices are stored as a JSON array column.

use rusqlite::{params, OptionalExtension, Row};

use super::Store;
use crate::domain::{AppError, AppResult, QuestionId, QuestionKind, QuizQuestion, SetId};

fn row_to_question(row: &Row<'_>) -> rusqlite::Result<QuizQuestion> {
    let kind: String = row.get(2)?;
    let choices_json: Option<String> = row.get(4)?;
    let choices = choices_json.and_then(|j| serde_json::from_str::<Vec<String>>(&j).ok());
    Ok(QuizQuestion {
        id: row.get(0)?,
        set_id: row.get(1)?,
        kind: QuestionKind::parse(&kind).unwrap_or(QuestionKind::Mcq),
        question_text: row.get(3)?,
        choices,
        correct_index: row.get(5)?,
        answer_text: row.get(6)?,
        hint: row.get(7)?,
        ord: row.get(8)?,
    })
}

const QUESTION_COLS: &str =
    "id, set_id, kind, question_text, choices, correct_index, answer_text, hint, ord";

impl Store {
    #[allow(clippy::too_many_arguments)]
    pub fn insert_question(
        &self,
        set_id: SetId,
        kind: QuestionKind,
        question_text: &str,
        choices: Option<&[String]>,
        correct_index: Option<i64>,
        answer_text: Option<&str>,
        hint: Option<&str>,
        ord: i64,
    ) -> AppResult<QuizQuestion> {
        let choices_json = choices
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| AppError::invalid(format!("invalid choices: {e}")))?;
        let conn = self.conn();
        conn.execute(
            "INSERT INTO quiz_questions (set_id, kind, question_text, choices, correct_index, answer_text, hint, ord)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                set_id,
                kind.as_str(),
                question_text,
                choices_json,
                correct_index,
                answer_text,
                hint,
                ord
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);
        self.question_by_id(id)
    }

    pub fn question_by_id(&self, id: QuestionId) -> AppResult<QuizQuestion> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {QUESTION_COLS} FROM quiz_questions WHERE id = ?1"),
            [id],
            row_to_question,
        )
        .optional()?
        .ok_or_else(|| AppError::not_found("Question not found"))
    }

    pub fn questions_in_set(&self, set_id: SetId) -> AppResult<Vec<QuizQuestion>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUESTION_COLS} FROM quiz_questions WHERE set_id = ?1 ORDER BY ord, id"
        ))?;
        let rows = stmt.query_map([set_id], row_to_question)?;
        let mut questions = Vec::new();
        for row in rows {
            questions.push(row?);
        }
        Ok(questions)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update_question(
        &self,
        id: QuestionId,
        question_text: Option<&str>,
        choices: Option<&[String]>,
        correct_index: Option<i64>,
        answer_text: Option<&str>,
        hint: Option<&str>,
        ord: Option<i64>,
    ) -> AppResult<QuizQuestion> {
        {
            let conn = self.conn();
            if let Some(text) = question_text {
                conn.execute(
                    "UPDATE quiz_questions SET question_text = ?1 WHERE id = ?2",
                    params![text, id],
                )?;
            }
            if let Some(choices) = choices {
                let json = serde_json::to_string(choices)
                    .map_err(|e| AppError::invalid(format!("invalid choices: {e}")))?;
                conn.execute(
                    "UPDATE quiz_questions SET choices = ?1 WHERE id = ?2",
                    params![json, id],
                )?;
            }
            if let Some(index) = correct_index {
                conn.execute(
                    "UPDATE quiz_questions SET correct_index = ?1 WHERE id = ?2",
                    params![index, id],
                )?;
            }
            if let Some(answer) = answer_text {
                conn.execute(
                    "UPDATE quiz_questions SET answer_text = ?1 WHERE id = ?2",
                    params![answer, id],
                )?;
            }
            if let Some(hint) = hint {
                conn.execute("UPDATE quiz_questions SET hint = ?1 WHERE id = ?2", params![hint, id])?;
            }
            if let Some(ord) = ord {
                conn.execute("UPDATE quiz_questions SET ord = ?1 WHERE id = ?2", params![ord, id])?;
            }
        }
        self.question_by_id(id)
    }

    pub fn delete_question(&self, id: QuestionId) -> AppResult<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM quiz_questions WHERE id = ?1", [id])?;
        Ok(())
    }
}
