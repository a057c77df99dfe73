//! Quiz grading
//!
//! Compares submitted answers to stored correct answers, computes a score,
//! routes the result through the progression engine, and persists an
//! immutable attempt record.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    AppError, AppResult, AttemptId, EventType, QuestionId, QuestionKind, QuestionResult, SetId,
    UserId,
};
use crate::progression::{policy, ProgressionEngine};
use crate::store::{self, NewXpEvent, Store};
use crate::time_bucket::day_bucket;

/// One submitted answer: a choice index for MCQ, free text for short answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub answer: AnswerValue,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(i64),
    Text(String),
}

/// Grading result returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAttempt {
    pub attempt_id: AttemptId,
    pub score: f64,
    pub correct: usize,
    pub total: usize,
    pub xp_earned: i64,
    pub results: Vec<QuestionResult>,
}

#[derive(Clone)]
pub struct QuizGrader {
    store: Store,
    progression: ProgressionEngine,
}

impl QuizGrader {
    pub fn new(store: Store, progression: ProgressionEngine) -> Self {
        Self { store, progression }
    }

    /// Grade every question in the set against the submitted answers.
    /// A perfect score earns quiz XP; anything less still records a
    /// zero-amount ledger event so the checklist can see the completion.
    pub fn grade(
        &self,
        set_id: SetId,
        user_id: UserId,
        answers: &[SubmittedAnswer],
        duration_ms: i64,
    ) -> AppResult<GradedAttempt> {
        self.store.set_by_id(set_id)?;
        let questions = self.store.questions_in_set(set_id)?;
        if questions.is_empty() {
            return Err(AppError::not_found("No questions found for this set"));
        }

        let total = questions.len();
        let mut correct = 0usize;
        let mut results = Vec::with_capacity(total);

        for question in &questions {
            let submitted = answers.iter().find(|a| a.question_id == question.id);
            let is_correct = match submitted.map(|a| &a.answer) {
                Some(AnswerValue::Choice(index)) if question.kind == QuestionKind::Mcq => {
                    question.correct_index == Some(*index)
                }
                Some(AnswerValue::Text(text)) if question.kind == QuestionKind::Short => {
                    question
                        .answer_text
                        .as_deref()
                        .is_some_and(|reference| answers_match(text, reference))
                }
                // Missing answer, or answer shape not matching question kind.
                _ => false,
            };
            if is_correct {
                correct += 1;
            }
            results.push(QuestionResult {
                question_id: question.id,
                correct: is_correct,
                user_answer: submitted.map(|a| match &a.answer {
                    AnswerValue::Choice(index) => serde_json::json!(index),
                    AnswerValue::Text(text) => serde_json::json!(text),
                }),
            });
        }

        let score = (correct as f64 * 100.0) / total as f64;
        let base_xp = policy::xp_for_quiz(score);

        let completed_at = Utc::now();
        let started_at = completed_at - Duration::milliseconds(duration_ms.max(0));
        let day = day_bucket(completed_at);
        let completed_rfc = completed_at.to_rfc3339();

        // The XP award and the attempt row commit or roll back together.
        let (attempt_id, xp_earned) = {
            let mut conn = self.store.conn();
            let tx = conn.transaction()?;
            let xp_earned = if base_xp > 0 {
                self.progression
                    .award_in_tx(
                        &tx,
                        user_id,
                        base_xp,
                        EventType::QuizComplete,
                        Some(set_id),
                        &day,
                        &completed_rfc,
                    )?
                    .awarded
            } else {
                store::append_event(
                    &tx,
                    &NewXpEvent {
                        user_id,
                        event_type: EventType::QuizComplete.as_str(),
                        xp_amount: 0,
                        source_set: Some(set_id),
                        created_at: &completed_rfc,
                        day_bucket: &day,
                    },
                )?;
                0
            };
            let attempt_id = store::append_attempt(
                &tx,
                set_id,
                user_id,
                score,
                xp_earned,
                &started_at.to_rfc3339(),
                &completed_rfc,
                duration_ms,
                &results,
            )?;
            tx.commit()?;
            (attempt_id, xp_earned)
        };

        info!(user_id, set_id, score, xp_earned, "quiz graded");

        Ok(GradedAttempt { attempt_id, score, correct, total, xp_earned, results })
    }
}

/// Short answers match case-insensitively after trimming whitespace.
fn answers_match(submitted: &str, reference: &str) -> bool {
    submitted.trim().eq_ignore_ascii_case(reference.trim())
}
