//! Quiz grading integration tests.

mod common;

use studyhall::domain::AppError;
use studyhall::quiz::{AnswerValue, SubmittedAnswer};

fn choice(question_id: i64, index: i64) -> SubmittedAnswer {
    SubmittedAnswer { question_id, answer: AnswerValue::Choice(index) }
}

fn text(question_id: i64, s: &str) -> SubmittedAnswer {
    SubmittedAnswer { question_id, answer: AnswerValue::Text(s.to_string()) }
}

#[test]
fn test_perfect_score_earns_quiz_xp() {
    let state = common::test_state();
    let user = common::bare_user(&state, 1);
    let set = common::quiz_set(&state, user, "Data Structures");
    let q1 = common::add_mcq(&state, set, "Stack order?", &["FIFO", "LIFO"], 1);
    let q2 = common::add_mcq(&state, set, "Queue order?", &["FIFO", "LIFO"], 0);

    let graded = state
        .grader
        .grade(set, user, &[choice(q1, 1), choice(q2, 0)], 30_000)
        .unwrap();

    assert_eq!(graded.score, 100.0);
    assert_eq!(graded.correct, 2);
    assert_eq!(graded.total, 2);
    assert_eq!(graded.xp_earned, 100);

    let user_row = state.store.user_by_id(user).unwrap();
    assert_eq!(user_row.xp, 100);
    assert_eq!(user_row.level, 2);
}

#[test]
fn test_imperfect_score_earns_nothing_but_is_recorded() {
    let state = common::test_state();
    let user = common::bare_user(&state, 2);
    let set = common::quiz_set(&state, user, "Mixed");
    let q1 = common::add_mcq(&state, set, "Q1", &["a", "b"], 0);
    let q2 = common::add_mcq(&state, set, "Q2", &["a", "b"], 0);

    let graded = state.grader.grade(set, user, &[choice(q1, 0), choice(q2, 1)], 0).unwrap();

    assert_eq!(graded.score, 50.0);
    assert_eq!(graded.xp_earned, 0);
    assert_eq!(state.store.user_by_id(user).unwrap().xp, 0);

    // The completion still lands in the ledger as a zero-amount event.
    let events = state.store.events_for_user(user).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "quiz_complete");
    assert_eq!(events[0].xp_amount, 0);
    assert_eq!(events[0].source_set, Some(set));
}

#[test]
fn test_short_answer_graded_case_insensitively() {
    let state = common::test_state();
    let user = common::bare_user(&state, 3);
    let set = common::quiz_set(&state, user, "Complexity");
    let q = common::add_short(&state, set, "Binary search complexity?", "O(log n)");

    let graded = state.grader.grade(set, user, &[text(q, "  o(LOG N) ")], 0).unwrap();
    assert_eq!(graded.score, 100.0);

    let graded = state.grader.grade(set, user, &[text(q, "O(n)")], 0).unwrap();
    assert_eq!(graded.score, 0.0);
}

#[test]
fn test_missing_and_mismatched_answers_are_wrong() {
    let state = common::test_state();
    let user = common::bare_user(&state, 4);
    let set = common::quiz_set(&state, user, "Shapes");
    let mcq = common::add_mcq(&state, set, "MCQ", &["a", "b"], 0);
    let short = common::add_short(&state, set, "Short", "answer");

    // Text against an MCQ and nothing for the short question.
    let graded = state.grader.grade(set, user, &[text(mcq, "a")], 0).unwrap();

    assert_eq!(graded.correct, 0);
    assert_eq!(graded.total, 2);
    assert!(graded.results.iter().all(|r| !r.correct));
    let unanswered = graded.results.iter().find(|r| r.question_id == short).unwrap();
    assert!(unanswered.user_answer.is_none());
}

#[test]
fn test_attempt_is_persisted_with_details() {
    let state = common::test_state();
    let user = common::bare_user(&state, 5);
    let set = common::quiz_set(&state, user, "History");
    let q = common::add_mcq(&state, set, "Q", &["a", "b"], 1);

    state.grader.grade(set, user, &[choice(q, 1)], 12_000).unwrap();
    state.grader.grade(set, user, &[choice(q, 0)], 8_000).unwrap();

    let attempts = state.store.attempts_for_set(set, user).unwrap();
    assert_eq!(attempts.len(), 2);
    // Newest first.
    assert_eq!(attempts[0].score, 0.0);
    assert_eq!(attempts[1].score, 100.0);
    assert_eq!(attempts[1].xp_earned, 100);
    assert_eq!(attempts[0].duration_ms, 8_000);
    assert_eq!(attempts[0].details.len(), 1);
    assert_eq!(attempts[0].details[0].question_id, q);
}

#[test]
fn test_empty_set_cannot_be_graded() {
    let state = common::test_state();
    let user = common::bare_user(&state, 6);
    let set = common::quiz_set(&state, user, "Empty");

    let err = state.grader.grade(set, user, &[], 0).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
