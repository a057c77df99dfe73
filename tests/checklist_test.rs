//! Checklist engine integration tests: per-date completion, the daily bonus,
//! and ownership.

mod common;

use studyhall::domain::AppError;

const DATE: &str = "2026-03-01";

fn user_with_tasks(state: &studyhall::server::AppState, tag: u32, count: usize) -> (i64, Vec<i64>) {
    let user = common::bare_user(state, tag);
    let tasks: Vec<i64> = (0..count)
        .map(|i| {
            state
                .store
                .insert_task(user, &format!("Task {i}"), false)
                .unwrap()
        })
        .collect();
    (user, tasks)
}

#[test]
fn test_completing_all_tasks_awards_bonus_once() {
    let state = common::test_state();
    let (user, tasks) = user_with_tasks(&state, 1, 3);

    let first = state.checklist.complete_task(user, tasks[0], DATE).unwrap();
    assert!(!first.all_completed);
    assert_eq!(first.bonus_xp_awarded, 0);

    state.checklist.complete_task(user, tasks[1], DATE).unwrap();
    let last = state.checklist.complete_task(user, tasks[2], DATE).unwrap();
    assert!(last.all_completed);
    assert_eq!(last.bonus_xp_awarded, 100);

    // Re-completing a task never double-awards.
    let again = state.checklist.complete_task(user, tasks[0], DATE).unwrap();
    assert!(again.all_completed);
    assert_eq!(again.bonus_xp_awarded, 0);

    let bonus_events: Vec<_> = state
        .store
        .events_for_user(user)
        .unwrap()
        .into_iter()
        .filter(|e| e.event_type == "daily_bonus")
        .collect();
    assert_eq!(bonus_events.len(), 1);
    assert_eq!(bonus_events[0].day_bucket, DATE);

    assert_eq!(state.store.user_by_id(user).unwrap().xp, 100);
}

#[test]
fn test_bonus_is_per_date() {
    let state = common::test_state();
    let (user, tasks) = user_with_tasks(&state, 2, 2);

    for task in &tasks {
        state.checklist.complete_task(user, *task, "2026-03-01").unwrap();
    }
    let next_day = tasks
        .iter()
        .map(|task| state.checklist.complete_task(user, *task, "2026-03-02").unwrap())
        .last()
        .unwrap();

    // A fresh date starts empty and can earn its own bonus.
    assert!(next_day.all_completed);
    assert_eq!(next_day.bonus_xp_awarded, 100);
    assert_eq!(state.store.user_by_id(user).unwrap().xp, 200);
}

#[test]
fn test_checklist_starts_empty_each_date() {
    let state = common::test_state();
    let (user, tasks) = user_with_tasks(&state, 3, 2);

    state.checklist.complete_task(user, tasks[0], "2026-03-01").unwrap();

    let today = state.checklist.checklist_for_date(user, "2026-03-01").unwrap();
    assert_eq!(today.iter().filter(|i| i.completed).count(), 1);

    let tomorrow = state.checklist.checklist_for_date(user, "2026-03-02").unwrap();
    assert_eq!(tomorrow.len(), 2);
    assert!(tomorrow.iter().all(|i| !i.completed));
}

#[test]
fn test_foreign_task_is_forbidden() {
    let state = common::test_state();
    let (_, tasks) = user_with_tasks(&state, 4, 1);
    let intruder = common::bare_user(&state, 5);

    let err = state
        .checklist
        .complete_task(intruder, tasks[0], DATE)
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test]
fn test_invalid_date_rejected() {
    let state = common::test_state();
    let (user, tasks) = user_with_tasks(&state, 6, 1);

    for bad in ["03/01/2026", "2026-3-1", "not-a-date", ""] {
        let err = state.checklist.complete_task(user, tasks[0], bad).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "accepted {bad:?}");
    }
}

#[test]
fn test_missing_task_is_not_found() {
    let state = common::test_state();
    let user = common::bare_user(&state, 7);
    let err = state.checklist.complete_task(user, 424242, DATE).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
