//! Leaderboard integration tests: ordering, limits, and rank ties.

mod common;

use studyhall::domain::{AppError, EventType};

fn user_with_xp(state: &studyhall::server::AppState, tag: u32, xp: i64) -> i64 {
    let user = common::bare_user(state, tag);
    if xp > 0 {
        state
            .progression
            .award_xp(user, xp, EventType::DailyBonus, None)
            .unwrap();
    }
    user
}

#[test]
fn test_top_users_ordered_by_xp() {
    let state = common::test_state();
    let low = user_with_xp(&state, 1, 100);
    let high = user_with_xp(&state, 2, 500);
    let mid = user_with_xp(&state, 3, 300);

    let top = state.leaderboard.top_users(10).unwrap();
    let ids: Vec<i64> = top.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![high, mid, low]);
    assert_eq!(top[0].xp, 500);
    assert_eq!(top[0].level, 3);
}

#[test]
fn test_top_users_respects_limit() {
    let state = common::test_state();
    for tag in 1..=5 {
        user_with_xp(&state, tag, tag as i64 * 100);
    }
    assert_eq!(state.leaderboard.top_users(3).unwrap().len(), 3);
    assert_eq!(state.leaderboard.top_users(0).unwrap().len(), 0);
}

#[test]
fn test_ties_order_stably_by_id() {
    let state = common::test_state();
    let first = user_with_xp(&state, 1, 200);
    let second = user_with_xp(&state, 2, 200);

    let top = state.leaderboard.top_users(10).unwrap();
    assert_eq!(top[0].id, first);
    assert_eq!(top[1].id, second);
}

#[test]
fn test_rank_counts_strictly_greater_xp() {
    let state = common::test_state();
    let leader = user_with_xp(&state, 1, 500);
    let tied_a = user_with_xp(&state, 2, 300);
    let tied_b = user_with_xp(&state, 3, 300);
    let trailer = user_with_xp(&state, 4, 0);

    assert_eq!(state.leaderboard.rank_of(leader).unwrap(), 1);
    // Tied users share a rank.
    assert_eq!(state.leaderboard.rank_of(tied_a).unwrap(), 2);
    assert_eq!(state.leaderboard.rank_of(tied_b).unwrap(), 2);
    assert_eq!(state.leaderboard.rank_of(trailer).unwrap(), 4);
}

#[test]
fn test_rank_of_missing_user() {
    let state = common::test_state();
    let err = state.leaderboard.rank_of(12345).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
