//! Fixed XP reward policy
//!
//! Amounts are deliberately not configurable; they are part of the game
//! balance, not deployment config.

/// Distinct sets per day that earn full XP for a given event type. Every
/// sourced award past this (and every repeat) is halved.
pub const DAILY_FULL_XP_SETS: i64 = 5;

/// XP for creating any study set.
pub const SET_CREATED: i64 = 100;

/// XP for completing all daily checklist tasks.
pub const DAILY_BONUS: i64 = 100;

/// XP per flashcard in a review session.
pub const PER_CARD: i64 = 5;

/// Ceiling on a single review session's XP.
pub const REVIEW_SESSION_CAP: i64 = 50;

/// Quiz XP is all-or-nothing: a perfect score earns 100, anything less
/// earns 0 (the completion is still recorded in the ledger).
pub fn xp_for_quiz(score: f64) -> i64 {
    if score >= 100.0 {
        100
    } else {
        0
    }
}

/// 5 XP per card reviewed, capped at 50 per session.
pub fn xp_for_review(cards_reviewed: i64) -> i64 {
    cards_reviewed
        .max(0)
        .saturating_mul(PER_CARD)
        .min(REVIEW_SESSION_CAP)
}

/// Level is a pure function of cumulative XP: `floor(sqrt(xp / 100)) + 1`.
/// Level 1 at 0 XP, level 2 at 100, level 3 at 400.
pub fn level_for_xp(xp: i64) -> i64 {
    let xp = xp.max(0) as f64;
    (xp / 100.0).sqrt().floor() as i64 + 1
}
