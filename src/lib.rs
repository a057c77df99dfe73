//! studyhall - gamified study-tools REST backend
//!
//! Users register with an institutional email, create and review flashcard
//! sets, take quizzes, complete a daily checklist, and earn XP that feeds a
//! global leaderboard. The progression engine owns the XP rules: fixed
//! per-action rewards, a daily cap on per-set awards, and a level derived
//! purely from cumulative XP.

pub mod auth;
pub mod checklist;
pub mod config;
pub mod domain;
pub mod leaderboard;
pub mod progression;
pub mod quiz;
pub mod seed;
pub mod server;
pub mod store;
pub mod time_bucket;

pub use domain::*;
