//! Wooden fish clicker
//!
//! Knock the fish, level up every ten knocks, compare counts on local
//! leaderboards.

pub mod accounts;
pub mod ranking;

pub use accounts::{AccountBook, User, level_for};
pub use ranking::{RankingKind, ranking};
