//! Leaderboards over the local account book

use std::convert::Infallible;
use std::str::FromStr;

use super::accounts::{AccountBook, User};
use crate::consts::RANKING_SIZE;

const DAY_MS: f64 = 86_400_000.0;

/// Which leaderboard tab is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingKind {
    #[default]
    Total,
    /// Logged in today (UTC)
    Daily,
    /// Logged in within the last 7 days
    Weekly,
    /// Logged in within the last 30 days
    Monthly,
}

/// Unknown tab names fall back to the all-time board
impl FromStr for RankingKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "daily" => RankingKind::Daily,
            "weekly" => RankingKind::Weekly,
            "monthly" => RankingKind::Monthly,
            _ => RankingKind::Total,
        })
    }
}

impl RankingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingKind::Total => "total",
            RankingKind::Daily => "daily",
            RankingKind::Weekly => "weekly",
            RankingKind::Monthly => "monthly",
        }
    }

    /// Whether a user last seen at `last_login` belongs on this board
    pub fn includes(&self, last_login: f64, now: f64) -> bool {
        match self {
            RankingKind::Total => true,
            RankingKind::Daily => utc_day(last_login) == utc_day(now),
            RankingKind::Weekly => last_login >= now - 7.0 * DAY_MS,
            RankingKind::Monthly => last_login >= now - 30.0 * DAY_MS,
        }
    }
}

#[inline]
fn utc_day(timestamp: f64) -> i64 {
    (timestamp / DAY_MS).floor() as i64
}

/// Top players for `kind`, most knocks first (ties by name)
pub fn ranking(book: &AccountBook, kind: RankingKind, now: f64) -> Vec<&User> {
    let mut users: Vec<&User> = book
        .users()
        .filter(|u| kind.includes(u.last_login, now))
        .collect();
    users.sort_by(|a, b| {
        b.total_count
            .cmp(&a.total_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    users.truncate(RANKING_SIZE);
    users
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1000.0 * DAY_MS + 12.0 * 3_600_000.0;

    fn book() -> AccountBook {
        let mut book = AccountBook::new();
        let players = [
            ("today", NOW - 3_600_000.0, 5),
            ("yesterday", NOW - DAY_MS, 50),
            ("last_week", NOW - 6.0 * DAY_MS, 30),
            ("last_month", NOW - 20.0 * DAY_MS, 80),
            ("ancient", NOW - 90.0 * DAY_MS, 500),
        ];
        for (name, login, knocks) in players {
            book.login(name, login).unwrap();
            for _ in 0..knocks {
                book.knock();
            }
        }
        book.logout();
        book
    }

    fn names(users: &[&User]) -> Vec<String> {
        users.iter().map(|u| u.name.clone()).collect()
    }

    #[test]
    fn test_total_sorted_by_count() {
        let book = book();
        let board = ranking(&book, RankingKind::Total, NOW);
        assert_eq!(
            names(&board),
            ["ancient", "last_month", "yesterday", "last_week", "today"]
        );
    }

    #[test]
    fn test_windows() {
        let book = book();
        assert_eq!(names(&ranking(&book, RankingKind::Daily, NOW)), ["today"]);
        assert_eq!(
            names(&ranking(&book, RankingKind::Weekly, NOW)),
            ["yesterday", "last_week", "today"]
        );
        assert_eq!(
            names(&ranking(&book, RankingKind::Monthly, NOW)),
            ["last_month", "yesterday", "last_week", "today"]
        );
    }

    #[test]
    fn test_truncated_to_ten_with_name_ties() {
        let mut book = AccountBook::new();
        for i in 0..15 {
            book.login(&format!("p{:02}", i), NOW).unwrap();
        }
        let board = ranking(&book, RankingKind::Total, NOW);
        assert_eq!(board.len(), RANKING_SIZE);
        assert_eq!(board[0].name, "p00");
        assert_eq!(board[9].name, "p09");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Weekly".parse::<RankingKind>(), Ok(RankingKind::Weekly));
        assert_eq!("bogus".parse::<RankingKind>(), Ok(RankingKind::Total));
        assert_eq!(RankingKind::Daily.as_str(), "daily");
    }
}
