//! Daily free-chat quota.
//!
//! The counter is keyed by a calendar-day label; a stored record whose label differs
//! from today's reads as a fresh zero count.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Chat messages per calendar day that are not charged against the balance.
pub const FREE_DAILY_CHAT_LIMIT: u32 = 100;

/// Format a calendar day the way the counter stores it, e.g. `Mon Oct 19 2026`.
#[must_use]
pub fn day_label(day: NaiveDate) -> String {
    day.format("%a %b %d %Y").to_string()
}

/// The per-user daily chat counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Messages sent on `date`.
    pub count: u32,

    /// Calendar-day label the count belongs to.
    pub date: String,
}

impl DailyCount {
    /// A zero count for the given day.
    #[must_use]
    pub fn fresh(day: NaiveDate) -> Self {
        Self {
            count: 0,
            date: day_label(day),
        }
    }

    /// Whether this record belongs to the given day.
    #[must_use]
    pub fn is_for(&self, day: NaiveDate) -> bool {
        self.date == day_label(day)
    }

    /// Messages left in the free quota.
    #[must_use]
    pub const fn remaining(&self, limit: u32) -> u32 {
        limit.saturating_sub(self.count)
    }

    /// Whether the free quota is used up.
    #[must_use]
    pub const fn exhausted(&self, limit: u32) -> bool {
        self.count >= limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_label_matches_stored_format() {
        assert_eq!(day_label(day(2026, 10, 19)), "Mon Oct 19 2026");
        assert_eq!(day_label(day(2026, 1, 5)), "Mon Jan 05 2026");
    }

    #[test]
    fn fresh_count_is_zero_for_day() {
        let count = DailyCount::fresh(day(2026, 10, 19));
        assert_eq!(count.count, 0);
        assert!(count.is_for(day(2026, 10, 19)));
        assert!(!count.is_for(day(2026, 10, 20)));
    }

    #[test]
    fn remaining_saturates() {
        let mut count = DailyCount::fresh(day(2026, 10, 19));
        count.count = 40;
        assert_eq!(count.remaining(FREE_DAILY_CHAT_LIMIT), 60);
        assert!(!count.exhausted(FREE_DAILY_CHAT_LIMIT));

        count.count = 130;
        assert_eq!(count.remaining(FREE_DAILY_CHAT_LIMIT), 0);
        assert!(count.exhausted(FREE_DAILY_CHAT_LIMIT));
    }

    #[test]
    fn parses_stored_record() {
        let count: DailyCount =
            serde_json::from_str(r#"{"count":7,"date":"Sun Oct 18 2026"}"#).unwrap();
        assert_eq!(count.count, 7);
        assert!(count.is_for(day(2026, 10, 18)));
    }
}
