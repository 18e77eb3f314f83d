//! Time sources for the ledger.
//!
//! Transactions are timestamped in UTC; the daily counter rolls over on the local
//! calendar day.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use parking_lot::Mutex;

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day for the daily counter.
    fn today(&self) -> NaiveDate;
}

/// The system clock; days follow the local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock that only moves when told to. Days follow UTC.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }

    fn today(&self) -> NaiveDate {
        self.now.lock().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn manual_clock_advances_across_midnight() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 23, 30, 0).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());

        clock.advance(Duration::hours(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }
}
