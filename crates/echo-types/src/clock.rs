//! Clock abstraction.
//!
//! Engines take explicit timestamps or a [`Clock`] so every time-based
//! transition is deterministic in tests. Production code injects
//! [`SystemClock`]; tests use `ManualClock` (behind the `test-helpers`
//! feature) and advance it by hand.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};

/// Supplies the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Midnight UTC of the day after `now` — the shared daily-reset boundary
/// for all lazily refilled counters.
#[must_use]
pub fn start_of_next_day(now: DateTime<Utc>) -> DateTime<Utc> {
    let next = now
        .date_naive()
        .checked_add_days(chrono::Days::new(1))
        .expect("date within chrono range");
    Utc.from_utc_datetime(&next.and_time(NaiveTime::MIN))
}

/// Deterministic test clock: starts at a fixed instant, advanced by hand.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl ManualClock {
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap() = to;
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn next_day_boundary_is_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let reset = start_of_next_day(now);
        assert_eq!(reset, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn next_day_from_just_before_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();
        let reset = start_of_next_day(now);
        assert_eq!(reset, Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
    }

    #[test]
    fn next_day_crosses_month_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        let reset = start_of_next_day(now);
        assert_eq!(reset, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::starting_at(start);
        assert_eq!(clock.now(), start);
        clock.advance(Duration::hours(2));
        assert_eq!(clock.now(), start + Duration::hours(2));
    }

    #[test]
    fn system_clock_is_monotone_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
