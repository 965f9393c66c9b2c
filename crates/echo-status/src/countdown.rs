//! Ceiling-division countdown math shared by the freshness and match
//! engines. Both feed the timer-wave display, which rounds remaining
//! time **up** — a deadline 1 second away still shows one hour left.

use chrono::{DateTime, Utc};

const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_DAY: i64 = 86_400;

/// Whole hours until `deadline`, rounded up, floored at 0.
#[must_use]
pub fn hours_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    ceil_div_secs(deadline, now, SECS_PER_HOUR)
}

/// Whole days until `deadline`, rounded up, floored at 0.
#[must_use]
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    ceil_div_secs(deadline, now, SECS_PER_DAY)
}

fn ceil_div_secs(deadline: DateTime<Utc>, now: DateTime<Utc>, unit: i64) -> u32 {
    let secs = (deadline - now).num_seconds();
    if secs <= 0 {
        0
    } else {
        u32::try_from((secs + unit - 1) / unit).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn exact_hours_are_not_rounded() {
        let now = t0();
        assert_eq!(hours_until(now + Duration::hours(48), now), 48);
    }

    #[test]
    fn partial_hour_rounds_up() {
        let now = t0();
        assert_eq!(hours_until(now + Duration::seconds(1), now), 1);
        assert_eq!(
            hours_until(now + Duration::hours(47) + Duration::minutes(1), now),
            48
        );
    }

    #[test]
    fn past_deadline_floors_at_zero() {
        let now = t0();
        assert_eq!(hours_until(now - Duration::hours(5), now), 0);
        assert_eq!(days_until(now - Duration::seconds(1), now), 0);
        assert_eq!(hours_until(now, now), 0);
    }

    #[test]
    fn days_round_up() {
        let now = t0();
        assert_eq!(days_until(now + Duration::days(6), now), 6);
        assert_eq!(days_until(now + Duration::days(5) + Duration::hours(1), now), 6);
    }
}
