//! Generic fixed-window rate limiter for abuse-sensitive actions.
//!
//! One window per `(subject, action)`. A window that has outlived its
//! size resets before the attempt is evaluated; a denied attempt is NOT
//! counted, so being refused never eats into a future window. Window
//! size and limit are supplied per call from configuration.
//!
//! Windows are ephemeral: [`RateLimiter::prune`] garbage-collects every
//! window whose span has fully elapsed.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use echo_types::{AbuseAction, UserId};

#[derive(Debug, Clone, Copy)]
struct FixedWindow {
    window_start: DateTime<Utc>,
    window_size: Duration,
    count: u32,
}

/// Sharded fixed-window limiter. Atomic per `(subject, action)`; distinct
/// subjects never contend.
#[derive(Default)]
pub struct RateLimiter {
    windows: DashMap<(UserId, AbuseAction), FixedWindow>,
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            windows: DashMap::new(),
        }
    }

    /// Evaluate one attempt. Returns `true` and counts the attempt iff
    /// the post-increment count stays within `limit`.
    pub fn allow(
        &self,
        subject: UserId,
        action: AbuseAction,
        now: DateTime<Utc>,
        window_size: Duration,
        limit: u32,
    ) -> bool {
        let mut window = self
            .windows
            .entry((subject, action))
            .or_insert(FixedWindow {
                window_start: now,
                window_size,
                count: 0,
            });
        if now - window.window_start >= window.window_size {
            window.window_start = now;
            window.count = 0;
        }
        // Config may have been retuned since the window opened.
        window.window_size = window_size;

        if window.count < limit {
            window.count += 1;
            true
        } else {
            tracing::debug!(subject = %subject, %action, limit, "rate limited");
            false
        }
    }

    /// Drop every window whose span has fully elapsed. Returns the number
    /// of windows collected.
    pub fn prune(&self, now: DateTime<Utc>) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| w.window_start + w.window_size >= now);
        before - self.windows.len()
    }

    /// Number of live windows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn window() -> Duration {
        Duration::seconds(60)
    }

    #[test]
    fn first_attempts_within_limit_pass() {
        let limiter = RateLimiter::new();
        let user = UserId::new();
        for _ in 0..3 {
            assert!(limiter.allow(user, AbuseAction::Report, t0(), window(), 3));
        }
        assert!(!limiter.allow(user, AbuseAction::Report, t0(), window(), 3));
    }

    #[test]
    fn window_elapse_resets_count() {
        let limiter = RateLimiter::new();
        let user = UserId::new();
        for _ in 0..3 {
            assert!(limiter.allow(user, AbuseAction::Report, t0(), window(), 3));
        }
        assert!(!limiter.allow(user, AbuseAction::Report, t0(), window(), 3));

        let later = t0() + Duration::seconds(60);
        assert!(
            limiter.allow(user, AbuseAction::Report, later, window(), 3),
            "a fresh window must admit again"
        );
    }

    #[test]
    fn denied_attempts_are_not_counted() {
        let limiter = RateLimiter::new();
        let user = UserId::new();
        assert!(limiter.allow(user, AbuseAction::Block, t0(), window(), 1));
        // Hammer the limiter while denied; none of these may count.
        for i in 1..10 {
            assert!(!limiter.allow(
                user,
                AbuseAction::Block,
                t0() + Duration::seconds(i),
                window(),
                1
            ));
        }
        // New window: exactly one grant available, proving the denials
        // never accrued.
        let later = t0() + Duration::seconds(61);
        assert!(limiter.allow(user, AbuseAction::Block, later, window(), 1));
        assert!(!limiter.allow(user, AbuseAction::Block, later, window(), 1));
    }

    #[test]
    fn actions_have_independent_windows() {
        let limiter = RateLimiter::new();
        let user = UserId::new();
        assert!(limiter.allow(user, AbuseAction::Report, t0(), window(), 1));
        assert!(!limiter.allow(user, AbuseAction::Report, t0(), window(), 1));
        // Blocking is a separate window.
        assert!(limiter.allow(user, AbuseAction::Block, t0(), window(), 1));
    }

    #[test]
    fn subjects_have_independent_windows() {
        let limiter = RateLimiter::new();
        let a = UserId::new();
        let b = UserId::new();
        assert!(limiter.allow(a, AbuseAction::Report, t0(), window(), 1));
        assert!(!limiter.allow(a, AbuseAction::Report, t0(), window(), 1));
        assert!(limiter.allow(b, AbuseAction::Report, t0(), window(), 1));
    }

    #[test]
    fn prune_collects_elapsed_windows() {
        let limiter = RateLimiter::new();
        let a = UserId::new();
        let b = UserId::new();
        limiter.allow(a, AbuseAction::Report, t0(), window(), 3);
        limiter.allow(b, AbuseAction::Report, t0() + Duration::seconds(50), window(), 3);
        assert_eq!(limiter.len(), 2);

        let collected = limiter.prune(t0() + Duration::seconds(61));
        assert_eq!(collected, 1, "only the fully elapsed window goes");
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn concurrent_attempts_never_exceed_limit() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let limiter = RateLimiter::new();
        let user = UserId::new();
        let allowed = AtomicU32::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..4 {
                        if limiter.allow(user, AbuseAction::Report, t0(), window(), 10) {
                            allowed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(allowed.load(Ordering::Relaxed), 10);
    }
}
