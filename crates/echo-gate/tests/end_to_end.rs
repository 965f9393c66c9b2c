//! End-to-end integration tests across all engine planes.
//!
//! These tests exercise full user journeys:
//! photo freshness -> swipe metering -> match lifecycle -> rewind/abuse
//!
//! They verify that the gate composes the planes correctly in realistic
//! scenarios: visibility decay, pending-to-active activation, TTL expiry
//! and pair re-matching, rewind entitlement ordering, plan changes, and
//! abuse rate limiting.

use chrono::{Duration, TimeZone, Utc};
use echo_gate::EntitlementGate;
use echo_types::*;

/// Helper: a gate on a hand-advanced clock plus two standing users.
struct Scenario {
    gate: EntitlementGate<ManualClock>,
    alice: UserId,
    bob: UserId,
}

impl Scenario {
    fn new() -> Self {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let gate =
            EntitlementGate::with_clock(EngineConfig::default(), ManualClock::starting_at(t0))
                .expect("default config must validate");
        Self {
            gate,
            alice: UserId::new(),
            bob: UserId::new(),
        }
    }

    fn advance(&self, by: Duration) {
        // The clock is shared by every plane behind the gate.
        self.clock().advance(by);
    }

    fn clock(&self) -> &ManualClock {
        self.gate.clock()
    }

    /// Swipe-then-match: meter one swipe for `swiper` and create the
    /// pending match it completes.
    fn swipe_into_match(&self, swiper: UserId, other: UserId, kind: SwipeKind) -> Match {
        self.gate
            .request_swipe(swiper, kind)
            .expect("swipe must be within quota");
        self.gate
            .create_match(swiper, other, kind)
            .expect("match creation must succeed")
    }
}

// =============================================================================
// Test: Photo freshness decays through every state and recovers
// =============================================================================
#[test]
fn e2e_echo_status_full_decay_cycle() {
    let s = Scenario::new();
    s.gate.record_photo(s.alice);

    let report = s.gate.echo_status(s.alice).unwrap();
    assert_eq!(report.status, EchoStatus::Active);
    assert_eq!(report.hours_left, 168);
    assert_eq!(report.days_left, 7);

    // Day 5: still active, two full days past the warning line.
    s.advance(Duration::days(5) - Duration::hours(1));
    assert_eq!(s.gate.echo_status(s.alice).unwrap().status, EchoStatus::Active);

    // Exactly 48h remaining: the warning boundary is inclusive.
    s.advance(Duration::hours(1));
    let report = s.gate.echo_status(s.alice).unwrap();
    assert_eq!(report.status, EchoStatus::Expiring);
    assert_eq!(report.hours_left, 48);
    assert_eq!(report.days_left, 2);

    // Exactly 7 days: silence, zeroed countdowns.
    s.advance(Duration::days(2));
    let report = s.gate.echo_status(s.alice).unwrap();
    assert_eq!(report.status, EchoStatus::Silence);
    assert_eq!(report.hours_left, 0);
    assert_eq!(report.days_left, 0);

    // A fresh photo restores full visibility immediately.
    s.gate.record_photo(s.alice);
    let report = s.gate.echo_status(s.alice).unwrap();
    assert_eq!(report.status, EchoStatus::Active);
    assert_eq!(report.days_left, 7);
}

// =============================================================================
// Test: Swipe -> pending match -> mutual interaction -> active, TTL exempt
// =============================================================================
#[test]
fn e2e_match_activation_escapes_ttl() {
    let s = Scenario::new();
    let m = s.swipe_into_match(s.alice, s.bob, SwipeKind::Like);

    let countdown = s.gate.match_countdown(m.id).unwrap();
    assert_eq!(countdown.status, MatchStatus::Pending);
    assert_eq!(countdown.hours_left, 48);

    s.advance(Duration::hours(20));
    assert_eq!(
        s.gate.record_interaction(m.id, s.alice).unwrap(),
        MatchStatus::Pending
    );
    assert_eq!(
        s.gate.record_interaction(m.id, s.bob).unwrap(),
        MatchStatus::Active
    );

    // Years later the activated match is still alive and uncounted.
    s.advance(Duration::days(1000));
    let countdown = s.gate.match_countdown(m.id).unwrap();
    assert_eq!(countdown.status, MatchStatus::Active);
    assert_eq!(countdown.hours_left, 0);
    assert_eq!(s.gate.expire_due_matches(), 0);
}

// =============================================================================
// Test: One-sided interaction does not save a pending match
// =============================================================================
#[test]
fn e2e_one_sided_interaction_still_expires() {
    let s = Scenario::new();
    let m = s.swipe_into_match(s.alice, s.bob, SwipeKind::Like);
    s.gate.record_interaction(m.id, s.alice).unwrap();

    s.advance(Duration::hours(48));
    let err = s.gate.record_interaction(m.id, s.bob).unwrap_err();
    assert!(matches!(err, EchoError::MatchExpired(id) if id == m.id));
    assert_eq!(
        s.gate.match_countdown(m.id).unwrap().status,
        MatchStatus::Expired
    );
}

// =============================================================================
// Test: Duplicate pair blocked while live, re-matchable after expiry
// =============================================================================
#[test]
fn e2e_pair_rematches_after_expiry() {
    let s = Scenario::new();
    let first = s.swipe_into_match(s.alice, s.bob, SwipeKind::Like);

    // Same pair, either direction, is a duplicate while the match lives.
    let err = s.gate.create_match(s.bob, s.alice, SwipeKind::Like).unwrap_err();
    assert!(matches!(err, EchoError::DuplicateMatch(id) if id == first.id));

    s.advance(Duration::hours(48));
    let second = s.gate.create_match(s.bob, s.alice, SwipeKind::Like).unwrap();
    assert_ne!(second.id, first.id, "new epoch must mint a new id");
    assert_eq!(
        s.gate.match_countdown(second.id).unwrap().status,
        MatchStatus::Pending
    );
}

// =============================================================================
// Test: Rewind receipt restores the swipe; the pair can re-match at once
// =============================================================================
#[test]
fn e2e_rewind_restores_swipe_and_frees_pair() {
    let s = Scenario::new();
    s.gate.apply_plan_change(s.alice, Plan::Plus);
    let m = s.swipe_into_match(s.alice, s.bob, SwipeKind::Like);
    let swiped_at = m.last_swipe.swiped_at;

    let receipt = s.gate.request_rewind(m.id, s.alice).unwrap();
    assert_eq!(receipt.restored.swiper, s.alice);
    assert_eq!(receipt.restored.kind, SwipeKind::Like);
    assert_eq!(receipt.restored.swiped_at, swiped_at);
    assert_eq!(receipt.remaining, Quota::Limited(0));

    // The match is gone and the pair slot is free again.
    assert!(matches!(
        s.gate.match_countdown(m.id).unwrap_err(),
        EchoError::MatchNotFound(_)
    ));
    let again = s.gate.create_match(s.alice, s.bob, SwipeKind::Like).unwrap();
    assert_ne!(again.id, m.id);
}

// =============================================================================
// Test: Rewind denial ordering — window beats entitlement
// =============================================================================
#[test]
fn e2e_rewind_denial_ordering() {
    let s = Scenario::new();
    let pending = s.swipe_into_match(s.alice, s.bob, SwipeKind::Like);

    // FREE plan, open window: the entitlement is what denies.
    assert!(matches!(
        s.gate.request_rewind(pending.id, s.alice).unwrap_err(),
        EchoError::RewindUnavailable { .. }
    ));

    // Activated match: the window denies even for PLATINUM.
    let active = s.swipe_into_match(s.alice, UserId::new(), SwipeKind::Like);
    let other = active.user_b;
    s.gate.record_interaction(active.id, s.alice).unwrap();
    s.gate.record_interaction(active.id, other).unwrap();
    s.gate.apply_plan_change(s.alice, Plan::Platinum);
    assert!(matches!(
        s.gate.request_rewind(active.id, s.alice).unwrap_err(),
        EchoError::RewindWindowClosed
    ));

    // The pending match survived both denials and PLATINUM rewinds it.
    let receipt = s.gate.request_rewind(pending.id, s.alice).unwrap();
    assert_eq!(receipt.remaining, Quota::Unlimited);
}

// =============================================================================
// Test: FREE daily swipe budget exhausts, lazily refills at midnight
// =============================================================================
#[test]
fn e2e_free_swipes_exhaust_and_refill() {
    let s = Scenario::new();
    for _ in 0..50 {
        s.gate.request_swipe(s.alice, SwipeKind::Like).unwrap();
    }
    let err = s.gate.request_swipe(s.alice, SwipeKind::Nope).unwrap_err();
    assert!(matches!(
        err,
        EchoError::QuotaExhausted {
            action: MeteredAction::Swipe,
            limit: 50,
        }
    ));

    // 12:00 -> past midnight: the next check performs the daily reset.
    s.advance(Duration::hours(12) + Duration::seconds(1));
    let grant = s.gate.request_swipe(s.alice, SwipeKind::Like).unwrap();
    assert_eq!(grant.remaining, Quota::Limited(49));
}

// =============================================================================
// Test: Plan ladder governs super-likes
// =============================================================================
#[test]
fn e2e_super_like_plan_ladder() {
    let s = Scenario::new();

    // FREE: not offered at all.
    assert!(matches!(
        s.gate.request_swipe(s.alice, SwipeKind::SuperLike).unwrap_err(),
        EchoError::PlanInsufficient {
            action: MeteredAction::SuperLike,
            plan: Plan::Free,
        }
    ));

    // GOLD: five per day, then exhausted.
    s.gate.apply_plan_change(s.alice, Plan::Gold);
    for left in (0..5).rev() {
        let grant = s.gate.request_swipe(s.alice, SwipeKind::SuperLike).unwrap();
        assert_eq!(grant.remaining, Quota::Limited(left));
    }
    assert!(matches!(
        s.gate.request_swipe(s.alice, SwipeKind::SuperLike).unwrap_err(),
        EchoError::QuotaExhausted { limit: 5, .. }
    ));

    // PLATINUM mid-day: unlimited from the next request on.
    s.gate.apply_plan_change(s.alice, Plan::Platinum);
    let grant = s.gate.request_swipe(s.alice, SwipeKind::SuperLike).unwrap();
    assert_eq!(grant.remaining, Quota::Unlimited);
}

// =============================================================================
// Test: Reports rate-limit per window; denied attempts are not counted
// =============================================================================
#[test]
fn e2e_report_rate_limit_window() {
    let s = Scenario::new();
    for _ in 0..10 {
        s.gate.request_abuse_action(s.alice, AbuseAction::Report).unwrap();
    }
    // Denials do not extend or fill the window.
    for _ in 0..100 {
        assert!(matches!(
            s.gate
                .request_abuse_action(s.alice, AbuseAction::Report)
                .unwrap_err(),
            EchoError::RateLimited {
                limit: 10,
                window_secs: 3600,
            }
        ));
    }
    // Blocks are budgeted independently, and other users are untouched.
    s.gate.request_abuse_action(s.alice, AbuseAction::Block).unwrap();
    s.gate.request_abuse_action(s.bob, AbuseAction::Report).unwrap();

    // A fresh window restores the full allowance.
    s.advance(Duration::seconds(3600));
    for _ in 0..10 {
        s.gate.request_abuse_action(s.alice, AbuseAction::Report).unwrap();
    }
}

// =============================================================================
// Test: Denials never mutate lifecycle state
// =============================================================================
#[test]
fn e2e_denied_requests_leave_no_trace() {
    let s = Scenario::new();
    let m = s.swipe_into_match(s.alice, s.bob, SwipeKind::Like);
    let before = s.gate.entitlement_state(s.alice).unwrap();

    // FREE rewind denial: match intact, no rewind consumed.
    assert!(s.gate.request_rewind(m.id, s.alice).is_err());
    assert_eq!(
        s.gate.match_countdown(m.id).unwrap().status,
        MatchStatus::Pending
    );
    let after = s.gate.entitlement_state(s.alice).unwrap();
    assert_eq!(after.rewinds_remaining, before.rewinds_remaining);
    assert_eq!(after.daily_swipes_used, before.daily_swipes_used);
}

// =============================================================================
// Test: Concurrent swipes across the gate never exceed the daily limit
// =============================================================================
#[test]
fn e2e_concurrent_swipes_respect_limit() {
    use std::sync::atomic::{AtomicU32, Ordering};

    let s = Scenario::new();
    let user = s.alice;
    let successes = AtomicU32::new(0);

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..10 {
                    if s.gate.request_swipe(user, SwipeKind::Like).is_ok() {
                        successes.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(
        successes.load(Ordering::Relaxed),
        50,
        "80 racing swipes against the FREE limit must grant exactly 50"
    );
}
