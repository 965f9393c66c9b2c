//! Entitlement gate — the single authorization entry point.
//!
//! Every externally triggered action enters through [`EntitlementGate`].
//! The gate composes the quota store, the abuse rate limiter, and the
//! lifecycle engines, and short-circuits on the first denial so a
//! rejected request never mutates downstream state.
//!
//! ## Design Principles
//!
//! - **Fail-closed**: a denial at any stage aborts the whole request
//! - **No bypass**: callers never reach the store or limiter directly
//! - **Explicit time**: the clock is injected, so every transition is
//!   reproducible in tests

use chrono::{DateTime, Utc};
use echo_lifecycle::{MatchBook, ProfileDirectory, tick};
use echo_status::compute_status;
use echo_types::{
    AbuseAction, Clock, EchoError, EchoReport, EngineConfig, EntitlementState, Match,
    MatchCountdown, MatchId, MatchStatus, MeteredAction, Plan, Quota, RemainingQuota, Result,
    SwipeKind, SwipeSnapshot, SystemClock, UserId,
};

use crate::rate_limiter::RateLimiter;
use crate::store::EntitlementStore;

/// Outcome of a granted rewind: the restored swipe plus what is left of
/// today's rewind allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewindReceipt {
    /// The swipe that was undone, back in an unconsumed state.
    pub restored: SwipeSnapshot,
    /// Rewinds left today after this one.
    pub remaining: Quota,
}

/// Authorization facade over the quota store, the rate limiter, and the
/// lifecycle engines.
pub struct EntitlementGate<C: Clock = SystemClock> {
    config: EngineConfig,
    clock: C,
    store: EntitlementStore,
    limiter: RateLimiter,
    book: MatchBook,
    profiles: ProfileDirectory,
}

impl EntitlementGate<SystemClock> {
    /// Build a gate on the system wall clock.
    ///
    /// # Errors
    /// Returns `Configuration` if the config fails validation.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> EntitlementGate<C> {
    /// Build a gate on an explicit clock.
    ///
    /// # Errors
    /// Returns `Configuration` if the config fails validation.
    pub fn with_clock(config: EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let store = EntitlementStore::new(config.plans);
        let book = MatchBook::new(config.match_ttl);
        Ok(Self {
            config,
            clock,
            store,
            limiter: RateLimiter::new(),
            book,
            profiles: ProfileDirectory::new(),
        })
    }

    // ------------------------------------------------------------------
    // Photo freshness
    // ------------------------------------------------------------------

    /// Record a verified photo for `user_id`. Returns the freshness
    /// stamp now in effect.
    pub fn record_photo(&self, user_id: UserId) -> DateTime<Utc> {
        self.profiles.record_photo(user_id, self.clock.now())
    }

    /// Current visibility report for a profile.
    ///
    /// # Errors
    /// `ProfileNotFound` if the user never had a verified photo.
    pub fn echo_status(&self, user_id: UserId) -> Result<EchoReport> {
        let freshness = self
            .profiles
            .freshness(user_id)
            .ok_or(EchoError::ProfileNotFound(user_id))?;
        Ok(compute_status(
            freshness.last_photo_at,
            self.clock.now(),
            &self.config.freshness,
        ))
    }

    // ------------------------------------------------------------------
    // Metered actions
    // ------------------------------------------------------------------

    /// Authorize one swipe of the given kind. `SUPER_LIKE` is metered
    /// as its own action; `LIKE` and `NOPE` draw from the daily swipe
    /// allowance.
    ///
    /// # Errors
    /// `QuotaExhausted` or `PlanInsufficient` per the user's plan.
    pub fn request_swipe(&self, user_id: UserId, kind: SwipeKind) -> Result<RemainingQuota> {
        self.store
            .check_and_consume(user_id, MeteredAction::for_swipe(kind), self.clock.now())
    }

    /// Undo the swipe behind a `PENDING` match.
    ///
    /// Denials are ordered so the caller learns the most actionable
    /// reason first: an unknown match or non-participant is an error
    /// regardless of plan, a closed window beats a missing entitlement,
    /// and only a still-open window consults the quota store. A plan or
    /// quota denial surfaces as `RewindUnavailable`.
    ///
    /// # Errors
    /// - `MatchNotFound`, `NotAParticipant`
    /// - `RewindWindowClosed` if the match is no longer `PENDING`
    /// - `RewindUnavailable` if the plan or quota denies the rewind
    pub fn request_rewind(&self, match_id: MatchId, actor: UserId) -> Result<RewindReceipt> {
        let now = self.clock.now();

        let m = self
            .book
            .get(match_id)
            .ok_or(EchoError::MatchNotFound(match_id))?;
        if !m.is_participant(actor) {
            return Err(EchoError::NotAParticipant(actor));
        }
        if tick(&m, now) != MatchStatus::Pending {
            return Err(EchoError::RewindWindowClosed);
        }

        let grant = self
            .store
            .check_and_consume(actor, MeteredAction::Rewind, now)
            .map_err(|err| match err {
                e @ (EchoError::QuotaExhausted { .. } | EchoError::PlanInsufficient { .. }) => {
                    EchoError::RewindUnavailable {
                        reason: e.to_string(),
                    }
                }
                other => other,
            })?;

        // The match may have left PENDING between the check above and
        // the deletion; the consumed credit is not restored, so surface
        // the failure rather than swallow it.
        let restored = self.book.rewind(match_id, actor, now).inspect_err(|err| {
            tracing::warn!(match_id = %match_id, actor = %actor, %err,
                "rewind denied after entitlement was consumed");
        })?;

        Ok(RewindReceipt {
            restored,
            remaining: grant.remaining,
        })
    }

    /// Authorize one report or block against the fixed-window limiter.
    /// Denied attempts are not counted.
    ///
    /// # Errors
    /// `RateLimited` when the window's allowance is already spent.
    pub fn request_abuse_action(&self, subject: UserId, action: AbuseAction) -> Result<()> {
        let window = self.config.abuse.window_for(action);
        let limit = self.config.abuse.limit_for(action);
        if self
            .limiter
            .allow(subject, action, self.clock.now(), window, limit)
        {
            Ok(())
        } else {
            Err(EchoError::RateLimited {
                limit,
                window_secs: window.num_seconds(),
            })
        }
    }

    // ------------------------------------------------------------------
    // Match lifecycle
    // ------------------------------------------------------------------

    /// Create a match for `(swiper, other)`; `swiper`'s snapshot is
    /// retained for rewind.
    ///
    /// # Errors
    /// `SelfMatchBlocked` or `DuplicateMatch` from the match book.
    pub fn create_match(&self, swiper: UserId, other: UserId, kind: SwipeKind) -> Result<Match> {
        self.book.create(swiper, other, kind, self.clock.now())
    }

    /// Record an interaction inside a match; `Pending -> Active` once
    /// both parties have interacted.
    ///
    /// # Errors
    /// `MatchNotFound`, `MatchExpired`, or `NotAParticipant`.
    pub fn record_interaction(&self, match_id: MatchId, actor: UserId) -> Result<MatchStatus> {
        self.book.record_interaction(match_id, actor, self.clock.now())
    }

    /// Countdown display fields for a match.
    ///
    /// # Errors
    /// `MatchNotFound` if the id is unknown.
    pub fn match_countdown(&self, match_id: MatchId) -> Result<MatchCountdown> {
        self.book.countdown(match_id, self.clock.now())
    }

    /// Persist the `EXPIRED` transition for every overdue `PENDING`
    /// match. Returns the number expired.
    pub fn expire_due_matches(&self) -> usize {
        self.book.expire_due(self.clock.now())
    }

    // ------------------------------------------------------------------
    // Subscription and housekeeping
    // ------------------------------------------------------------------

    /// Apply a subscription event for `user_id`.
    pub fn apply_plan_change(&self, user_id: UserId, plan: Plan) {
        self.store.apply_plan_change(user_id, plan, self.clock.now());
    }

    /// Snapshot of a user's entitlement row, if one exists.
    #[must_use]
    pub fn entitlement_state(&self, user_id: UserId) -> Option<EntitlementState> {
        self.store.state(user_id)
    }

    /// Drop fully elapsed rate-limit windows. Returns the number
    /// collected.
    pub fn prune_rate_windows(&self) -> usize {
        self.limiter.prune(self.clock.now())
    }

    /// The clock every plane behind this gate reads from.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
