//! Match registry — one match per unordered pair per matching epoch.
//!
//! The book enforces pair uniqueness at creation: while an unexpired match
//! for a pair exists, a second create fails with `DuplicateMatch`. Once
//! that match expires or is rewound away, the pair's matching epoch
//! advances and a fresh match may be created.
//!
//! Status only moves forward. `tick` is a pure recompute and never writes;
//! [`MatchBook::expire_due`] is the optional sweep that persists overdue
//! transitions in bulk.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use echo_status::hours_until;
use echo_types::{
    EchoError, Match, MatchCountdown, MatchId, MatchStatus, MatchTtlConfig, PairKey, Result,
    SwipeKind, SwipeSnapshot, UserId,
};

/// Pure status recompute for a single match.
///
/// A `PENDING` match past its `expires_at` reads as `EXPIRED` (boundary
/// inclusive on the expiry side). `ACTIVE` matches are exempt from the
/// TTL — the countdown only governs unconsummated matches, so an ongoing
/// conversation never silently expires.
#[must_use]
pub fn tick(m: &Match, now: DateTime<Utc>) -> MatchStatus {
    match m.status {
        MatchStatus::Pending if now >= m.expires_at => MatchStatus::Expired,
        status => status,
    }
}

/// Tracks which matching epoch a pair is on and which match represents it.
#[derive(Debug, Clone, Copy)]
struct PairSlot {
    epoch: u64,
    match_id: MatchId,
}

/// The match registry. Sharded per key — concurrent handlers touching
/// different matches or pairs never contend.
pub struct MatchBook {
    matches: DashMap<MatchId, Match>,
    by_pair: DashMap<PairKey, PairSlot>,
    config: MatchTtlConfig,
}

impl MatchBook {
    #[must_use]
    pub fn new(config: MatchTtlConfig) -> Self {
        Self {
            matches: DashMap::new(),
            by_pair: DashMap::new(),
            config,
        }
    }

    /// Create a match for `(swiper, other)`. `swiper` is the party whose
    /// swipe completed the match; its snapshot is retained for rewind.
    ///
    /// # Errors
    /// - `SelfMatchBlocked` if both sides are the same user
    /// - `DuplicateMatch` if an unexpired match for the pair exists
    pub fn create(
        &self,
        swiper: UserId,
        other: UserId,
        kind: SwipeKind,
        now: DateTime<Utc>,
    ) -> Result<Match> {
        if swiper == other {
            return Err(EchoError::SelfMatchBlocked);
        }
        let pair = PairKey::new(swiper, other);
        match self.by_pair.entry(pair) {
            Entry::Occupied(mut slot) => {
                let prior = *slot.get();
                let live = self
                    .matches
                    .get(&prior.match_id)
                    .is_some_and(|m| tick(&m, now) != MatchStatus::Expired);
                if live {
                    return Err(EchoError::DuplicateMatch(prior.match_id));
                }
                // Prior epoch is over — a new match may represent the pair.
                self.matches.remove(&prior.match_id);
                let epoch = prior.epoch + 1;
                let m = self.insert_match(pair, swiper, other, kind, now, epoch);
                slot.insert(PairSlot {
                    epoch,
                    match_id: m.id,
                });
                Ok(m)
            }
            Entry::Vacant(slot) => {
                let m = self.insert_match(pair, swiper, other, kind, now, 0);
                slot.insert(PairSlot {
                    epoch: 0,
                    match_id: m.id,
                });
                Ok(m)
            }
        }
    }

    fn insert_match(
        &self,
        pair: PairKey,
        swiper: UserId,
        other: UserId,
        kind: SwipeKind,
        now: DateTime<Utc>,
        epoch: u64,
    ) -> Match {
        let id = MatchId::deterministic(&pair, epoch);
        let m = Match::new(id, swiper, other, swiper, kind, now, self.config.ttl());
        tracing::debug!(match_id = %id, %pair, epoch, "match created");
        self.matches.insert(id, m.clone());
        m
    }

    /// Snapshot of a match by id.
    #[must_use]
    pub fn get(&self, id: MatchId) -> Option<Match> {
        self.matches.get(&id).map(|m| m.clone())
    }

    /// Record an interaction by `actor`; `Pending -> Active` once both
    /// parties have interacted.
    ///
    /// # Errors
    /// - `MatchNotFound` if the id is unknown
    /// - `MatchExpired` if the TTL elapsed first (the transition is persisted)
    /// - `NotAParticipant` if `actor` is not a member
    pub fn record_interaction(
        &self,
        id: MatchId,
        actor: UserId,
        now: DateTime<Utc>,
    ) -> Result<MatchStatus> {
        let mut m = self
            .matches
            .get_mut(&id)
            .ok_or(EchoError::MatchNotFound(id))?;
        if tick(&m, now) == MatchStatus::Expired {
            m.status = MatchStatus::Expired;
            return Err(EchoError::MatchExpired(id));
        }
        let status = m.record_interaction(actor)?;
        if status == MatchStatus::Active {
            tracing::info!(match_id = %id, "match activated");
        }
        Ok(status)
    }

    /// Countdown display fields for a match. `hours_left` is
    /// `ceil((expires_at - now) / 1h)` for `PENDING`, zero otherwise.
    ///
    /// # Errors
    /// `MatchNotFound` if the id is unknown.
    pub fn countdown(&self, id: MatchId, now: DateTime<Utc>) -> Result<MatchCountdown> {
        let m = self.matches.get(&id).ok_or(EchoError::MatchNotFound(id))?;
        let status = tick(&m, now);
        let hours_left = match status {
            MatchStatus::Pending => hours_until(m.expires_at, now),
            MatchStatus::Active | MatchStatus::Expired => 0,
        };
        Ok(MatchCountdown { status, hours_left })
    }

    /// Undo the swipe that produced a `PENDING` match: deletes the match
    /// and returns the snapshot so the caller can restore the swipe to an
    /// unconsumed state. Entitlement is the gate's concern — this method
    /// only enforces the lifecycle window.
    ///
    /// # Errors
    /// - `MatchNotFound` if the id is unknown
    /// - `NotAParticipant` if `actor` is not a member
    /// - `RewindWindowClosed` if the match is no longer `PENDING`
    pub fn rewind(&self, id: MatchId, actor: UserId, now: DateTime<Utc>) -> Result<SwipeSnapshot> {
        {
            let m = self.matches.get(&id).ok_or(EchoError::MatchNotFound(id))?;
            if !m.is_participant(actor) {
                return Err(EchoError::NotAParticipant(actor));
            }
            if tick(&m, now) != MatchStatus::Pending {
                return Err(EchoError::RewindWindowClosed);
            }
        }
        // Re-check under the removal in case the match activated between
        // the guard above and here. The pair slot stays so the epoch
        // counter survives the deletion.
        let removed = self
            .matches
            .remove_if(&id, |_, m| tick(m, now) == MatchStatus::Pending);
        match removed {
            Some((_, m)) => {
                tracing::info!(match_id = %id, swiper = %m.last_swipe.swiper, "match rewound");
                Ok(m.last_swipe)
            }
            None if self.matches.contains_key(&id) => Err(EchoError::RewindWindowClosed),
            None => Err(EchoError::MatchNotFound(id)),
        }
    }

    /// Persist the `EXPIRED` transition for every overdue `PENDING`
    /// match. Returns the number of matches expired.
    pub fn expire_due(&self, now: DateTime<Utc>) -> usize {
        let mut expired = 0;
        for mut entry in self.matches.iter_mut() {
            if entry.status == MatchStatus::Pending && now >= entry.expires_at {
                entry.status = MatchStatus::Expired;
                expired += 1;
            }
        }
        if expired > 0 {
            tracing::debug!(expired, "expired overdue matches");
        }
        expired
    }

    /// Number of matches currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
