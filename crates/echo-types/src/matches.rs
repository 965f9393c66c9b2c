//! Match lifecycle types.
//!
//! A match is created when two users' swipes cross. It starts `PENDING`
//! with a fixed TTL; once both parties have exchanged at least one
//! interaction it becomes `ACTIVE` and is exempt from the TTL. Status
//! moves monotonically forward — the only way "back" is a rewind, which
//! deletes the match entirely.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{EchoError, MatchId, PairKey, Result, SwipeKind, UserId};

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Created, no interaction from either party yet. Subject to the TTL.
    Pending,
    /// Both parties have interacted — the TTL no longer applies.
    Active,
    /// TTL elapsed without mutual interaction. Terminal.
    Expired,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Expired => write!(f, "EXPIRED"),
        }
    }
}

/// The most recent swipe that produced the match, retained so a rewind can
/// restore it to the swiper's unconsumed history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeSnapshot {
    pub swiper: UserId,
    pub kind: SwipeKind,
    pub swiped_at: DateTime<Utc>,
}

/// Core match struct. `expires_at` is immutable once set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub user_a: UserId,
    pub user_b: UserId,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// The swipe that completed the match (for rewind).
    pub last_swipe: SwipeSnapshot,
    /// Whether each party has interacted since creation.
    pub a_interacted: bool,
    pub b_interacted: bool,
}

impl Match {
    /// Create a fresh `PENDING` match. `swiper` is the party whose swipe
    /// completed the match; `expires_at = created_at + ttl`.
    #[must_use]
    pub fn new(
        id: MatchId,
        user_a: UserId,
        user_b: UserId,
        swiper: UserId,
        kind: SwipeKind,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id,
            user_a,
            user_b,
            status: MatchStatus::Pending,
            created_at,
            expires_at: created_at + ttl,
            last_swipe: SwipeSnapshot {
                swiper,
                kind,
                swiped_at: created_at,
            },
            a_interacted: false,
            b_interacted: false,
        }
    }

    #[must_use]
    pub fn pair(&self) -> PairKey {
        PairKey::new(self.user_a, self.user_b)
    }

    #[must_use]
    pub fn is_participant(&self, user: UserId) -> bool {
        self.user_a == user || self.user_b == user
    }

    /// Record an interaction by `actor`. Returns the resulting status;
    /// transitions `Pending -> Active` once both parties have interacted.
    ///
    /// # Errors
    /// `NotAParticipant` if `actor` is not a member of the match.
    pub fn record_interaction(&mut self, actor: UserId) -> Result<MatchStatus> {
        if !self.is_participant(actor) {
            return Err(EchoError::NotAParticipant(actor));
        }
        if actor == self.user_a {
            self.a_interacted = true;
        } else {
            self.b_interacted = true;
        }
        if self.status == MatchStatus::Pending && self.a_interacted && self.b_interacted {
            self.status = MatchStatus::Active;
        }
        Ok(self.status)
    }
}

/// Countdown fields handed to callers of `GetMatchCountdown`.
/// `hours_left` is zero for `ACTIVE` (TTL-exempt) and `EXPIRED` matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCountdown {
    pub status: MatchStatus,
    pub hours_left: u32,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Match {
    pub fn dummy_pending(created_at: DateTime<Utc>) -> Self {
        let user_a = UserId::new();
        let user_b = UserId::new();
        let pair = PairKey::new(user_a, user_b);
        Self::new(
            MatchId::deterministic(&pair, 0),
            user_a,
            user_b,
            user_a,
            SwipeKind::Like,
            created_at,
            Duration::hours(crate::constants::MATCH_TTL_HOURS),
        )
    }
}
