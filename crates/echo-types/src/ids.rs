//! Globally unique identifiers used throughout EchoCore.
//!
//! `UserId` uses UUIDv7 for time-ordered lexicographic sorting. `MatchId`
//! is derived deterministically from the unordered user pair plus the
//! pair's matching epoch, so both participants (and any replica) compute
//! the same id for the same match.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Unique identifier for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PairKey
// ---------------------------------------------------------------------------

/// Canonical key for an **unordered** user pair.
///
/// `PairKey::new(a, b) == PairKey::new(b, a)` — the two ids are stored
/// sorted, so the pair indexes identically regardless of swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct PairKey(UserId, UserId);

impl PairKey {
    #[must_use]
    pub fn new(a: UserId, b: UserId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    #[must_use]
    pub fn first(&self) -> UserId {
        self.0
    }

    #[must_use]
    pub fn second(&self) -> UserId {
        self.1
    }

    /// Whether `user` is one of the two members of this pair.
    #[must_use]
    pub fn contains(&self, user: UserId) -> bool {
        self.0 == user || self.1 == user
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pair:{}:{}", self.0, self.1)
    }
}

// ---------------------------------------------------------------------------
// MatchId
// ---------------------------------------------------------------------------

/// Globally unique match identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    /// Deterministic `MatchId` from the unordered pair and its matching epoch.
    ///
    /// There is exactly one match per unordered pair per matching epoch, so
    /// `(pair, epoch)` fully determines the id — any two callers produce the
    /// **exact same** `MatchId` for the same match.
    #[must_use]
    pub fn deterministic(pair: &PairKey, epoch: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"echocore:match_id:v2:");
        hasher.update(pair.first().0.as_bytes());
        hasher.update(pair.second().0.as_bytes());
        hasher.update(epoch.to_le_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
