//! Subscription plans, quota sentinels, and action taxonomies.
//!
//! "Unlimited" is a dedicated [`Quota`] variant, never a large integer —
//! all quota arithmetic stays total and there are no overflow or refill
//! edge cases for unmetered tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Subscription tier. Plan changes arrive as external events and take
/// effect on the next quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Plan {
    Free,
    Plus,
    Gold,
    Platinum,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "FREE"),
            Self::Plus => write!(f, "PLUS"),
            Self::Gold => write!(f, "GOLD"),
            Self::Platinum => write!(f, "PLATINUM"),
        }
    }
}

// ---------------------------------------------------------------------------
// Quota
// ---------------------------------------------------------------------------

/// A per-day allowance: a concrete limit or the unlimited sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quota {
    /// At most this many per refill period. `Limited(0)` means the action
    /// is not offered at the plan at all.
    Limited(u32),
    /// Never metered, never decremented.
    Unlimited,
}

impl Quota {
    /// Whether this quota offers the action at all.
    #[must_use]
    pub fn is_offered(self) -> bool {
        !matches!(self, Self::Limited(0))
    }

    #[must_use]
    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The kind of swipe a user submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeKind {
    Like,
    Nope,
    SuperLike,
}

impl fmt::Display for SwipeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => write!(f, "LIKE"),
            Self::Nope => write!(f, "NOPE"),
            Self::SuperLike => write!(f, "SUPERLIKE"),
        }
    }
}

/// Quota-governed action classes metered by the entitlement store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeteredAction {
    /// A regular like/nope, counted against the daily swipe allowance.
    Swipe,
    /// A premium higher-visibility like, separately metered.
    SuperLike,
    /// Undo of the most recent swipe, premium-gated.
    Rewind,
}

impl MeteredAction {
    /// The metered class a swipe kind consumes from.
    #[must_use]
    pub fn for_swipe(kind: SwipeKind) -> Self {
        match kind {
            SwipeKind::Like | SwipeKind::Nope => Self::Swipe,
            SwipeKind::SuperLike => Self::SuperLike,
        }
    }
}

impl fmt::Display for MeteredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swipe => write!(f, "SWIPE"),
            Self::SuperLike => write!(f, "SUPER_LIKE"),
            Self::Rewind => write!(f, "REWIND"),
        }
    }
}

/// Abuse-sensitive actions bounded by the rate limiter rather than a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbuseAction {
    Report,
    Block,
}

impl fmt::Display for AbuseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => write!(f, "REPORT"),
            Self::Block => write!(f, "BLOCK"),
        }
    }
}

/// What the caller has left after a successful consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingQuota {
    pub action: MeteredAction,
    pub remaining: Quota,
}
