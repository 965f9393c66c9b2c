//! Echo visibility types.
//!
//! `EchoStatus` is **derived, never stored**: it is recomputed from the
//! source `ProfileFreshness` timestamp on every read, so it cannot drift
//! from the timestamp it summarizes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Discoverability status of a user's Echo, derived from photo freshness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EchoStatus {
    /// Fresh photo — fully discoverable.
    Active,
    /// Inside the warning threshold — discoverable, countdown shown.
    Expiring,
    /// Freshness window elapsed — no longer discoverable.
    Silence,
}

impl EchoStatus {
    /// Rank on the decay axis; status never regresses as elapsed time grows.
    #[must_use]
    pub fn decay_rank(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Expiring => 1,
            Self::Silence => 2,
        }
    }
}

impl fmt::Display for EchoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Expiring => write!(f, "EXPIRING"),
            Self::Silence => write!(f, "SILENCE"),
        }
    }
}

/// The derived visibility report handed to callers for rendering.
/// `days_left` is meaningful only for `EXPIRING`/`SILENCE` display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoReport {
    pub status: EchoStatus,
    pub hours_left: u32,
    pub days_left: u32,
}

/// Source record for visibility: when the user last submitted a verified
/// photo. Superseded on each successful submission, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFreshness {
    pub user_id: UserId,
    pub last_photo_at: DateTime<Utc>,
}
