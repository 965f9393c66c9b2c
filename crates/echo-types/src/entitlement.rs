//! Per-user entitlement state.
//!
//! Owned exclusively by the `EntitlementStore` — no other component reads
//! or writes these rows directly. Daily counters refill lazily: the first
//! check whose `now >= reset_at` performs exactly one reset, so there is
//! no background timer and the refill is idempotent under concurrent
//! access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Plan, PlanLimits, Quota, UserId, clock::start_of_next_day};

/// The full consumable state for one user.
///
/// Daily swipes count **up** toward the limit; super-likes and rewinds
/// count **down** from their refill value. The `*_remaining` fields are
/// unused (held at zero) while the plan's quota is `Unlimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementState {
    pub user_id: UserId,
    pub plan: Plan,
    pub daily_swipes_used: u32,
    pub daily_swipe_reset_at: DateTime<Utc>,
    pub super_likes_remaining: u32,
    pub super_like_refill_at: DateTime<Utc>,
    pub rewinds_remaining: u32,
    pub rewind_refill_at: DateTime<Utc>,
}

impl EntitlementState {
    /// Fresh state for a user on `plan`, with count-down quotas filled to
    /// the plan's limits and all reset stamps at the next midnight.
    #[must_use]
    pub fn new(user_id: UserId, plan: Plan, limits: &PlanLimits, now: DateTime<Utc>) -> Self {
        let reset_at = start_of_next_day(now);
        Self {
            user_id,
            plan,
            daily_swipes_used: 0,
            daily_swipe_reset_at: reset_at,
            super_likes_remaining: initial_grant(limits.super_likes_per_day),
            super_like_refill_at: reset_at,
            rewinds_remaining: initial_grant(limits.rewinds_per_day),
            rewind_refill_at: reset_at,
        }
    }
}

fn initial_grant(quota: Quota) -> u32 {
    match quota {
        Quota::Limited(n) => n,
        Quota::Unlimited => 0,
    }
}
