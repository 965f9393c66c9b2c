//! Entitlement store — per-user plan and consumable quotas.
//!
//! The store is the source of truth for all quota state. Refill is lazy:
//! the first check whose `now >= reset_at` performs exactly one reset and
//! moves `reset_at` to the next midnight, so there is no background timer
//! and a burst of checks straddling the boundary can never grant more
//! than one reset's worth of quota.
//!
//! `check_and_consume` is atomic per `(user, action)`: the row is mutated
//! under its shard's entry guard, so concurrent requests for the same
//! user serialize while distinct users proceed without contention.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use echo_types::{
    EchoError, EntitlementState, MeteredAction, Plan, PlanTable, Quota, RemainingQuota, Result,
    UserId, clock::start_of_next_day,
};

/// Owns every [`EntitlementState`] row. No other component reads or
/// writes them directly.
pub struct EntitlementStore {
    rows: DashMap<UserId, EntitlementState>,
    plans: PlanTable,
}

impl EntitlementStore {
    #[must_use]
    pub fn new(plans: PlanTable) -> Self {
        Self {
            rows: DashMap::new(),
            plans,
        }
    }

    /// Authorize and record one use of `action` by `user_id`.
    ///
    /// Users without a row are treated as FREE until a plan-change event
    /// arrives.
    ///
    /// # Errors
    /// - `PlanInsufficient` if the plan does not offer the action at all
    /// - `QuotaExhausted` if today's allowance is used up
    pub fn check_and_consume(
        &self,
        user_id: UserId,
        action: MeteredAction,
        now: DateTime<Utc>,
    ) -> Result<RemainingQuota> {
        let mut row = self.rows.entry(user_id).or_insert_with(|| {
            EntitlementState::new(user_id, Plan::Free, self.plans.limits(Plan::Free), now)
        });
        let quota = self.plans.limits(row.plan).quota_for(action);

        let limit = match quota {
            Quota::Unlimited => {
                return Ok(RemainingQuota {
                    action,
                    remaining: Quota::Unlimited,
                });
            }
            Quota::Limited(0) => {
                tracing::debug!(user = %user_id, %action, plan = %row.plan, "action not offered at plan");
                return Err(EchoError::PlanInsufficient {
                    action,
                    plan: row.plan,
                });
            }
            Quota::Limited(limit) => limit,
        };

        let remaining = match action {
            MeteredAction::Swipe => {
                if now >= row.daily_swipe_reset_at {
                    row.daily_swipes_used = 0;
                    row.daily_swipe_reset_at = start_of_next_day(now);
                    tracing::debug!(user = %user_id, "daily swipe counter reset");
                }
                if row.daily_swipes_used >= limit {
                    return Err(EchoError::QuotaExhausted { action, limit });
                }
                row.daily_swipes_used += 1;
                limit - row.daily_swipes_used
            }
            MeteredAction::SuperLike => {
                let state = &mut *row;
                consume_refilling(
                    &mut state.super_likes_remaining,
                    &mut state.super_like_refill_at,
                    limit,
                    now,
                )
                .ok_or(EchoError::QuotaExhausted { action, limit })?
            }
            MeteredAction::Rewind => {
                let state = &mut *row;
                consume_refilling(
                    &mut state.rewinds_remaining,
                    &mut state.rewind_refill_at,
                    limit,
                    now,
                )
                .ok_or(EchoError::QuotaExhausted { action, limit })?
            }
        };

        Ok(RemainingQuota {
            action,
            remaining: Quota::Limited(remaining),
        })
    }

    /// Apply a subscription event (purchase, upgrade, downgrade, lapse).
    ///
    /// The new plan's table governs every subsequent check; count-down
    /// consumables are re-granted to the new plan's limits immediately so
    /// a purchase unlocks its allowance without waiting for midnight.
    pub fn apply_plan_change(&self, user_id: UserId, plan: Plan, now: DateTime<Utc>) {
        let mut row = self
            .rows
            .entry(user_id)
            .or_insert_with(|| EntitlementState::new(user_id, plan, self.plans.limits(plan), now));
        if row.plan == plan {
            return;
        }
        let limits = self.plans.limits(plan);
        row.plan = plan;
        row.super_likes_remaining = match limits.super_likes_per_day {
            Quota::Limited(n) => n,
            Quota::Unlimited => 0,
        };
        row.rewinds_remaining = match limits.rewinds_per_day {
            Quota::Limited(n) => n,
            Quota::Unlimited => 0,
        };
        tracing::info!(user = %user_id, %plan, "plan change applied");
    }

    /// Snapshot of a user's row, if one exists.
    #[must_use]
    pub fn state(&self, user_id: UserId) -> Option<EntitlementState> {
        self.rows.get(&user_id).map(|row| *row)
    }
}

/// Lazy-refill consumption for a count-down counter. Returns the new
/// remaining count, or `None` when exhausted. Clamps to `limit` so a
/// plan downgrade takes effect on this very check.
fn consume_refilling(
    remaining: &mut u32,
    refill_at: &mut DateTime<Utc>,
    limit: u32,
    now: DateTime<Utc>,
) -> Option<u32> {
    if now >= *refill_at {
        *remaining = limit;
        *refill_at = start_of_next_day(now);
    }
    if *remaining > limit {
        *remaining = limit;
    }
    if *remaining == 0 {
        None
    } else {
        *remaining -= 1;
        Some(*remaining)
    }
}
