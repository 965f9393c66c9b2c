//! Configuration types for the EchoCore engine.
//!
//! All windows and limits live here; engines receive them injected, so
//! product can retune decay windows and plan tables without touching
//! engine code.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{AbuseAction, EchoError, Plan, Quota, Result, constants};

/// Photo-freshness decay configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FreshnessConfig {
    /// Full discoverability window (hours).
    pub window_hours: i64,
    /// Remaining time at or below which the Echo shows EXPIRING (hours).
    pub warning_hours: i64,
}

impl FreshnessConfig {
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::hours(self.window_hours)
    }

    #[must_use]
    pub fn warning(&self) -> Duration {
        Duration::hours(self.warning_hours)
    }
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            window_hours: constants::FRESHNESS_WINDOW_HOURS,
            warning_hours: constants::FRESHNESS_WARNING_HOURS,
        }
    }
}

/// Match TTL configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchTtlConfig {
    /// Countdown horizon for PENDING matches (hours).
    pub ttl_hours: i64,
}

impl MatchTtlConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::hours(self.ttl_hours)
    }
}

impl Default for MatchTtlConfig {
    fn default() -> Self {
        Self {
            ttl_hours: constants::MATCH_TTL_HOURS,
        }
    }
}

/// Per-plan consumable limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanLimits {
    pub daily_swipes: Quota,
    pub super_likes_per_day: Quota,
    pub rewinds_per_day: Quota,
}

impl PlanLimits {
    #[must_use]
    pub fn quota_for(&self, action: crate::MeteredAction) -> Quota {
        match action {
            crate::MeteredAction::Swipe => self.daily_swipes,
            crate::MeteredAction::SuperLike => self.super_likes_per_day,
            crate::MeteredAction::Rewind => self.rewinds_per_day,
        }
    }
}

/// The plan → limits table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanTable {
    pub free: PlanLimits,
    pub plus: PlanLimits,
    pub gold: PlanLimits,
    pub platinum: PlanLimits,
}

impl PlanTable {
    #[must_use]
    pub fn limits(&self, plan: Plan) -> &PlanLimits {
        match plan {
            Plan::Free => &self.free,
            Plan::Plus => &self.plus,
            Plan::Gold => &self.gold,
            Plan::Platinum => &self.platinum,
        }
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self {
            free: PlanLimits {
                daily_swipes: Quota::Limited(constants::FREE_DAILY_SWIPES),
                super_likes_per_day: Quota::Limited(0),
                rewinds_per_day: Quota::Limited(0),
            },
            plus: PlanLimits {
                daily_swipes: Quota::Unlimited,
                super_likes_per_day: Quota::Limited(constants::PLUS_SUPER_LIKES_PER_DAY),
                rewinds_per_day: Quota::Limited(constants::PLUS_REWINDS_PER_DAY),
            },
            gold: PlanLimits {
                daily_swipes: Quota::Unlimited,
                super_likes_per_day: Quota::Limited(constants::GOLD_SUPER_LIKES_PER_DAY),
                rewinds_per_day: Quota::Unlimited,
            },
            platinum: PlanLimits {
                daily_swipes: Quota::Unlimited,
                super_likes_per_day: Quota::Unlimited,
                rewinds_per_day: Quota::Unlimited,
            },
        }
    }
}

/// Rate-limit windows for abuse-sensitive actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AbuseConfig {
    pub report_window_secs: i64,
    pub report_limit: u32,
    pub block_window_secs: i64,
    pub block_limit: u32,
}

impl AbuseConfig {
    #[must_use]
    pub fn window_for(&self, action: AbuseAction) -> Duration {
        match action {
            AbuseAction::Report => Duration::seconds(self.report_window_secs),
            AbuseAction::Block => Duration::seconds(self.block_window_secs),
        }
    }

    #[must_use]
    pub fn limit_for(&self, action: AbuseAction) -> u32 {
        match action {
            AbuseAction::Report => self.report_limit,
            AbuseAction::Block => self.block_limit,
        }
    }
}

impl Default for AbuseConfig {
    fn default() -> Self {
        Self {
            report_window_secs: constants::REPORT_WINDOW_SECS,
            report_limit: constants::REPORT_LIMIT,
            block_window_secs: constants::BLOCK_WINDOW_SECS,
            block_limit: constants::BLOCK_LIMIT,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub freshness: FreshnessConfig,
    pub match_ttl: MatchTtlConfig,
    pub plans: PlanTable,
    pub abuse: AbuseConfig,
}

impl EngineConfig {
    /// Structural sanity checks, run once at startup.
    ///
    /// # Errors
    /// Returns `Configuration` for any window or limit that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.freshness.window_hours <= 0 {
            return Err(EchoError::Configuration(
                "freshness window must be positive".to_string(),
            ));
        }
        if self.freshness.warning_hours < 0 || self.freshness.warning_hours > self.freshness.window_hours
        {
            return Err(EchoError::Configuration(format!(
                "warning threshold {}h must lie within the freshness window {}h",
                self.freshness.warning_hours, self.freshness.window_hours,
            )));
        }
        if self.match_ttl.ttl_hours <= 0 {
            return Err(EchoError::Configuration(
                "match TTL must be positive".to_string(),
            ));
        }
        if self.abuse.report_window_secs <= 0 || self.abuse.block_window_secs <= 0 {
            return Err(EchoError::Configuration(
                "rate-limit windows must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
