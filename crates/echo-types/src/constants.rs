//! System-wide constants for the EchoCore engine.
//!
//! These are the *defaults* behind the configuration types — every limit
//! and window is configuration-driven at runtime, never read from here at
//! a use site.

/// Photo-freshness window: how long an Echo stays discoverable after the
/// last verified photo (7 days).
pub const FRESHNESS_WINDOW_HOURS: i64 = 168;

/// Warning threshold: remaining freshness at or below this shows EXPIRING
/// (2 days).
pub const FRESHNESS_WARNING_HOURS: i64 = 48;

/// Match time-to-live for unconsummated (PENDING) matches.
pub const MATCH_TTL_HOURS: i64 = 48;

/// Daily swipe allowance on the FREE plan.
pub const FREE_DAILY_SWIPES: u32 = 50;

/// Super-likes per day on the PLUS plan.
pub const PLUS_SUPER_LIKES_PER_DAY: u32 = 1;

/// Rewinds per day on the PLUS plan.
pub const PLUS_REWINDS_PER_DAY: u32 = 1;

/// Super-likes per day on the GOLD plan.
pub const GOLD_SUPER_LIKES_PER_DAY: u32 = 5;

/// Rate-limit window for report submission (seconds).
pub const REPORT_WINDOW_SECS: i64 = 3600;

/// Maximum reports per reporter within the report window.
pub const REPORT_LIMIT: u32 = 10;

/// Rate-limit window for block submission (seconds).
pub const BLOCK_WINDOW_SECS: i64 = 3600;

/// Maximum blocks per user within the block window.
pub const BLOCK_LIMIT: u32 = 25;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "EchoCore";
