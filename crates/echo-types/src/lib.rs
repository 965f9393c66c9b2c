//! # echo-types
//!
//! Shared types, errors, and configuration for the **EchoCore** lifecycle
//! & entitlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`MatchId`], [`PairKey`]
//! - **Echo model**: [`EchoStatus`], [`EchoReport`], [`ProfileFreshness`]
//! - **Match model**: [`Match`], [`MatchStatus`], [`MatchCountdown`], [`SwipeSnapshot`]
//! - **Plan model**: [`Plan`], [`Quota`], [`SwipeKind`], [`MeteredAction`], [`AbuseAction`]
//! - **Entitlement model**: [`EntitlementState`], [`RemainingQuota`]
//! - **Configuration**: [`EngineConfig`], [`FreshnessConfig`], [`MatchTtlConfig`], [`PlanTable`], [`AbuseConfig`]
//! - **Clock**: [`Clock`], [`SystemClock`] (and `ManualClock` behind `test-helpers`)
//! - **Errors**: [`EchoError`] with `EC_ERR_` prefix codes

pub mod clock;
pub mod config;
pub mod constants;
pub mod entitlement;
pub mod error;
pub mod ids;
pub mod matches;
pub mod plan;
pub mod status;

// Re-export all primary types at crate root for ergonomic imports:
//   use echo_types::{Match, MatchStatus, Plan, Quota, ...};

pub use clock::*;
pub use config::*;
pub use entitlement::*;
pub use error::*;
pub use ids::*;
pub use matches::*;
pub use plan::*;
pub use status::*;

// Constants are accessed via `echo_types::constants::FOO`
// (not re-exported to avoid name collisions).
