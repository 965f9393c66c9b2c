//! # echo-gate
//!
//! **Authorization plane for EchoCore.**
//!
//! External callers never touch the quota store or the rate limiter
//! directly — every action request enters through [`EntitlementGate`],
//! which short-circuits on the first denial:
//!
//! ```text
//! request -> RateLimiter (abuse-sensitive) -> EntitlementStore (metered)
//!         -> lifecycle mutation -> Authorized(remaining) | Denied(reason)
//! ```
//!
//! - [`EntitlementStore`]: per-user plan + consumable quotas, lazy daily
//!   refill, atomic per `(user, action)`
//! - [`RateLimiter`]: generic fixed-window limiter for report/block
//! - [`EntitlementGate`]: the composition and sole public entry point

pub mod gate;
pub mod rate_limiter;
pub mod store;

pub use gate::{EntitlementGate, RewindReceipt};
pub use rate_limiter::RateLimiter;
pub use store::EntitlementStore;
