//! # echo-lifecycle
//!
//! **Match lifecycle & profile freshness registries for EchoCore.**
//!
//! This crate owns the mutable per-key state behind the pure math in
//! `echo-status`:
//!
//! - [`MatchBook`]: one match per unordered pair per matching epoch;
//!   creation, activation, TTL expiry, and rewind-driven deletion
//! - [`ProfileDirectory`]: last-verified-photo stamps feeding the
//!   visibility engine
//! - [`tick`]: the pure status recompute for a single match
//!
//! Both registries shard their state per key (`DashMap`), so concurrent
//! request handlers touching different matches or users never contend.

pub mod match_book;
pub mod profile;

pub use match_book::{MatchBook, tick};
pub use profile::ProfileDirectory;
