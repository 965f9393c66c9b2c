//! # echo-status
//!
//! **Pure visibility & countdown math for EchoCore.**
//!
//! This is the compute plane — it takes timestamps and produces derived
//! display state. It has:
//!
//! - **Zero side effects**: no stores, no quota checks, no logging
//! - **Deterministic output**: same timestamps -> same report, everywhere
//! - **Total functions**: every input (including future timestamps)
//!   produces a defined result; there are no failure modes
//!
//! Safe to call from any number of concurrent callers — nothing here
//! holds mutable state.

pub mod countdown;
pub mod freshness;

pub use countdown::{days_until, hours_until};
pub use freshness::compute_status;
