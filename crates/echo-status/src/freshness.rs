//! Photo-freshness visibility engine.
//!
//! The status is a pure function of the last-photo timestamp and the
//! current time:
//!
//! ```text
//! compute_status(last_photo_at, now, cfg) -> EchoReport
//! ```
//!
//! With window `W` and warning threshold `T`:
//! - `elapsed >= W`  -> SILENCE (boundary inclusive on the silence side)
//! - `remaining <= T` -> EXPIRING (boundary inclusive on the warning side)
//! - otherwise        -> ACTIVE
//!
//! A timestamp in the future clamps to zero elapsed, so the result is
//! defined for any input. The status is monotone in elapsed time: it
//! never regresses from SILENCE back toward ACTIVE without a new photo.

use chrono::{DateTime, Utc};
use echo_types::{EchoReport, EchoStatus, FreshnessConfig};

use crate::countdown::{days_until, hours_until};

/// Derive the visibility report for a profile whose last verified photo
/// was at `last_photo_at`.
#[must_use]
pub fn compute_status(
    last_photo_at: DateTime<Utc>,
    now: DateTime<Utc>,
    cfg: &FreshnessConfig,
) -> EchoReport {
    // Future stamps clamp to zero elapsed.
    let effective = last_photo_at.min(now);
    let deadline = effective + cfg.window();

    if now >= deadline {
        return EchoReport {
            status: EchoStatus::Silence,
            hours_left: 0,
            days_left: 0,
        };
    }

    let status = if deadline - now <= cfg.warning() {
        EchoStatus::Expiring
    } else {
        EchoStatus::Active
    };

    let max_days = u32::try_from((cfg.window_hours + 23) / 24).unwrap_or(u32::MAX);
    EchoReport {
        status,
        hours_left: hours_until(deadline, now),
        days_left: days_until(deadline, now).min(max_days),
    }
}
