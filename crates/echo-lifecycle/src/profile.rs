//! Profile freshness directory.
//!
//! Holds the last-verified-photo stamp per user — the *source* timestamp
//! the visibility engine derives from. Stamps are only ever superseded
//! forward: a submission older than the stored stamp is ignored, so
//! `last_photo_at` never regresses and the never-in-the-future invariant
//! is preserved against out-of-order writes.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use echo_types::{ProfileFreshness, UserId};

/// Per-user photo freshness records, sharded per key.
#[derive(Default)]
pub struct ProfileDirectory {
    stamps: DashMap<UserId, DateTime<Utc>>,
}

impl ProfileDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stamps: DashMap::new(),
        }
    }

    /// Record a verified photo submission. Returns the stamp now in
    /// effect (the new one, or the existing one if it was newer).
    pub fn record_photo(&self, user_id: UserId, at: DateTime<Utc>) -> DateTime<Utc> {
        let mut entry = self.stamps.entry(user_id).or_insert(at);
        if at > *entry {
            *entry = at;
        }
        let effective = *entry;
        drop(entry);
        tracing::debug!(user = %user_id, %effective, "photo freshness recorded");
        effective
    }

    /// The freshness record for a user, if any photo was ever verified.
    #[must_use]
    pub fn freshness(&self, user_id: UserId) -> Option<ProfileFreshness> {
        self.stamps.get(&user_id).map(|stamp| ProfileFreshness {
            user_id,
            last_photo_at: *stamp,
        })
    }

    /// Number of users with a freshness record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}
