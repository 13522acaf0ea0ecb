//! Paste store backends.

/// Durable redb-backed store.
pub mod durable;
/// Process-lifetime in-memory store.
pub mod memory;

use crate::constants::MAX_RETENTION_SECS;
use crate::error::StoreError;
use crate::models::paste::Paste;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::time::Duration;

/// Absolute eviction deadline for a new row: the requested TTL, or the
/// 30-day retention ceiling for never-expire pastes. Oversized TTLs are
/// clamped to the ceiling.
pub(crate) fn evict_deadline(now: DateTime<Utc>, ttl: Option<Duration>) -> DateTime<Utc> {
    let ttl_secs = ttl
        .map(|d| d.as_secs())
        .unwrap_or(MAX_RETENTION_SECS)
        .min(MAX_RETENTION_SECS);
    now + ChronoDuration::seconds(ttl_secs as i64)
}

/// Capability interface over paste persistence.
///
/// Two interchangeable backends implement this contract; the choice is
/// made once at startup from configuration. The store exclusively owns
/// persisted paste records; callers hold no copies across requests.
pub trait PasteStore: Send + Sync {
    /// Check whether `id` is present (expired-but-unreaped rows count
    /// as present, preserving id uniqueness until eviction).
    fn exists(&self, id: &str) -> Result<bool, StoreError>;

    /// Insert a paste, failing with [`StoreError::AlreadyExists`] when
    /// the id is occupied. The insert-if-absent check is atomic with
    /// respect to concurrent writers racing on the same id.
    ///
    /// `ttl` of `None` means the paste never expires on its own; the
    /// backend still applies the 30-day retention ceiling.
    fn put(&self, paste: &Paste, ttl: Option<Duration>) -> Result<(), StoreError>;

    /// Fetch a paste by id. A present row whose `expires_at` has
    /// passed is eagerly deleted and reported as absent.
    fn get(&self, id: &str) -> Result<Option<Paste>, StoreError>;

    /// Remove a paste. Idempotent; deleting a missing id is not an error.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Evict every expired row and return the eviction count.
    fn purge_expired(&self) -> Result<usize, StoreError>;
}
