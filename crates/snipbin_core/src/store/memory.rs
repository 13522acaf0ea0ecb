//! In-memory paste store.
//!
//! Process-lifetime, single-instance storage. Expired rows are evicted
//! lazily on read and by the server's periodic sweep task calling
//! [`PasteStore::purge_expired`].

use super::{evict_deadline, PasteStore};
use crate::constants::MEMORY_STORE_MAX_ENTRIES;
use crate::error::StoreError;
use crate::models::paste::Paste;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct StoredPaste {
    paste: Paste,
    /// Absolute eviction deadline: the paste's own expiry, or the
    /// retention ceiling for never-expire pastes.
    evict_at: DateTime<Utc>,
}

impl StoredPaste {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.evict_at <= now
            || self
                .paste
                .expires_at
                .is_some_and(|expires_at| expires_at <= now)
    }
}

/// DashMap-backed store with per-row expiry and an entry ceiling.
pub struct MemoryStore {
    data: DashMap<String, StoredPaste>,
    max_entries: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MEMORY_STORE_MAX_ENTRIES)
    }

    /// Create a store with a custom entry ceiling.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            data: DashMap::new(),
            max_entries,
        }
    }

    /// Current number of stored rows, including expired-but-unreaped ones.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PasteStore for MemoryStore {
    fn exists(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.data.contains_key(id))
    }

    fn put(&self, paste: &Paste, ttl: Option<Duration>) -> Result<(), StoreError> {
        if self.data.len() >= self.max_entries {
            // A full map may be carrying dead rows; reap before rejecting.
            let purged = self.purge_expired()?;
            if purged > 0 {
                tracing::debug!("Evicted {} expired pastes under capacity pressure", purged);
            }
            if self.data.len() >= self.max_entries {
                return Err(StoreError::CapacityExceeded);
            }
        }

        let now = Utc::now();
        match self.data.entry(paste.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(StoredPaste {
                    paste: paste.clone(),
                    evict_at: evict_deadline(now, ttl),
                });
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, StoreError> {
        let now = Utc::now();
        // The read guard must be dropped before the remove below.
        match self.data.get(id) {
            None => return Ok(None),
            Some(row) if !row.is_expired(now) => return Ok(Some(row.paste.clone())),
            Some(_) => {}
        }
        self.data.remove(id);
        Ok(None)
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.data.remove(id);
        Ok(())
    }

    fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = Utc::now();
        let before = self.data.len();
        self.data.retain(|_, row| !row.is_expired(now));
        Ok(before.saturating_sub(self.data.len()))
    }
}
