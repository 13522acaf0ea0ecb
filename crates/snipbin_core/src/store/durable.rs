//! Durable paste store backed by redb.
//!
//! Rows are bincode-encoded under namespaced `paste:<id>` keys. Expiry
//! is stored as an absolute deadline on the row; reads delete expired
//! rows eagerly and [`RedbStore::open`] callers reconcile at startup
//! via [`PasteStore::purge_expired`].

use super::{evict_deadline, PasteStore};
use crate::constants::{PASTE_KEY_PREFIX, REDB_FILE_NAME};
use crate::error::StoreError;
use crate::models::paste::Paste;
use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Paste rows (`StoredRow`, bincode-encoded).
const PASTES: TableDefinition<&str, &[u8]> = TableDefinition::new("pastes");

#[derive(Debug, Serialize, Deserialize)]
struct StoredRow {
    paste: Paste,
    evict_at: DateTime<Utc>,
}

impl StoredRow {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.evict_at <= now
            || self
                .paste
                .expires_at
                .is_some_and(|expires_at| expires_at <= now)
    }
}

/// Accessor for the paste table of an embedded redb database.
pub struct RedbStore {
    db: redb::Database,
}

impl RedbStore {
    /// Open (or create) the database under `dir` and initialize the
    /// paste table.
    ///
    /// # Errors
    /// Returns an error when the directory cannot be created or redb
    /// initialization fails.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        let db = redb::Database::create(dir.join(REDB_FILE_NAME))?;
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    fn key(id: &str) -> String {
        format!("{}{}", PASTE_KEY_PREFIX, id)
    }

    fn decode(bytes: &[u8]) -> Result<StoredRow, StoreError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn read_row(&self, id: &str) -> Result<Option<StoredRow>, StoreError> {
        let key = Self::key(id);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PASTES)?;
        match table.get(key.as_str())? {
            Some(value) => Ok(Some(Self::decode(value.value())?)),
            None => Ok(None),
        }
    }
}

impl PasteStore for RedbStore {
    fn exists(&self, id: &str) -> Result<bool, StoreError> {
        let key = Self::key(id);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PASTES)?;
        Ok(table.get(key.as_str())?.is_some())
    }

    fn put(&self, paste: &Paste, ttl: Option<Duration>) -> Result<(), StoreError> {
        let key = Self::key(&paste.id);
        let row = StoredRow {
            paste: paste.clone(),
            evict_at: evict_deadline(Utc::now(), ttl),
        };
        let encoded = bincode::serialize(&row)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PASTES)?;
            // Returning before commit aborts the transaction, so the
            // occupancy check and the insert are a single atomic step.
            if table.get(key.as_str())?.is_some() {
                return Err(StoreError::AlreadyExists);
            }
            table.insert(key.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, StoreError> {
        let Some(row) = self.read_row(id)? else {
            return Ok(None);
        };
        if row.is_expired(Utc::now()) {
            // Native reaping may lag; drop the row now.
            self.delete(id)?;
            return Ok(None);
        }
        Ok(Some(row.paste))
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let key = Self::key(id);
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PASTES)?;
            table.remove(key.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = Utc::now();
        let write_txn = self.db.begin_write()?;
        let purged = {
            let mut table = write_txn.open_table(PASTES)?;
            let mut expired_keys = Vec::new();
            for entry in table.iter()? {
                let (key, value) = entry?;
                let row = Self::decode(value.value())?;
                if row.is_expired(now) {
                    expired_keys.push(key.value().to_string());
                }
            }
            for key in &expired_keys {
                table.remove(key.as_str())?;
            }
            expired_keys.len()
        };
        write_txn.commit()?;
        Ok(purged)
    }
}
