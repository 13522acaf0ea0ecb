//! Paste creation and retrieval orchestration.

use crate::constants::ID_MAX_ATTEMPTS;
use crate::error::{AppError, StoreError};
use crate::id;
use crate::models::paste::{
    normalize_language, sanitize_content, CreatePasteRequest, Expiration, Paste,
};
use crate::store::PasteStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates validation, collision-checked id assignment, expiry
/// computation, and store writes/reads.
///
/// Holds no paste state of its own; the store owns all records.
pub struct PasteService {
    store: Arc<dyn PasteStore>,
    max_content_chars: usize,
}

fn ttl_from_expiry(now: DateTime<Utc>, expires_at: Option<DateTime<Utc>>) -> Option<Duration> {
    // Floor of one second avoids zero/negative TTLs on clock skew.
    expires_at.map(|at| Duration::from_secs((at - now).num_seconds().max(1) as u64))
}

impl PasteService {
    pub fn new(store: Arc<dyn PasteStore>, max_content_chars: usize) -> Self {
        Self {
            store,
            max_content_chars,
        }
    }

    /// Validate a creation request and persist a new paste.
    ///
    /// # Returns
    /// The stored [`Paste`] (callers typically only surface its id).
    ///
    /// # Errors
    /// - [`AppError::BadRequest`] / [`AppError::ContentTooLarge`] for
    ///   invalid content.
    /// - [`AppError::IdentifierExhausted`] when five generated ids in a
    ///   row collide (saturated keyspace or unreachable store).
    /// - [`AppError::CapacityExceeded`] / [`AppError::Storage`]
    ///   propagated from the backend.
    pub fn create_paste(&self, req: CreatePasteRequest) -> Result<Paste, AppError> {
        let content = sanitize_content(&req.content, self.max_content_chars)?;
        let language = normalize_language(req.language.as_deref());
        let expiration = Expiration::parse(req.expiration.as_deref());

        let now = Utc::now();
        let expires_at = expiration.expires_at(now);
        let ttl = ttl_from_expiry(now, expires_at);

        for _ in 0..ID_MAX_ATTEMPTS {
            let candidate = id::generate();
            if self.store.exists(&candidate)? {
                continue;
            }

            let paste = Paste {
                id: candidate,
                content: content.clone(),
                language: language.clone(),
                expires_at,
                created_at: now,
            };
            match self.store.put(&paste, ttl) {
                Ok(()) => return Ok(paste),
                // Lost an insert race; the attempt counts as a collision.
                Err(StoreError::AlreadyExists) => continue,
                Err(other) => return Err(other.into()),
            }
        }

        tracing::warn!(
            "Gave up allocating a paste id after {} collisions",
            ID_MAX_ATTEMPTS
        );
        Err(AppError::IdentifierExhausted)
    }

    /// Fetch a paste by id.
    ///
    /// Malformed identifiers are rejected by format alone; the store is
    /// never consulted for them.
    pub fn get_paste(&self, id: &str) -> Result<Option<Paste>, AppError> {
        if !id::is_valid(id) {
            return Ok(None);
        }
        Ok(self.store.get(id)?)
    }

    /// Delete a paste by id. Idempotent; malformed ids are a no-op.
    pub fn delete_paste(&self, id: &str) -> Result<(), AppError> {
        if !id::is_valid(id) {
            return Ok(());
        }
        Ok(self.store.delete(id)?)
    }
}
