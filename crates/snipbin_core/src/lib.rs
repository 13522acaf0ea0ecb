//! Core domain library for snipbin (config, storage, paste service).

/// Configuration loading and backend selection.
pub mod config;
/// Shared constants (alphabet, limits, windows).
pub mod constants;
/// Application error types.
pub mod error;
/// Short identifier generation and format checks.
pub mod id;
/// Per-client request rate limiting.
pub mod limiter;
/// Data models for API requests and persistence.
pub mod models;
/// Paste creation and retrieval orchestration.
pub mod service;
/// Paste store backends (in-memory and redb).
pub mod store;

pub use config::{Config, StoreBackend};
pub use constants::DEFAULT_PORT;
pub use error::{AppError, StoreError};
pub use limiter::{RateLimitDecision, RateLimiter};
pub use service::PasteService;
pub use store::{durable::RedbStore, memory::MemoryStore, PasteStore};
