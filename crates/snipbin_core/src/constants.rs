//! Shared constants used across snipbin crates.

/// Default API port for snipbin.
pub const DEFAULT_PORT: u16 = 38740;

/// Identifier alphabet: lowercase letters and digits minus the
/// ambiguous glyphs `0`, `o`, `l`, `1` (32 symbols).
pub const ID_ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyz23456789";

/// Fixed identifier length.
pub const ID_LENGTH: usize = 5;

/// Collision retry bound for identifier assignment.
pub const ID_MAX_ATTEMPTS: usize = 5;

/// Maximum paste content length in characters, after trimming.
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 500_000;

/// Language used when the submitted one is missing or unrecognized.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Retention ceiling applied to "never expire" pastes (30 days).
pub const MAX_RETENTION_SECS: u64 = 30 * 24 * 60 * 60;

/// Rate limit window length in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Accepted requests per window per client key.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 10;

/// Entry ceiling for the in-memory store backend.
pub const MEMORY_STORE_MAX_ENTRIES: usize = 100_000;

/// Period of the in-memory expiry sweep.
pub const SWEEP_INTERVAL_SECS: u64 = 5 * 60;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Key namespace for persisted paste rows.
pub const PASTE_KEY_PREFIX: &str = "paste:";
