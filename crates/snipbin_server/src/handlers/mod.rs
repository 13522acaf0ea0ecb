//! HTTP request handlers.

/// Paste endpoints.
pub mod paste;
