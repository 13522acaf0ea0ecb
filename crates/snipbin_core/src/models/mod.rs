//! Data models shared between the store and the HTTP boundary.

/// Paste entity, request payloads, and input normalization.
pub mod paste;
