//! Paste entity and input normalization.

use crate::constants::DEFAULT_LANGUAGE;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Languages accepted for syntax tagging; everything else normalizes to
/// [`DEFAULT_LANGUAGE`].
pub const ALLOWED_LANGUAGES: &[&str] = &[
    "plaintext",
    "javascript",
    "typescript",
    "python",
    "java",
    "csharp",
    "cpp",
    "go",
    "rust",
    "ruby",
    "php",
    "swift",
    "kotlin",
    "sql",
    "html",
    "css",
    "json",
    "yaml",
    "markdown",
    "bash",
];

/// Paste record persisted by the store and returned by the API.
///
/// Created once on a successful write and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub language: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a paste.
#[derive(Debug, Deserialize)]
pub struct CreatePasteRequest {
    pub content: String,
    pub language: Option<String>,
    pub expiration: Option<String>,
}

/// Symbolic expiration tokens accepted on the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    OneHour,
    OneDay,
    SevenDays,
    ThirtyDays,
    Never,
}

impl Expiration {
    /// Parse a raw expiration token. Missing or unrecognized values
    /// fall back to one day.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("1h") => Self::OneHour,
            Some("1d") => Self::OneDay,
            Some("7d") => Self::SevenDays,
            Some("30d") => Self::ThirtyDays,
            Some("never") => Self::Never,
            _ => Self::OneDay,
        }
    }

    /// Absolute expiry timestamp relative to `now`, or `None` for
    /// pastes that never expire.
    pub fn expires_at(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let hours = match self {
            Self::OneHour => 1,
            Self::OneDay => 24,
            Self::SevenDays => 7 * 24,
            Self::ThirtyDays => 30 * 24,
            Self::Never => return None,
        };
        Some(now + Duration::hours(hours))
    }
}

/// Normalize a submitted language against the allow-list.
///
/// Trims and lowercases; anything outside [`ALLOWED_LANGUAGES`]
/// becomes [`DEFAULT_LANGUAGE`].
pub fn normalize_language(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return DEFAULT_LANGUAGE.to_string();
    };
    let lower = raw.trim().to_ascii_lowercase();
    if ALLOWED_LANGUAGES.contains(&lower.as_str()) {
        lower
    } else {
        DEFAULT_LANGUAGE.to_string()
    }
}

fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}')
}

/// Validate and sanitize submitted paste content.
///
/// Trims surrounding whitespace, rejects empty input, enforces the
/// character ceiling, and strips null bytes and control characters
/// while preserving tab, newline, and carriage return.
///
/// # Errors
/// [`AppError::BadRequest`] for empty input, [`AppError::ContentTooLarge`]
/// when the trimmed length exceeds `max_chars`.
pub fn sanitize_content(raw: &str, max_chars: usize) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Content cannot be empty".to_string()));
    }
    if trimmed.chars().count() > max_chars {
        return Err(AppError::ContentTooLarge(max_chars));
    }
    Ok(trimmed.chars().filter(|c| !is_stripped_control(*c)).collect())
}
